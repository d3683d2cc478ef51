use base64::Engine as _;
use serde::Deserialize;

/// Claims the dashboard reads from the API's access token.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct TokenClaims {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Expiry as seconds since the UNIX epoch.
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    pub(crate) fn is_expired_at(&self, now_secs: i64) -> bool {
        self.exp.is_some_and(|exp| exp <= now_secs)
    }
}

/// Decode the payload claims of a JWT without verifying its signature.
///
/// The API owns verification; this is only used for display and to drop tokens that have
/// visibly expired. Opaque (non-JWT) tokens yield `None`.
pub(crate) fn decode_claims(jwt: &str) -> Option<TokenClaims> {
    let payload_b64 = jwt.split('.').nth(1)?;

    // Most JWTs are base64url without padding, but some toolchains may include padding.
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload_b64)
        .or_else(|_| base64::engine::general_purpose::URL_SAFE.decode(payload_b64))
        .ok()?;

    serde_json::from_slice(&bytes).ok()
}
