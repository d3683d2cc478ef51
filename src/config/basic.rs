use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

/// Dashboard server configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BasicConfig {
    /// HTTP server listen address (e.g., "0.0.0.0", "127.0.0.1").
    /// TOML: `basic.listen_addr`. Default: `0.0.0.0`.
    #[serde(default = "default_listen_ip")]
    pub listen_addr: IpAddr,

    /// HTTP server listen port.
    /// TOML: `basic.listen_port`. Default: `3000`.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Log level for tracing subscriber initialization (e.g., "error", "warn", "info", "debug", "trace").
    /// TOML: `basic.loglevel`. Default: `info`.
    #[serde(default = "default_loglevel")]
    pub loglevel: String,

    /// Secret used to encrypt session cookies. Must be at least 64 bytes when set.
    /// When empty a random key is generated per process, so sessions do not survive restarts.
    /// TOML: `basic.cookie_secret`.
    #[serde(default)]
    pub cookie_secret: String,

    /// Drop the `Secure` attribute from cookies (plain-HTTP local development only).
    /// TOML: `basic.insecure_cookie`. Default: `false`.
    #[serde(default)]
    pub insecure_cookie: bool,

    /// Login attempts accepted per minute across all clients.
    /// TOML: `basic.login_per_minute`. Default: `10`.
    #[serde(default = "default_login_per_minute")]
    pub login_per_minute: u32,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_ip(),
            listen_port: default_listen_port(),
            loglevel: default_loglevel(),
            cookie_secret: String::new(),
            insecure_cookie: false,
            login_per_minute: default_login_per_minute(),
        }
    }
}

fn default_listen_ip() -> IpAddr {
    Ipv4Addr::new(0, 0, 0, 0).into()
}

fn default_listen_port() -> u16 {
    3000
}

fn default_loglevel() -> String {
    "info".to_string()
}

fn default_login_per_minute() -> u32 {
    10
}
