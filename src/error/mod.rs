mod api;
mod folio;

pub use api::{ApiError, GENERIC_API_MESSAGE};
pub use folio::FolioError;
pub(crate) use folio::signed_out_redirect;

pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}
