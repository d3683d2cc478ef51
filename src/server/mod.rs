mod router;
pub mod routes;

pub use router::{FolioState, folio_router};
