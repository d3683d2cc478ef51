pub mod api;
pub mod config;
pub mod editor;
pub mod entity;
pub mod error;
pub mod forms;
pub mod server;
pub mod session;
pub mod skills;
pub mod table;
pub mod ui;
mod utils;

pub use error::{ApiError, FolioError};
