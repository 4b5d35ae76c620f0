pub mod azure;
pub mod config;
pub mod console;
pub mod content_type;
pub mod credential;
pub mod endpoint;
pub mod error;
pub mod files;
pub mod session;
pub mod storage;
pub mod upload;

pub use console::{Console, LineKind};
pub use error::{Error, Result};
pub use storage::StorageClient;
