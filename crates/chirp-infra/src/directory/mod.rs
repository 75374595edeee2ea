//! User directory adapters.

mod http;
mod null;

pub use http::{DirectoryConfig, HttpUserDirectory};
pub use null::NullUserDirectory;
