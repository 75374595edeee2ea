//! Application services - orchestration over the ports.

mod posts;
mod profiles;

pub use posts::{FEED_PAGE_SIZE, PostService};
pub use profiles::ProfileService;
