pub mod entry;
pub mod error;
pub mod render;
pub mod tag_name;
pub mod transform;

pub use entry::{FeedEntry, FeedTag};
pub use error::FeedError;
pub use render::render_feed;
pub use transform::{build_feed, is_eligible, FeedOptions};
