pub mod error;
pub mod file;
pub mod git;

pub use error::PublishError;
pub use file::write_feed;
pub use git::{GitPublisher, PublishOutcome};
