pub mod hook;
pub mod item;
pub mod published;

pub use hook::{Hook, HookType};
pub use item::{ContentItem, Metrics, RawContentItem, SourceType};
pub use published::PublishedDate;
