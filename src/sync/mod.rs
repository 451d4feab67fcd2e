//! Realtime list sync: merge, store, and feed lifecycle

pub mod event;
pub mod feed;
pub mod merge;
pub mod store;

pub use event::RecordEvent;
pub use feed::{FeedOptions, RecordFeed};
pub use merge::merge;
pub use store::{LoadPhase, RecordStore, Snapshot};
