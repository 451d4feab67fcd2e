//! Push channel: one process-wide connection, named events per resource

pub mod client;
pub mod local;
pub mod redis;
pub mod supervisor;

pub use client::{ChannelClient, ChannelMessage, Subscription};
pub use local::LocalChannel;
pub use redis::RedisChannel;
pub use supervisor::{ConnectionState, RetryConfig, Supervisor};
