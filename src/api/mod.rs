//! HTTP API surface: REST client, resource catalog, token persistence

pub mod client;
pub mod resources;
pub mod token;

pub use client::{ApiClient, CreatedResponse, DocumentPart};
pub use resources::{paths, SyncedResource};
pub use token::TokenStore;
