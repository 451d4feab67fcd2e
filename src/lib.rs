//! Ganaderos Portal Client Library
//!
//! Data and realtime-sync layer for the ranchers' association portal:
//! REST-backed content caches kept live by push events, and the multi-step
//! associate/volunteer application pipeline.

pub mod api;
pub mod channel;
pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod forms;
pub mod hub;
pub mod i18n;
pub mod sync;
pub mod utils;
