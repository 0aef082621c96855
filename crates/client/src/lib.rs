//! Demo client for the arena runtime.
//!
//! # Architecture
//!
//! ```text
//! main
//!   ├─→ ClientConfig (environment + content files)
//!   ├─→ effects::registry() (logging effect executors)
//!   └─→ demo::run() (scripted player, AI archetypes, notification listener)
//! ```

pub mod config;
pub mod demo;
pub mod effects;

pub use config::ClientConfig;
