//! Vitrine Core Library
//!
//! Configuration and error handling shared by the Vitrine site tooling.

pub mod config;
pub mod error;

pub use config::{Config, SearchConfig, SiteConfig};
pub use error::{CoreError, Result};
