//! Layered configuration resolution for the devenv provisioner
//!
//! This crate loads one or more configuration sources, deep-merges them
//! into a single settings tree, and applies an ordered battery of
//! derivation rules that fill in computed defaults (host name, pseudo-IP,
//! VM name, extension lists) wherever the user left a value unset.
//!
//! # Architecture
//!
//! ```text
//!   SourceList --> Resolver --(fold via deep_merge)--> Settings
//!                      |
//!               DerivationEngine (fixed rule order, run once)
//!                      |
//!               Settings exposed read-only via get / get_all
//! ```
//!
//! # Example
//!
//! ```
//! use devenv_config::Settings;
//! use serde_json::json;
//!
//! let mut settings = Settings::new();
//! settings.set("project.name", json!("demo"));
//! assert_eq!(settings.get_str("project.name"), Some("demo"));
//! ```

pub mod derive;
pub mod error;
pub mod loader;
pub mod merge;
pub mod path;
pub mod resolver;
pub mod tree;

pub use derive::{DerivationEngine, DerivationRule};
pub use error::{Error, Result};
pub use loader::{DEFAULT_SETTINGS_FILE, PROJECT_SETTINGS_FILE, SourceList};
pub use merge::deep_merge;
pub use path::{PathSegment, get_at_path, parse_path};
pub use resolver::Resolver;
pub use tree::Settings;
