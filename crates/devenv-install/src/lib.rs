//! Package and plugin installation for the devenv provisioner.
//!
//! This crate is the provisioning collaborator of `devenv-config`: it
//! reads package and plugin descriptions out of the resolved settings
//! tree and installs whatever the detected host is missing. It never
//! mutates the settings it is given.

pub mod error;
pub mod host;
pub mod installer;
pub mod package;
pub mod plugin;
pub mod task;

pub use error::{Error, Result};
pub use host::{HostEnv, OsKind, PackageManager};
pub use installer::{Installer, PACKAGES_PATH, PLUGINS_PATH, TaskOutcome};
pub use package::{PackageCommands, PackageMessages, SystemPackage};
pub use plugin::{PluginCommands, Platforms, ToolPlugin};
pub use task::{CheckReport, InstallReport, ProvisionTask, TaskStatus};
