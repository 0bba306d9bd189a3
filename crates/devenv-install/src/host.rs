//! Host environment detection
//!
//! Installation behavior branches on the operating system and, on Linux,
//! on which system package manager is available. Detection runs once and
//! the result is threaded to every install task.

use std::process::Stdio;
use tokio::process::Command;

/// Operating system family the provisioner runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsKind {
    Windows,
    MacOs,
    Linux,
}

impl OsKind {
    /// Detect the current OS family.
    ///
    /// Anything that is neither Windows nor macOS is treated as Linux,
    /// which is where package installation actually happens.
    pub fn detect() -> Self {
        match std::env::consts::OS {
            "windows" => OsKind::Windows,
            "macos" => OsKind::MacOs,
            _ => OsKind::Linux,
        }
    }

    /// The name used in plugin platform lists.
    pub fn as_str(&self) -> &'static str {
        match self {
            OsKind::Windows => "windows",
            OsKind::MacOs => "macos",
            OsKind::Linux => "linux",
        }
    }
}

/// A supported system package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Yum,
    AptGet,
}

impl PackageManager {
    /// Probe order: first manager found on the host wins.
    pub const PROBE_ORDER: [PackageManager; 2] = [PackageManager::Yum, PackageManager::AptGet];

    /// The executable name, also the key used in package install tables.
    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Yum => "yum",
            PackageManager::AptGet => "apt-get",
        }
    }
}

/// The detected host environment install tasks run against.
#[derive(Debug, Clone)]
pub struct HostEnv {
    pub os: OsKind,
    /// Detected package manager; `None` on non-Linux hosts and on Linux
    /// hosts where no supported manager was found.
    pub package_manager: Option<PackageManager>,
}

impl HostEnv {
    /// Build a host environment from known parts.
    ///
    /// Useful for testing install flows without probing the machine.
    pub fn new(os: OsKind, package_manager: Option<PackageManager>) -> Self {
        Self {
            os,
            package_manager,
        }
    }

    /// Detect the host environment.
    ///
    /// Package-manager probing only happens on Linux.
    pub async fn detect() -> Self {
        let os = OsKind::detect();
        let package_manager = if os == OsKind::Linux {
            detect_package_manager().await
        } else {
            None
        };

        tracing::debug!(os = os.as_str(), ?package_manager, "Detected host environment");
        Self {
            os,
            package_manager,
        }
    }
}

/// Probe for a supported package manager, first hit wins.
async fn detect_package_manager() -> Option<PackageManager> {
    for manager in PackageManager::PROBE_ORDER {
        if command_exists(manager.command()).await {
            return Some(manager);
        }
    }
    None
}

/// Check whether an executable resolves on the host.
async fn command_exists(name: &str) -> bool {
    Command::new("which")
        .arg(name)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|status| status.success())
        .unwrap_or(false)
}
