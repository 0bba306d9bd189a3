//! System packages described by resolved configuration
//!
//! A package carries its own presence check and per-package-manager
//! installation commands, all read from the resolved settings tree. The
//! install flow mirrors what a developer would do by hand: check first,
//! install only when missing, and fall back to printed instructions on
//! hosts where automatic installation is not possible.

use crate::host::{HostEnv, OsKind};
use crate::task::{CheckReport, InstallReport, ProvisionTask, shell_output, shell_run};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// A system package required on the host.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemPackage {
    pub name: String,
    pub commands: PackageCommands,
    #[serde(default)]
    pub messages: PackageMessages,
}

/// Commands for probing and installing a package.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageCommands {
    /// Shell command whose non-empty output means the package is present.
    pub check_presence: String,
    /// Installation command lists keyed by package manager name.
    #[serde(default)]
    pub installation: HashMap<String, Vec<String>>,
}

/// User-facing messages for the package.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageMessages {
    #[serde(default)]
    pub not_installed: String,
    #[serde(default)]
    pub installation_instructions: String,
}

impl SystemPackage {
    /// Deserialize a package description from a resolved settings value.
    pub fn from_value(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone()).map_err(|e| Error::InvalidTask {
            kind: "package".into(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ProvisionTask for SystemPackage {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self, host: &HostEnv) -> Result<CheckReport> {
        // Provisioning on Windows happens inside the guest, not the host
        if host.os == OsKind::Windows {
            return Ok(CheckReport::present());
        }

        let output = shell_output(&self.commands.check_presence).await?;
        if output.trim().is_empty() {
            Ok(CheckReport::missing(self.messages.not_installed.clone()))
        } else {
            Ok(CheckReport::present())
        }
    }

    async fn install(&self, host: &HostEnv) -> Result<InstallReport> {
        match host.os {
            OsKind::Windows => Ok(InstallReport::noop()),
            OsKind::MacOs => {
                tracing::warn!(
                    package = %self.name,
                    "Cannot install automatically on macOS, printing instructions"
                );
                Ok(InstallReport::manual(
                    self.messages.installation_instructions.clone(),
                ))
            }
            OsKind::Linux => {
                let Some(manager) = host.package_manager else {
                    tracing::warn!(package = %self.name, "No supported package manager found");
                    return Ok(InstallReport::manual(
                        self.messages.installation_instructions.clone(),
                    ));
                };

                let Some(commands) = self.commands.installation.get(manager.command()) else {
                    // No recipe for this manager, all we can do is instruct
                    return Ok(InstallReport::manual(
                        self.messages.installation_instructions.clone(),
                    ));
                };

                let mut actions = Vec::new();
                for command in commands {
                    if !shell_run(command).await? {
                        return Ok(InstallReport::failure(vec![format!(
                            "Command failed: {command}"
                        )]));
                    }
                    actions.push(command.clone());
                }

                Ok(InstallReport::success(actions))
            }
        }
    }
}
