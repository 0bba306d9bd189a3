//! Tool plugins described by resolved configuration
//!
//! Plugins extend the virtualization tool itself rather than the host
//! system. Each one declares which platforms it applies to; anything else
//! is skipped, as is a plugin that is already installed.

use crate::host::{HostEnv, OsKind};
use crate::task::{CheckReport, InstallReport, ProvisionTask, shell_output, shell_run};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// A plugin for the virtualization tool.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolPlugin {
    pub name: String,
    /// Platforms the plugin applies to: "all" or OS names. A single bare
    /// string is accepted and treated as a one-element list.
    #[serde(default = "Platforms::all")]
    pub platforms: Platforms,
    pub commands: PluginCommands,
}

/// One platform name or a list of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Platforms {
    One(String),
    Many(Vec<String>),
}

impl Platforms {
    fn all() -> Self {
        Platforms::One("all".to_string())
    }

    /// Whether the plugin applies to the given OS.
    pub fn matches(&self, os: OsKind) -> bool {
        let names: &[String] = match self {
            Platforms::One(name) => std::slice::from_ref(name),
            Platforms::Many(names) => names,
        };
        names.iter().any(|name| name == "all" || name == os.as_str())
    }
}

/// Commands for probing and installing a plugin.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginCommands {
    /// Shell command whose non-empty output means the plugin is installed.
    pub check_presence: String,
    #[serde(default)]
    pub installation: Vec<String>,
}

impl ToolPlugin {
    /// Deserialize a plugin description from a resolved settings value.
    pub fn from_value(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone()).map_err(|e| Error::InvalidTask {
            kind: "plugin".into(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ProvisionTask for ToolPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self, host: &HostEnv) -> Result<CheckReport> {
        if !self.platforms.matches(host.os) {
            return Ok(CheckReport::skipped(format!(
                "{} does not apply to {}",
                self.name,
                host.os.as_str()
            )));
        }

        let output = shell_output(&self.commands.check_presence).await?;
        if output.trim().is_empty() {
            Ok(CheckReport::missing(format!("{} not installed", self.name)))
        } else {
            Ok(CheckReport::present())
        }
    }

    async fn install(&self, host: &HostEnv) -> Result<InstallReport> {
        if !self.platforms.matches(host.os) {
            tracing::debug!(plugin = %self.name, os = host.os.as_str(), "Platform mismatch — skipping");
            return Ok(InstallReport::noop());
        }

        let mut actions = Vec::new();
        for command in &self.commands.installation {
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
