//! ProvisionTask trait and related types

use crate::host::HostEnv;
use crate::{Error, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// Status of a task after checking the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Already satisfied, nothing to do
    Present,
    /// Not on the host, installation needed
    Missing,
    /// Not applicable to this host
    Skipped,
}

/// Report from checking a task
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub status: TaskStatus,
    pub details: Vec<String>,
}

impl CheckReport {
    pub fn present() -> Self {
        Self {
            status: TaskStatus::Present,
            details: vec![],
        }
    }

    pub fn missing(detail: impl Into<String>) -> Self {
        Self {
            status: TaskStatus::Missing,
            details: vec![detail.into()],
        }
    }

    pub fn skipped(detail: impl Into<String>) -> Self {
        Self {
            status: TaskStatus::Skipped,
            details: vec![detail.into()],
        }
    }
}

/// Report from installing a task
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub success: bool,
    pub actions_taken: Vec<String>,
    pub errors: Vec<String>,
}

impl InstallReport {
    pub fn success(actions: Vec<String>) -> Self {
        Self {
            success: true,
            actions_taken: actions,
            errors: vec![],
        }
    }

    pub fn noop() -> Self {
        Self {
            success: true,
            actions_taken: vec![],
            errors: vec![],
        }
    }

    pub fn failure(errors: Vec<String>) -> Self {
        Self {
            success: false,
            actions_taken: vec![],
            errors,
        }
    }

    /// The host cannot install this automatically; the user gets
    /// instructions instead.
    pub fn manual(instructions: impl Into<String>) -> Self {
        Self {
            success: false,
            actions_taken: vec![],
            errors: vec![instructions.into()],
        }
    }
}

/// Core trait for installable provisioning tasks
#[async_trait]
pub trait ProvisionTask: Send + Sync {
    fn name(&self) -> &str;
    async fn check(&self, host: &HostEnv) -> Result<CheckReport>;
    async fn install(&self, host: &HostEnv) -> Result<InstallReport>;
}

/// Run a shell command and capture its stdout.
pub(crate) async fn shell_output(command: &str) -> Result<String> {
    let output = Command::new("sh")
        .args(["-c", command])
        .stderr(Stdio::null())
        .output()
        .await
        .map_err(|_| Error::CommandSpawn {
            command: command.to_string(),
        })?;

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Run a shell command for its exit status.
pub(crate) async fn shell_run(command: &str) -> Result<bool> {
    let status = Command::new("sh")
        .args(["-c", command])
        .status()
        .await
        .map_err(|_| Error::CommandSpawn {
            command: command.to_string(),
        })?;

    Ok(status.success())
}
