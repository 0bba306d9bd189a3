//! The installation queue
//!
//! Collects packages and plugins, usually straight from the resolved
//! settings tree, and runs them sequentially against the detected host.
//! One task failing is recorded in its outcome and never aborts the rest
//! of the queue.

use crate::host::HostEnv;
use crate::package::SystemPackage;
use crate::plugin::ToolPlugin;
use crate::task::{InstallReport, ProvisionTask, TaskStatus};
use crate::Result;
use devenv_config::Settings;
use serde_json::Value;

/// Settings path holding system package descriptions.
pub const PACKAGES_PATH: &str = "provision.packages";

/// Settings path holding tool plugin descriptions.
pub const PLUGINS_PATH: &str = "provision.plugins";

/// Outcome of one queued task.
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    pub task: String,
    pub report: InstallReport,
}

/// Sequential installer over queued packages and plugins.
pub struct Installer {
    host: HostEnv,
    packages: Vec<SystemPackage>,
    plugins: Vec<ToolPlugin>,
}

impl Installer {
    /// Create an empty installer for the given host.
    pub fn new(host: HostEnv) -> Self {
        Self {
            host,
            packages: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Queue a single package.
    pub fn add_package(&mut self, package: SystemPackage) {
        self.packages.push(package);
    }

    /// Queue several packages at once.
    pub fn add_packages(&mut self, packages: impl IntoIterator<Item = SystemPackage>) {
        self.packages.extend(packages);
    }

    /// Queue a single plugin.
    pub fn add_plugin(&mut self, plugin: ToolPlugin) {
        self.plugins.push(plugin);
    }

    /// Queue several plugins at once.
    pub fn add_plugins(&mut self, plugins: impl IntoIterator<Item = ToolPlugin>) {
        self.plugins.extend(plugins);
    }

    /// Queue every package and plugin described in the resolved settings.
    ///
    /// Absent paths contribute nothing; a description that does not
    /// deserialize is an error.
    pub fn queue_from_settings(&mut self, settings: &Settings) -> Result<()> {
        if let Some(Value::Array(items)) = settings.get(PACKAGES_PATH) {
            for item in items {
                self.packages.push(SystemPackage::from_value(item)?);
            }
        }
        if let Some(Value::Array(items)) = settings.get(PLUGINS_PATH) {
            for item in items {
                self.plugins.push(ToolPlugin::from_value(item)?);
            }
        }
        Ok(())
    }

    /// Number of queued tasks.
    pub fn queued(&self) -> usize {
        self.packages.len() + self.plugins.len()
    }

    /// Run every queued task in order: packages first, then plugins.
    ///
    /// Each task is checked first and installed only when missing. A task
    /// whose commands cannot even spawn is recorded as a failed outcome;
    /// the queue keeps going either way.
    pub async fn install_all(&self) -> Vec<TaskOutcome> {
        let mut outcomes = Vec::with_capacity(self.queued());
        for task in self.tasks() {
            let report = self.run_task(task).await;
            outcomes.push(TaskOutcome {
                task: task.name().to_string(),
                report,
            });
        }
        outcomes
    }

    async fn run_task(&self, task: &dyn ProvisionTask) -> InstallReport {
        let check = match task.check(&self.host).await {
            Ok(check) => check,
            Err(e) => return InstallReport::failure(vec![e.to_string()]),
        };

        match check.status {
            TaskStatus::Present | TaskStatus::Skipped => InstallReport::noop(),
            TaskStatus::Missing => {
                for detail in &check.details {
                    if !detail.is_empty() {
                        tracing::info!(task = task.name(), "{detail}");
                    }
                }
                match task.install(&self.host).await {
                    Ok(report) => report,
                    Err(e) => InstallReport::failure(vec![e.to_string()]),
                }
            }
        }
    }

    fn tasks(&self) -> impl Iterator<Item = &dyn ProvisionTask> {
        self.packages
            .iter()
            .map(|p| p as &dyn ProvisionTask)
            .chain(self.plugins.iter().map(|p| p as &dyn ProvisionTask))
    }
}
