//! Derivation rules for computed settings defaults
//!
//! After the sources are folded, a fixed battery of rules fills in values
//! the user left out: host name, webserver host, a deterministic pseudo-IP,
//! the VM name, and the PHP/PECL extension lists. The battery is an
//! explicit ordered list registered at engine construction; ordering is
//! part of the contract because later rules read paths earlier rules
//! populate.
//!
//! Default-filling rules are guarded only-if-absent and never overwrite a
//! value a source already set. A rule whose inputs are missing no-ops;
//! it never aborts the rest of the battery.

use crate::tree::Settings;
use serde_json::Value;

/// Seed for the project-name checksum behind the derived IP.
const IP_CHECKSUM_SEED: u64 = 250;

/// First entry of every derived PHP extension list.
const EXTENSION_BOOTSTRAP: &str = "php-pear";

/// Package prefix for enabled PHP extensions.
const EXTENSION_PREFIX: &str = "php5-";

/// A single named derivation step.
pub struct DerivationRule {
    name: &'static str,
    apply: fn(&mut Settings),
}

impl DerivationRule {
    /// The rule's name, used for logging.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// The ordered battery of derivation rules.
///
/// Construct with [`DerivationEngine::standard`] and run it exactly once
/// per resolution: the extension-list rules transform their target in
/// place and are not idempotent against their own output.
pub struct DerivationEngine {
    rules: Vec<DerivationRule>,
}

impl DerivationEngine {
    /// The standard rule battery, in dependency order.
    pub fn standard() -> Self {
        Self {
            rules: vec![
                DerivationRule {
                    name: "network-host-name",
                    apply: host_name_default,
                },
                // reads network.host.name, so it must follow the rule above
                DerivationRule {
                    name: "webserver-host",
                    apply: webserver_host_default,
                },
                DerivationRule {
                    name: "network-ip",
                    apply: network_ip_default,
                },
                DerivationRule {
                    name: "vm-name",
                    apply: vm_name_default,
                },
                DerivationRule {
                    name: "php-extension-list",
                    apply: php_extension_list,
                },
                DerivationRule {
                    name: "pecl-extension-list",
                    apply: pecl_extension_list,
                },
            ],
        }
    }

    /// Apply every rule, in order.
    pub fn run(&self, settings: &mut Settings) {
        for rule in &self.rules {
            (rule.apply)(settings);
            tracing::debug!(rule = rule.name, "Applied derivation rule");
        }
    }

    /// The registered rules, in execution order.
    pub fn rules(&self) -> &[DerivationRule] {
        &self.rules
    }
}

/// Default the host name to the project name.
fn host_name_default(settings: &mut Settings) {
    if settings.get("network.host.name").is_some() {
        return;
    }
    let Some(project) = settings.get("project.name").cloned() else {
        return;
    };
    settings.set("network.host.name", project);
}

/// Default the webserver host to `<prefix>.<host name>`.
fn webserver_host_default(settings: &mut Settings) {
    if settings.get("webserver.host").is_some() {
        return;
    }
    let host = match (
        settings.get_str("network.host.prefix"),
        settings.get_str("network.host.name"),
    ) {
        (Some(prefix), Some(name)) => format!("{prefix}.{name}"),
        _ => return,
    };
    settings.set("webserver.host", Value::String(host));
}

/// Default the IP to a deterministic function of the project name.
///
/// Same project name, same IP, always: repeated runs for one project must
/// never land on a different derived address. Octets are clamped into
/// 1..=255 so neither can degenerate to 0.
fn network_ip_default(settings: &mut Settings) {
    if settings.get("network.ip").is_some() {
        return;
    }
    let Some(project) = settings.get_str("project.name") else {
        return;
    };

    let sum = project
        .chars()
        .fold(IP_CHECKSUM_SEED, |acc, ch| acc + ch as u64);
    let octet1 = (sum & 0xff).clamp(1, 255);
    let octet2 = ((sum * 2) & 0xff).clamp(1, 255);

    settings.set(
        "network.ip",
        Value::String(format!("192.168.{octet1}.{octet2}")),
    );
}

/// Default the VM name to `<box name, slashes dashed>-<project name>`.
///
/// The VM name keys the virtual machine, so two projects sharing a box
/// must still get distinct names.
fn vm_name_default(settings: &mut Settings) {
    if settings.get("vm.name").is_some() {
        return;
    }
    let name = match (
        settings.get_str("vm.box.name"),
        settings.get_str("project.name"),
    ) {
        (Some(box_name), Some(project)) => {
            format!("{}-{}", box_name.replace('/', "-"), project)
        }
        _ => return,
    };
    settings.set("vm.name", Value::String(name));
}

/// Rewrite the `php.extensions` toggle mapping as an install list.
///
/// Always runs: it transforms rather than defaults. The list opens with
/// the bootstrap package, then one prefixed entry per toggle that is not
/// `false`, in mapping order.
fn php_extension_list(settings: &mut Settings) {
    let Some(Value::Object(toggles)) = settings.get("php.extensions") else {
        return;
    };

    let mut list = vec![Value::String(EXTENSION_BOOTSTRAP.to_string())];
    for (name, value) in toggles {
        if value == &Value::Bool(false) {
            continue;
        }
        list.push(Value::String(format!("{EXTENSION_PREFIX}{name}")));
    }

    settings.set("php.extensions", Value::Array(list));
}

/// Rewrite the `php.pecl_extensions` toggle mapping as an install list.
///
/// Same shape as the rule above, without the bootstrap entry and without
/// prefixing: PECL packages install under their own names.
fn pecl_extension_list(settings: &mut Settings) {
    let Some(Value::Object(toggles)) = settings.get("php.pecl_extensions") else {
        return;
    };

    let mut list = Vec::new();
    for (name, value) in toggles {
        if value == &Value::Bool(false) {
            continue;
        }
        list.push(Value::String(name.clone()));
    }

    settings.set("php.pecl_extensions", Value::Array(list));
}
