// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Configuration loading and rule management.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;

use crate::rules::{RuleConfigEngine, RULES};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub rules: HashMap<String, toml::Value>,
}

impl Config {
    /// Load configuration from a TOML file and return the config along with the rule engine.
    /// TOML format: one `[rules.<rule>]` table per rule, e.g.:
    ///
    /// [rules.directive_unrecognized_name]
    /// enabled = true
    /// severity = "warn"
    /// allowed = ["x-custom"]
    pub fn load_from_path<P: AsRef<std::path::Path>>(
        path: P,
    ) -> anyhow::Result<(Self, RuleConfigEngine)> {
        let path_ref = path.as_ref();
        let s = std::fs::read_to_string(path_ref)
            .with_context(|| format!("failed to read config {}", path_ref.display()))?;
        Self::from_toml_str(&s)
    }

    /// Parse configuration text and validate every configured rule.
    pub fn from_toml_str(s: &str) -> anyhow::Result<(Self, RuleConfigEngine)> {
        let cfg: Self = toml::from_str(s)?;
        let engine = crate::rules::validate_rules(&cfg)?;
        Ok((cfg, engine))
    }

    /// Every rule enabled at its default severity.
    pub fn enable_all() -> Self {
        let mut cfg = Self::default();
        for rule in RULES {
            let mut table = toml::map::Map::new();
            table.insert("enabled".to_string(), toml::Value::Boolean(true));
            table.insert(
                "severity".to_string(),
                toml::Value::String(rule.default_severity().as_str().to_string()),
            );
            cfg.rules
                .insert(rule.id().to_string(), toml::Value::Table(table));
        }
        cfg
    }

    /// Returns true if the rule is enabled.
    ///
    /// Rules are disabled by default. A rule is enabled only when there is a
    /// TOML table under `[rules.<rule>]` that contains `enabled = true`.
    pub fn is_enabled(&self, rule: &str) -> bool {
        match self.rules.get(rule) {
            Some(toml::Value::Table(table)) => {
                matches!(table.get("enabled"), Some(toml::Value::Boolean(true)))
            }
            _ => false,
        }
    }

    /// Gets the configuration value for a rule.
    pub fn get_rule_config(&self, rule: &str) -> Option<&toml::Value> {
        self.rules.get(rule)
    }
}
