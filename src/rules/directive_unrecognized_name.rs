// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use std::sync::Arc;

use crate::directive::Directive;
use crate::lint::{Severity, Violation};
use crate::rules::Rule;

pub struct DirectiveUnrecognizedName;

#[derive(Debug, Clone)]
pub struct UnrecognizedNameConfig {
    pub severity: Severity,
    /// Lowercased names that are known to the deployment and not reported.
    pub allowed: Vec<String>,
}

fn parse_unrecognized_name_config(
    config: &crate::config::Config,
    rule_id: &str,
) -> anyhow::Result<UnrecognizedNameConfig> {
    let common = crate::rules::parse_rule_config(config, rule_id)?;

    let mut allowed = Vec::new();
    let table = config.get_rule_config(rule_id).and_then(toml::Value::as_table);
    if let Some(value) = table.and_then(|t| t.get("allowed")) {
        let arr = value
            .as_array()
            .ok_or_else(|| anyhow::anyhow!("'allowed' must be an array of directive names"))?;
        for (idx, item) in arr.iter().enumerate() {
            let s = item.as_str().ok_or_else(|| {
                anyhow::anyhow!("'allowed' item at index {} is not a string", idx)
            })?;
            allowed.push(s.to_ascii_lowercase());
        }
    }

    Ok(UnrecognizedNameConfig {
        severity: common.severity,
        allowed,
    })
}

impl Rule for DirectiveUnrecognizedName {
    type Config = UnrecognizedNameConfig;

    fn id(&self) -> &'static str {
        "directive_unrecognized_name"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warn
    }

    fn validate_and_box(
        &self,
        config: &crate::config::Config,
    ) -> anyhow::Result<Arc<dyn std::any::Any + Send + Sync>> {
        let parsed = parse_unrecognized_name_config(config, self.id())?;
        Ok(Arc::new(parsed))
    }

    fn check_directive(&self, directive: &Directive, config: &Self::Config) -> Option<Violation> {
        if directive.is_recognized() {
            return None;
        }
        let name = directive.name().to_ascii_lowercase();
        if config.allowed.contains(&name) {
            return None;
        }
        Some(Violation {
            rule: self.id().into(),
            severity: config.severity,
            message: format!("Unrecognized directive '{}'", directive.name()),
        })
    }
}
