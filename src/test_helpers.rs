// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Shared test utilities to reduce duplication across test modules.

use crate::config::Config;
use crate::lint::Severity;
use crate::policy::Policy;
use crate::rules::{RuleConfig, RuleConfigEngine};

fn rule_table(enabled: bool) -> toml::Value {
    let mut table = toml::map::Map::new();
    table.insert("enabled".to_string(), toml::Value::Boolean(enabled));
    table.insert(
        "severity".to_string(),
        toml::Value::String("warn".to_string()),
    );
    toml::Value::Table(table)
}

/// Enable `rule` with severity "warn".
pub fn enable_rule(cfg: &mut Config, rule: &str) {
    cfg.rules.insert(rule.to_string(), rule_table(true));
}

pub fn disable_rule(cfg: &mut Config, rule: &str) {
    cfg.rules.insert(rule.to_string(), rule_table(false));
}

pub fn make_test_config_with_enabled_rules(rules: &[&str]) -> Config {
    let mut cfg = Config::default();
    for rule in rules {
        enable_rule(&mut cfg, rule);
    }
    cfg
}

pub fn make_test_engine(cfg: &Config) -> RuleConfigEngine {
    crate::rules::validate_rules(cfg).expect("valid test configuration")
}

pub fn make_test_rule_config() -> RuleConfig {
    RuleConfig {
        severity: Severity::Warn,
    }
}

/// Parse a policy that is known to be well-formed.
pub fn policy(text: &str) -> Policy {
    crate::parse::parse_policy(text).expect("valid test policy")
}
