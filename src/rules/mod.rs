// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Lint rules over parsed or constructed policies.
//!
//! Each rule is configured under `[rules.<id>]` and only runs when
//! `enabled = true`. Rule configuration is parsed once, when the
//! [`RuleConfigEngine`] is built, and handed to every check.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::Config;
use crate::directive::Directive;
use crate::lint::{Severity, Violation};
use crate::policy::Policy;

/// Configuration for rules that have no options beyond the common ones.
///
/// Whether a rule runs is decided by [`Config::is_enabled`].
#[derive(Debug, Clone)]
pub struct RuleConfig {
    pub severity: Severity,
}

pub trait Rule: Send + Sync {
    /// Parsed configuration handed to the checks.
    type Config: Send + Sync + 'static;

    fn id(&self) -> &'static str;

    /// Severity written by [`Config::enable_all`].
    fn default_severity(&self) -> Severity;

    /// Parse and validate the rule's configuration. Called once, when the
    /// engine is built. Rules with their own options override this.
    fn validate_and_box(&self, config: &Config) -> anyhow::Result<Arc<dyn Any + Send + Sync>> {
        Ok(Arc::new(parse_rule_config(config, self.id())?))
    }

    fn check_directive(&self, _directive: &Directive, _config: &Self::Config) -> Option<Violation> {
        None
    }

    /// Defaults to running [`Rule::check_directive`] on every directive.
    fn check_policy(&self, policy: &Policy, config: &Self::Config) -> Vec<Violation> {
        policy
            .iter()
            .filter_map(|d| self.check_directive(d, config))
            .collect()
    }
}

/// Object-safe view of [`Rule`], used by the [`RULES`] table.
pub trait RuleErased: Send + Sync {
    fn id(&self) -> &'static str;
    fn default_severity(&self) -> Severity;
    fn validate_and_box(&self, config: &Config) -> anyhow::Result<Arc<dyn Any + Send + Sync>>;
    fn check_policy_erased(&self, policy: &Policy, engine: &RuleConfigEngine) -> Vec<Violation>;
}

impl<R: Rule> RuleErased for R {
    fn id(&self) -> &'static str {
        Rule::id(self)
    }

    fn default_severity(&self) -> Severity {
        Rule::default_severity(self)
    }

    fn validate_and_box(&self, config: &Config) -> anyhow::Result<Arc<dyn Any + Send + Sync>> {
        Rule::validate_and_box(self, config)
    }

    fn check_policy_erased(&self, policy: &Policy, engine: &RuleConfigEngine) -> Vec<Violation> {
        match engine.get_cached::<R::Config>(Rule::id(self)) {
            Some(config) => self.check_policy(policy, &config),
            None => {
                tracing::trace!(rule = Rule::id(self), "no cached configuration; skipping");
                Vec::new()
            }
        }
    }
}

/// Parsed configuration of every enabled rule, keyed by rule id.
#[derive(Debug, Default)]
pub struct RuleConfigEngine {
    cache: HashMap<&'static str, Arc<dyn Any + Send + Sync>>,
}

impl RuleConfigEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the configuration of every enabled rule and keep the results.
    pub fn validate_and_cache_all(&mut self, config: &Config) -> anyhow::Result<()> {
        for rule in RULES {
            if !config.is_enabled(rule.id()) {
                continue;
            }
            let parsed = rule.validate_and_box(config).map_err(|e| {
                anyhow::anyhow!("Invalid configuration for rule '{}': {}", rule.id(), e)
            })?;
            self.cache.insert(rule.id(), parsed);
        }
        Ok(())
    }

    /// The cached configuration of `rule_id`, if it is enabled and of type `T`.
    pub fn get_cached<T: Send + Sync + 'static>(&self, rule_id: &str) -> Option<Arc<T>> {
        let boxed = self.cache.get(rule_id)?.clone();
        boxed.downcast::<T>().ok()
    }

    pub fn is_cached(&self, rule_id: &str) -> bool {
        self.cache.contains_key(rule_id)
    }
}

fn rule_table<'a>(config: &'a Config, rule_id: &str) -> anyhow::Result<&'a toml::value::Table> {
    config
        .get_rule_config(rule_id)
        .and_then(toml::Value::as_table)
        .ok_or_else(|| anyhow::anyhow!("Configuration for rule '{}' must be a TOML table", rule_id))
}

/// Read the mandatory `severity` key of a rule table.
pub fn get_rule_severity_required(config: &Config, rule_id: &str) -> anyhow::Result<Severity> {
    let table = rule_table(config, rule_id)?;
    let value = table.get("severity").ok_or_else(|| {
        anyhow::anyhow!(
            "Missing required 'severity' for rule '{}'. Example: severity = \"warn\"",
            rule_id
        )
    })?;
    match value.as_str() {
        Some("info") => Ok(Severity::Info),
        Some("warn") => Ok(Severity::Warn),
        Some("error") => Ok(Severity::Error),
        _ => Err(anyhow::anyhow!(
            "Invalid 'severity' for rule '{}': must be one of \"info\", \"warn\", \"error\"",
            rule_id
        )),
    }
}

/// Read the mandatory `enabled` key of a rule table.
pub fn get_rule_enabled_required(config: &Config, rule_id: &str) -> anyhow::Result<bool> {
    let table = rule_table(config, rule_id)?;
    let value = table.get("enabled").ok_or_else(|| {
        anyhow::anyhow!(
            "Missing required 'enabled' for rule '{}'. Example: enabled = true",
            rule_id
        )
    })?;
    value
        .as_bool()
        .ok_or_else(|| anyhow::anyhow!("Invalid 'enabled' for rule '{}': must be a boolean", rule_id))
}

/// Check the common `enabled`/`severity` pair and keep the severity.
pub fn parse_rule_config(config: &Config, rule_id: &str) -> anyhow::Result<RuleConfig> {
    get_rule_enabled_required(config, rule_id)?;
    Ok(RuleConfig {
        severity: get_rule_severity_required(config, rule_id)?,
    })
}

/// Check every configured rule table and build the engine.
///
/// Tables for unknown rule ids are checked too, then ignored.
pub fn validate_rules(config: &Config) -> anyhow::Result<RuleConfigEngine> {
    let mut ids: Vec<&String> = config.rules.keys().collect();
    ids.sort();
    for id in ids {
        get_rule_enabled_required(config, id)?;
        get_rule_severity_required(config, id)?;
        if !RULES.iter().any(|r| r.id() == id.as_str()) {
            tracing::warn!(rule = %id, "ignoring configuration for unknown rule");
        }
    }
    let mut engine = RuleConfigEngine::new();
    engine.validate_and_cache_all(config)?;
    Ok(engine)
}

pub mod directive_illegal_value;
pub mod directive_name_syntax;
pub mod directive_single_value_arity;
pub mod directive_unrecognized_name;
pub mod directive_unrecognized_value;
pub mod policy_duplicate_directive;

pub const RULES: &[&dyn RuleErased] = &[
    &directive_single_value_arity::DirectiveSingleValueArity,
    &directive_unrecognized_name::DirectiveUnrecognizedName,
    &directive_name_syntax::DirectiveNameSyntax,
    &directive_unrecognized_value::DirectiveUnrecognizedValue,
    &directive_illegal_value::DirectiveIllegalValue,
    &policy_duplicate_directive::PolicyDuplicateDirective,
];
