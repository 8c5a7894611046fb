//! The validated rule table and its recommended configuration.
//!
//! A [`Plugin`] is assembled once through [`PluginBuilder`]. Assembly checks
//! that every table key matches the rule's declared name, that keys are
//! unique, and that the recommended preset only names rules in the table.
//! Any mismatch is a [`PluginError`]; nothing is dropped silently.

use crate::presets::RECOMMENDED;
use crate::{
    lua_truthiness, misleading_luatuple_checks, module, no_any, no_array_pairs, no_delete,
    no_enum_merging, no_export_assignment_let, no_for_in, no_function_expression_id,
    no_getters_or_setters, no_global_this, no_namespace_merging, no_null, no_object_math,
    no_preceding_spread_element, no_private_identifier, no_prototype, no_rbx_postfix_new,
    no_regex, no_spread_destructuring, no_value_typeof, restrict_comparisons,
};
use crate::{
    LuaTruthiness, MisleadingLuaTupleChecks, Module, NoAny, NoArrayPairs, NoDelete, NoEnumMerging,
    NoExportAssignmentLet, NoForIn, NoFunctionExpressionId, NoGettersOrSetters, NoGlobalThis,
    NoNamespaceMerging, NoNull, NoObjectMath, NoPrecedingSpreadElement, NoPrivateIdentifier,
    NoPrototype, NoRbxPostfixNew, NoRegex, NoSpreadDestructuring, NoValueTypeof,
    RestrictComparisons,
};
use miette::Diagnostic;
use rbxts_lint_core::{
    FileContext, LintError, NodeVisitor, Rule, RuleBox, Severity, RULE_PREFIX,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use thiserror::Error;

/// Severity a preset assigns to a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLevel {
    /// Report as an error.
    Error,
    /// Report as a warning.
    Warn,
    /// Do not run.
    Off,
}

impl RuleLevel {
    /// Violation severity for this level, `None` when off.
    #[must_use]
    pub fn severity(self) -> Option<Severity> {
        match self {
            Self::Error => Some(Severity::Error),
            Self::Warn => Some(Severity::Warning),
            Self::Off => None,
        }
    }
}

impl fmt::Display for RuleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Off => write!(f, "off"),
        }
    }
}

/// Errors detected while assembling a [`Plugin`].
#[derive(Debug, Error, Diagnostic)]
pub enum PluginError {
    /// A table key differs from the rule's own name.
    #[error("rule registered as '{key}' declares the name '{name}'")]
    #[diagnostic(
        code(rbxts_lint::plugin::name_mismatch),
        help("register the rule under the name it declares")
    )]
    NameMismatch {
        /// Key the rule was registered under.
        key: String,
        /// Name the rule declares.
        name: String,
    },

    /// The same key was registered twice.
    #[error("rule '{key}' is registered more than once")]
    #[diagnostic(code(rbxts_lint::plugin::duplicate_rule))]
    DuplicateRule {
        /// Duplicated key.
        key: String,
    },

    /// A preset entry names a rule missing from the table.
    #[error("recommended preset references unknown rule '{name}'")]
    #[diagnostic(code(rbxts_lint::plugin::unknown_preset_rule))]
    UnknownPresetRule {
        /// The unknown rule name.
        name: String,
    },
}

/// Builder for [`Plugin`].
#[derive(Default)]
pub struct PluginBuilder {
    rules: Vec<(String, RuleBox)>,
    recommended: Vec<(String, RuleLevel)>,
}

impl PluginBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `rule` under `key`.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, key: impl Into<String>, rule: R) -> Self {
        self.rules.push((key.into(), Box::new(rule)));
        self
    }

    /// Adds a recommended preset entry for the unprefixed rule `name`.
    #[must_use]
    pub fn recommend(mut self, name: impl Into<String>, level: RuleLevel) -> Self {
        self.recommended.push((name.into(), level));
        self
    }

    /// Validates the table and builds the plugin.
    ///
    /// # Errors
    ///
    /// Returns the first [`PluginError`] found.
    pub fn build(self) -> Result<Plugin, PluginError> {
        let mut keys = HashSet::new();
        for (key, rule) in &self.rules {
            if key != rule.name() {
                return Err(PluginError::NameMismatch {
                    key: key.clone(),
                    name: rule.name().to_string(),
                });
            }
            if !keys.insert(key.as_str()) {
                return Err(PluginError::DuplicateRule { key: key.clone() });
            }
        }

        let mut recommended = BTreeMap::new();
        for (name, level) in self.recommended {
            if !keys.contains(name.as_str()) {
                return Err(PluginError::UnknownPresetRule { name });
            }
            recommended.insert(format!("{RULE_PREFIX}{name}"), level);
        }

        tracing::debug!(
            rules = self.rules.len(),
            recommended = recommended.len(),
            "plugin assembled"
        );
        Ok(Plugin {
            rules: self.rules,
            recommended,
        })
    }
}

/// A validated rule table plus its recommended configuration.
pub struct Plugin {
    rules: Vec<(String, RuleBox)>,
    recommended: BTreeMap<String, RuleLevel>,
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("rules", &self.rules.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .field("recommended", &self.recommended)
            .finish()
    }
}

impl Plugin {
    /// Starts building a plugin.
    #[must_use]
    pub fn builder() -> PluginBuilder {
        PluginBuilder::new()
    }

    /// The roblox-ts rule set with its recommended preset.
    ///
    /// # Errors
    ///
    /// Returns a [`PluginError`] if the built-in table is inconsistent.
    pub fn roblox_ts() -> Result<Self, PluginError> {
        let builder = Self::builder()
            .rule(no_any::NAME, NoAny::new())
            .rule(misleading_luatuple_checks::NAME, MisleadingLuaTupleChecks::new())
            .rule(lua_truthiness::NAME, LuaTruthiness::new())
            .rule(no_object_math::NAME, NoObjectMath::new())
            .rule(restrict_comparisons::NAME, RestrictComparisons::new())
            .rule(no_array_pairs::NAME, NoArrayPairs::new())
            .rule(no_null::NAME, NoNull::new())
            .rule(no_for_in::NAME, NoForIn::new())
            .rule(no_delete::NAME, NoDelete::new())
            .rule(no_value_typeof::NAME, NoValueTypeof::new())
            .rule(no_global_this::NAME, NoGlobalThis::new())
            .rule(no_prototype::NAME, NoPrototype::new())
            .rule(no_regex::NAME, NoRegex::new())
            .rule(no_rbx_postfix_new::NAME, NoRbxPostfixNew::new())
            .rule(module::NAME, Module::new())
            .rule(no_getters_or_setters::NAME, NoGettersOrSetters::new())
            .rule(no_spread_destructuring::NAME, NoSpreadDestructuring::new())
            .rule(no_preceding_spread_element::NAME, NoPrecedingSpreadElement::new())
            .rule(no_private_identifier::NAME, NoPrivateIdentifier::new())
            .rule(no_function_expression_id::NAME, NoFunctionExpressionId::new())
            .rule(no_namespace_merging::NAME, NoNamespaceMerging::new())
            .rule(no_enum_merging::NAME, NoEnumMerging::new())
            .rule(no_export_assignment_let::NAME, NoExportAssignmentLet::new());
        RECOMMENDED
            .iter()
            .fold(builder, |b, (name, level)| b.recommend(*name, *level))
            .build()
    }

    /// Rules in registration order.
    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|(_, rule)| rule.as_ref())
    }

    /// Looks up a rule by name.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&dyn Rule> {
        let name = name.strip_prefix(RULE_PREFIX).unwrap_or(name);
        self.rules
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, rule)| rule.as_ref())
    }

    /// The recommended preset: `"roblox-ts/<name>"` to level.
    #[must_use]
    pub fn recommended(&self) -> &BTreeMap<String, RuleLevel> {
        &self.recommended
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Consumes the plugin, yielding its rules for an analyzer.
    #[must_use]
    pub fn into_rules(self) -> Vec<RuleBox> {
        self.rules.into_iter().map(|(_, rule)| rule).collect()
    }

    /// Consumes the plugin, yielding the rules its recommended preset turns
    /// on, each reporting at the preset's level (`warn` maps to
    /// [`Severity::Warning`]).
    #[must_use]
    pub fn into_recommended_rules(self) -> Vec<RuleBox> {
        let recommended = self.recommended;
        self.rules
            .into_iter()
            .filter_map(|(key, rule)| {
                let level = recommended.get(&format!("{RULE_PREFIX}{key}"))?;
                let severity = level.severity()?;
                Some(Box::new(LeveledRule { rule, severity }) as RuleBox)
            })
            .collect()
    }
}

/// A rule reporting at a preset-assigned severity.
struct LeveledRule {
    rule: RuleBox,
    severity: Severity,
}

impl Rule for LeveledRule {
    fn name(&self) -> &'static str {
        self.rule.name()
    }

    fn code(&self) -> &'static str {
        self.rule.code()
    }

    fn description(&self) -> &'static str {
        self.rule.description()
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> Vec<(&'static str, &'static str)> {
        self.rule.messages()
    }

    fn fixable(&self) -> bool {
        self.rule.fixable()
    }

    fn requires_type_checking(&self) -> bool {
        self.rule.requires_type_checking()
    }

    fn create<'a>(&self, ctx: &FileContext<'a>) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
        self.rule.create(ctx)
    }
}
