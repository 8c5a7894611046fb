//! Rule presets for common configurations.

use crate::plugin::{Plugin, PluginError, RuleLevel};
use rbxts_lint_core::RuleBox;

/// Recommended level of each rule, by unprefixed name.
pub(crate) const RECOMMENDED: &[(&str, RuleLevel)] = &[
    ("no-any", RuleLevel::Error),
    ("misleading-luatuple-checks", RuleLevel::Warn),
    ("lua-truthiness", RuleLevel::Warn),
    ("no-object-math", RuleLevel::Error),
    ("restrict-comparisons", RuleLevel::Error),
    ("no-array-pairs", RuleLevel::Warn),
    ("no-null", RuleLevel::Error),
    ("no-for-in", RuleLevel::Error),
    ("no-delete", RuleLevel::Error),
    ("no-value-typeof", RuleLevel::Error),
    ("no-global-this", RuleLevel::Error),
    ("no-prototype", RuleLevel::Error),
    ("no-regex", RuleLevel::Error),
    ("no-rbx-postfix-new", RuleLevel::Error),
    ("module", RuleLevel::Error),
    ("no-getters-or-setters", RuleLevel::Error),
    ("no-spread-destructuring", RuleLevel::Error),
    ("no-preceding-spread-element", RuleLevel::Error),
    ("no-private-identifier", RuleLevel::Error),
    ("no-function-expression-id", RuleLevel::Error),
    ("no-namespace-merging", RuleLevel::Error),
    ("no-enum-merging", RuleLevel::Error),
    ("no-export-assignment-let", RuleLevel::Error),
];

/// Preset configurations for rbxts-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// The recommended preset, at its recommended levels.
    Recommended,
    /// Every rule at its default severity.
    All,
}

impl Preset {
    /// Returns the rules for this preset, taken from the validated
    /// [`Plugin::roblox_ts`] table.
    ///
    /// # Errors
    ///
    /// Returns a [`PluginError`] if the built-in table is inconsistent.
    pub fn rules(self) -> Result<Vec<RuleBox>, PluginError> {
        let plugin = Plugin::roblox_ts()?;
        Ok(match self {
            Self::Recommended => plugin.into_recommended_rules(),
            Self::All => plugin.into_rules(),
        })
    }

    /// Parses a preset name as written in configuration files.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "recommended" => Some(Self::Recommended),
            "all" => Some(Self::All),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rbxts_lint_core::Severity;

    #[test]
    fn test_preset_rules() {
        let all = Preset::All.rules().expect("all");
        assert_eq!(all.len(), RECOMMENDED.len());
        let recommended = Preset::Recommended.rules().expect("recommended");
        assert_eq!(recommended.len(), RECOMMENDED.len());
    }

    #[test]
    fn test_recommended_levels_become_severities() {
        let rules = Preset::Recommended.rules().expect("recommended");
        let severity = |name: &str| {
            rules
                .iter()
                .find(|r| r.name() == name)
                .map(|r| r.default_severity())
        };
        assert_eq!(severity("lua-truthiness"), Some(Severity::Warning));
        assert_eq!(severity("no-array-pairs"), Some(Severity::Warning));
        assert_eq!(severity("no-null"), Some(Severity::Error));
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(Preset::from_name("recommended"), Some(Preset::Recommended));
        assert_eq!(Preset::from_name("strict"), None);
    }
}
