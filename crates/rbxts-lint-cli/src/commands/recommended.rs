//! Recommended command implementation.
//!
//! Prints the recommended preset either as an ESLint-style `rules` object or
//! as the `[rules]` tables of an `rbxts-lint.toml`.

use anyhow::Result;
use rbxts_lint_core::RuleConfig;
use rbxts_lint_rules::{Plugin, RuleLevel};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::PresetFormat;

#[derive(Serialize)]
struct EslintConfig<'a> {
    plugins: [&'static str; 1],
    rules: &'a BTreeMap<String, RuleLevel>,
}

#[derive(Serialize)]
struct TomlRules {
    rules: BTreeMap<String, RuleConfig>,
}

fn rule_config(level: RuleLevel) -> RuleConfig {
    RuleConfig {
        enabled: Some(level != RuleLevel::Off),
        severity: level.severity(),
    }
}

/// Renders the recommended preset.
fn render(format: PresetFormat) -> Result<String> {
    let plugin = Plugin::roblox_ts()?;
    let recommended = plugin.recommended();
    let rendered = match format {
        PresetFormat::Json => serde_json::to_string_pretty(&EslintConfig {
            plugins: ["roblox-ts"],
            rules: recommended,
        })?,
        PresetFormat::Toml => toml::to_string(&TomlRules {
            rules: recommended
                .iter()
                .map(|(name, level)| (name.clone(), rule_config(*level)))
                .collect(),
        })?,
    };
    Ok(rendered)
}

/// Runs the recommended command.
pub fn run(format: PresetFormat) -> Result<()> {
    println!("{}", render(format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rbxts_lint_core::{Config, Severity};

    #[test]
    fn json_lists_every_rule_with_prefix() {
        let rendered = render(PresetFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(json["plugins"][0], "roblox-ts");
        let rules = json["rules"].as_object().unwrap();
        assert_eq!(rules.len(), 23);
        assert_eq!(rules["roblox-ts/lua-truthiness"], "warn");
        assert_eq!(rules["roblox-ts/no-null"], "error");
    }

    #[test]
    fn toml_output_loads_as_config() {
        let config = Config::parse(&render(PresetFormat::Toml).unwrap()).unwrap();
        assert_eq!(config.rules.len(), 23);
        assert_eq!(config.rule_severity("lua-truthiness"), Some(Severity::Warning));
        assert_eq!(config.rule_severity("no-any"), Some(Severity::Error));
        assert!(config.is_rule_enabled("no-array-pairs"));
    }
}
