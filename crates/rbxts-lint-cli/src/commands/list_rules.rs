//! List rules command implementation.

use anyhow::Result;
use rbxts_lint_rules::Plugin;

/// Runs the list-rules command.
pub fn run() -> Result<()> {
    let plugin = Plugin::roblox_ts()?;

    println!("Available rules:\n");
    println!("{:<8} {:<30} {:<8} Description", "Code", "Name", "Level");
    println!("{}", "-".repeat(96));

    for rule in plugin.rules() {
        let key = format!("{}{}", rbxts_lint_core::RULE_PREFIX, rule.name());
        let level = plugin
            .recommended()
            .get(&key)
            .map_or_else(|| "-".to_string(), ToString::to_string);
        let mut flags = Vec::new();
        if rule.requires_type_checking() {
            flags.push("type-aware");
        }
        if rule.fixable() {
            flags.push("fixable");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };
        println!(
            "{:<8} {:<30} {:<8} {}{}",
            rule.code(),
            key,
            level,
            rule.description(),
            flags
        );
    }

    println!("\nPresets:");
    println!("  recommended  - every rule at the level shown above (default)");
    println!("  all          - every rule at its default severity");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  rbxts-lint check --rules lua-truthiness,no-object-math");
    println!("  rbxts-lint check --rules RBX003,RBX004");

    Ok(())
}
