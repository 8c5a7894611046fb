//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# rbxts-lint configuration

# Preset to start from: "recommended" (default) or "all"
preset = "recommended"

# Lowest severity that makes `rbxts-lint check` exit with status 1
# fail_on = "error"

# Rule configurations
# Keys may be written with or without the "roblox-ts/" prefix.
# Each rule can be enabled/disabled and have its severity overridden.

[rules.lua-truthiness]
enabled = true
# severity = "error"  # Override default severity

[rules.restrict-comparisons]
enabled = true

# [rules.no-array-pairs]
# enabled = false
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new("rbxts-lint.toml"), force)?;

    println!("Created rbxts-lint.toml");
    println!("\nNext steps:");
    println!("  1. Edit rbxts-lint.toml to configure rules");
    println!("  2. Dump host snapshots for your project");
    println!("  3. Run: rbxts-lint check <snapshot-dir>");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;
    Ok(())
}
