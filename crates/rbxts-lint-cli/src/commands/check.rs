//! Check command implementation.

use anyhow::{bail, Context, Result};
use rbxts_lint_core::{
    apply_fixes, is_snapshot_path, Analyzer, Config, HostSnapshot, RuleBox, Violation,
};
use rbxts_lint_rules::{Plugin, Preset};
use std::collections::HashSet;
use std::path::PathBuf;
use walkdir::WalkDir;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Flags of the check command.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes.
    pub rules_filter: Option<String>,
    /// Write fixed sources back to disk.
    pub fix: bool,
    /// Skip type-aware rules on untyped snapshots.
    pub skip_untyped: bool,
}

/// A snapshot together with the file it was loaded from.
pub struct LoadedSnapshot {
    /// Snapshot file on disk.
    pub file: PathBuf,
    /// Parsed snapshot.
    pub snapshot: HostSnapshot,
}

impl LoadedSnapshot {
    /// Where the snapshot's source file lives on disk.
    #[must_use]
    pub fn source_path(&self) -> PathBuf {
        match self.file.parent() {
            Some(dir) => dir.join(&self.snapshot.path),
            None => self.snapshot.path.clone(),
        }
    }
}

/// Runs the check command.
///
/// Returns `true` when the run should fail: a remaining violation meets the
/// configured `fail_on` threshold.
pub fn run(paths: &[PathBuf], options: &CheckOptions, source: &ConfigSource) -> Result<bool> {
    let config = load_config(source)?;
    let threshold = config.fail_threshold();
    let rules = select_rules(&config, options.rules_filter.as_deref())?;

    let loaded = collect_snapshots(paths)?;
    if loaded.is_empty() {
        tracing::warn!("No snapshot files found");
    }

    let analyzer = Analyzer::builder()
        .config(config)
        .rules(rules)
        .skip_untyped(options.skip_untyped)
        .build();

    tracing::info!(
        "Analyzing {} snapshots with {} rules",
        loaded.len(),
        analyzer.rule_count()
    );

    let snapshots: Vec<HostSnapshot> = loaded.iter().map(|l| l.snapshot.clone()).collect();
    let mut result = analyzer.analyze(&snapshots).context("Analysis failed")?;

    if options.fix {
        let fixed = write_fixes(&loaded, &mut result.violations)?;
        if fixed > 0 {
            tracing::info!("Applied {} fixes", fixed);
        }
    }

    super::output::print(&result, &loaded, options.format)?;

    Ok(result.has_violations_at(threshold))
}

/// Loads the resolved configuration, or defaults.
fn load_config(source: &ConfigSource) -> Result<Config> {
    match source {
        ConfigSource::Default => Ok(Config::default()),
        other => {
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
        }
    }
}

/// Picks the rules to run: the `--rules` filter if given, else the
/// configured preset (recommended by default).
fn select_rules(config: &Config, filter: Option<&str>) -> Result<Vec<RuleBox>> {
    if let Some(filter) = filter {
        let wanted: HashSet<&str> = filter
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.strip_prefix(rbxts_lint_core::RULE_PREFIX).unwrap_or(s))
            .collect();
        let rules: Vec<RuleBox> = Plugin::roblox_ts()?
            .into_rules()
            .into_iter()
            .filter(|r| wanted.contains(r.name()) || wanted.contains(r.code()))
            .collect();
        for name in &wanted {
            if !rules.iter().any(|r| r.name() == *name || r.code() == *name) {
                tracing::warn!("Unknown rule: {}", name);
            }
        }
        return Ok(rules);
    }

    match config.preset.as_deref() {
        None => Ok(Preset::Recommended.rules()?),
        Some(name) => match Preset::from_name(name) {
            Some(preset) => Ok(preset.rules()?),
            None => bail!("Unknown preset '{name}' (expected \"recommended\" or \"all\")"),
        },
    }
}

/// Expands `paths` into snapshot files; directories contribute every
/// `*.json` file below them, in path order.
fn collect_snapshots(paths: &[PathBuf]) -> Result<Vec<LoadedSnapshot>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let walker = WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e));
            for entry in walker {
                let entry = entry
                    .with_context(|| format!("Failed to read directory: {}", path.display()))?;
                if entry.file_type().is_file() && is_snapshot_path(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        } else {
            files.push(path.clone());
        }
    }

    files
        .into_iter()
        .map(|file| -> Result<LoadedSnapshot> {
            let snapshot = HostSnapshot::from_file(&file)?;
            Ok(LoadedSnapshot { file, snapshot })
        })
        .collect()
}

/// Hidden directories and `node_modules` never hold snapshots.
fn is_skipped_dir(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.') || name == "node_modules")
}

/// Applies each snapshot's fixes and writes the result next to the
/// snapshot. Violations whose fix was applied are removed from
/// `violations`; skipped ones stay reported. Returns the number of fixes
/// applied.
fn write_fixes(loaded: &[LoadedSnapshot], violations: &mut Vec<Violation>) -> Result<usize> {
    let mut resolved = vec![false; violations.len()];
    let mut total = 0;
    for entry in loaded {
        let fixable: Vec<usize> = violations
            .iter()
            .enumerate()
            .filter(|(_, v)| v.fix.is_some() && v.location.file == entry.snapshot.path)
            .map(|(index, _)| index)
            .collect();
        let fixes = fixable.iter().filter_map(|&index| violations[index].fix.as_ref());
        let output = apply_fixes(&entry.snapshot.source, fixes);
        if output.applied == 0 {
            continue;
        }
        if output.skipped > 0 {
            tracing::warn!(
                "{}: {} conflicting fixes skipped; regenerate the snapshot and run again",
                entry.snapshot.path.display(),
                output.skipped
            );
        }
        let target = entry.source_path();
        std::fs::write(&target, &output.output)
            .with_context(|| format!("Failed to write fixed source: {}", target.display()))?;
        tracing::debug!("Fixed {} ({} fixes)", target.display(), output.applied);
        for (position, &index) in fixable.iter().enumerate() {
            if output.was_applied(position) {
                resolved[index] = true;
            }
        }
        total += output.applied;
    }

    let mut resolved = resolved.into_iter();
    violations.retain(|_| !resolved.next().unwrap_or(false));
    Ok(total)
}
