//! Core analyzer for orchestrating lint execution.

use crate::config::Config;
use crate::context::{FileContext, LintError};
use crate::rule::{NodeVisitor, Reporter, Rule, RuleBox};
use crate::snapshot::{HostSnapshot, SnapshotError};
use crate::types::{LintResult, Violation};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A rule could not be created for a file.
    #[error("{path}: {source}")]
    Lint {
        /// File being analyzed.
        path: PathBuf,
        /// Underlying rule error.
        source: LintError,
    },

    /// A snapshot could not be loaded.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    rules: Vec<RuleBox>,
    config: Option<Config>,
    skip_untyped: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules.
    #[must_use]
    pub fn rules<I: IntoIterator<Item = RuleBox>>(mut self, rules: I) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Skips type-aware rules on files without type information instead of
    /// failing (default: false).
    #[must_use]
    pub fn skip_untyped(mut self, skip: bool) -> Self {
        self.skip_untyped = skip;
        self
    }

    /// Builds the analyzer, dropping rules the configuration disables.
    #[must_use]
    pub fn build(self) -> Analyzer {
        let config = self.config.unwrap_or_default();
        let rules = self
            .rules
            .into_iter()
            .filter(|rule| {
                let enabled = config.is_rule_enabled(rule.name());
                if !enabled {
                    debug!("Skipping disabled rule: {}", rule.name());
                }
                enabled
            })
            .collect();
        Analyzer {
            rules,
            config,
            skip_untyped: self.skip_untyped,
        }
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    rules: Vec<RuleBox>,
    config: Config,
    skip_untyped: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the number of active rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyzes the given snapshot files.
    ///
    /// # Errors
    ///
    /// Returns an error if a snapshot cannot be loaded or a rule cannot run.
    pub fn analyze_paths(&self, paths: &[PathBuf]) -> Result<LintResult, AnalyzerError> {
        let snapshots = paths
            .iter()
            .map(|p| HostSnapshot::from_file(p))
            .collect::<Result<Vec<_>, _>>()?;
        self.analyze(&snapshots)
    }

    /// Analyzes in-memory snapshots and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if a type-aware rule runs on a file without type
    /// information and untyped files are not skipped.
    pub fn analyze(&self, snapshots: &[HostSnapshot]) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis of {} files", snapshots.len());

        let mut result = LintResult::new();
        for snapshot in snapshots {
            let violations = self.analyze_file(&snapshot.context())?;
            result.violations.extend(violations);
            result.files_checked += 1;
        }

        result.violations.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.line.cmp(&b.location.line))
                .then(a.location.column.cmp(&b.location.column))
        });

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Analyzes a single file and returns violations.
    ///
    /// Every rule gets a fresh visitor; the tree is walked once and each node
    /// is offered to every visitor in pre-order.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Lint`] if a rule cannot be created.
    pub fn analyze_file(&self, ctx: &FileContext<'_>) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", ctx.path.display());

        let mut active: Vec<(&dyn Rule, Box<dyn NodeVisitor + '_>, Reporter<'_>)> = Vec::new();
        for rule in &self.rules {
            if rule.requires_type_checking() && !ctx.has_checker() && self.skip_untyped {
                warn!(
                    "Skipping {} for {}: no type information",
                    rule.name(),
                    ctx.path.display()
                );
                continue;
            }
            let visitor = rule.create(ctx).map_err(|source| AnalyzerError::Lint {
                path: ctx.path.to_path_buf(),
                source,
            })?;
            active.push((rule.as_ref(), visitor, Reporter::new(*ctx, rule.as_ref())));
        }

        for node in ctx.tree.preorder() {
            for (_, visitor, reporter) in &mut active {
                visitor.visit(node, reporter);
            }
        }

        let mut violations = Vec::new();
        for (rule, _, reporter) in active {
            let found = reporter.into_violations();
            if !found.is_empty() {
                debug!("{}: {} violations", rule.name(), found.len());
            }
            violations.extend(self.apply_severity_override(rule.name(), found));
        }
        Ok(violations)
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }

    /// Returns the names of the active rules.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }
}

/// Returns true if `path` looks like a host snapshot file.
#[must_use]
pub fn is_snapshot_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Message;
    use crate::syntax::{LiteralValue, NodeId, NodeKind, Span, TreeBuilder};
    use crate::types::Severity;

    #[derive(Clone, Copy)]
    struct NullFound;

    impl Message for NullFound {
        fn id(self) -> &'static str {
            "nullFound"
        }
        fn template(self) -> &'static str {
            "null found"
        }
    }

    struct FindNull;

    impl Rule for FindNull {
        fn name(&self) -> &'static str {
            "find-null"
        }
        fn code(&self) -> &'static str {
            "T001"
        }
        fn messages(&self) -> Vec<(&'static str, &'static str)> {
            vec![(NullFound.id(), NullFound.template())]
        }
        fn create<'a>(
            &self,
            ctx: &FileContext<'a>,
        ) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
            Ok(Box::new(FindNullVisitor { ctx: *ctx }))
        }
    }

    struct FindNullVisitor<'a> {
        ctx: FileContext<'a>,
    }

    impl NodeVisitor for FindNullVisitor<'_> {
        fn visit(&mut self, node: NodeId, reporter: &mut Reporter<'_>) {
            if let Some(NodeKind::Literal {
                value: LiteralValue::Null,
            }) = self.ctx.tree.kind(node)
            {
                reporter.report(node, NullFound);
            }
        }
    }

    struct NeedsTypes;

    impl Rule for NeedsTypes {
        fn name(&self) -> &'static str {
            "needs-types"
        }
        fn code(&self) -> &'static str {
            "T002"
        }
        fn messages(&self) -> Vec<(&'static str, &'static str)> {
            Vec::new()
        }
        fn requires_type_checking(&self) -> bool {
            true
        }
        fn create<'a>(
            &self,
            ctx: &FileContext<'a>,
        ) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
            ctx.checker(self.name())?;
            Ok(Box::new(FindNullVisitor { ctx: *ctx }))
        }
    }

    fn snapshot(path: &str) -> HostSnapshot {
        // null;\nnull;
        let mut b = TreeBuilder::new();
        let first = b.literal(LiteralValue::Null, Span::new(0, 4));
        let s1 = b.expression_statement(first);
        let second = b.literal(LiteralValue::Null, Span::new(6, 10));
        let s2 = b.expression_statement(second);
        let root = b.push(NodeKind::Program { body: vec![s1, s2] }, Span::new(0, 11));
        HostSnapshot {
            path: PathBuf::from(path),
            source: "null;\nnull;".to_string(),
            tree: b.finish(root),
            semantic: None,
        }
    }

    #[test]
    fn test_builder() {
        let analyzer = Analyzer::builder().rule(FindNull).build();
        assert_eq!(analyzer.rule_count(), 1);
        assert_eq!(analyzer.rule_names(), vec!["find-null"]);
    }

    #[test]
    fn violations_are_sorted_by_file_then_line() {
        let analyzer = Analyzer::builder().rule(FindNull).build();
        let result = analyzer
            .analyze(&[snapshot("b.ts"), snapshot("a.ts")])
            .expect("analyze");
        assert_eq!(result.files_checked, 2);
        let order: Vec<_> = result
            .violations
            .iter()
            .map(|v| (v.location.file.display().to_string(), v.location.line))
            .collect();
        assert_eq!(
            order,
            vec![
                ("a.ts".to_string(), 1),
                ("a.ts".to_string(), 2),
                ("b.ts".to_string(), 1),
                ("b.ts".to_string(), 2),
            ]
        );
    }

    #[test]
    fn disabled_rules_are_dropped_and_overrides_applied() {
        let config = Config::parse(
            r#"
[rules.find-null]
severity = "warning"

[rules.needs-types]
enabled = false
"#,
        )
        .expect("config");
        let analyzer = Analyzer::builder()
            .rule(FindNull)
            .rule(NeedsTypes)
            .config(config)
            .build();
        assert_eq!(analyzer.rule_count(), 1);
        let result = analyzer.analyze(&[snapshot("a.ts")]).expect("analyze");
        assert_eq!(result.by_severity(Severity::Warning).len(), 2);
        assert!(!result.has_errors());
    }

    #[test]
    fn prefixed_rule_keys_are_honoured() {
        let config = Config::parse(
            r#"
[rules."roblox-ts/find-null"]
severity = "info"
"#,
        )
        .expect("config");
        let analyzer = Analyzer::builder().rule(FindNull).config(config).build();
        let result = analyzer.analyze(&[snapshot("a.ts")]).expect("analyze");
        assert_eq!(result.by_severity(Severity::Info).len(), 2);
        assert_eq!(analyzer.config().rule_severity("find-null"), Some(Severity::Info));
    }

    #[test]
    fn type_aware_rule_without_types_fails() {
        let analyzer = Analyzer::builder().rule(NeedsTypes).build();
        let err = analyzer
            .analyze(&[snapshot("a.ts")])
            .expect_err("missing types");
        assert!(matches!(
            err,
            AnalyzerError::Lint {
                source: LintError::MissingTypeInformation { rule: "needs-types" },
                ..
            }
        ));
    }

    #[test]
    fn type_aware_rule_can_be_skipped() {
        let analyzer = Analyzer::builder()
            .rule(NeedsTypes)
            .rule(FindNull)
            .skip_untyped(true)
            .build();
        let result = analyzer.analyze(&[snapshot("a.ts")]).expect("analyze");
        assert_eq!(result.violations.len(), 2);
    }

    #[test]
    fn snapshot_paths() {
        assert!(is_snapshot_path(Path::new("out/main.json")));
        assert!(!is_snapshot_path(Path::new("src/main.ts")));
    }
}
