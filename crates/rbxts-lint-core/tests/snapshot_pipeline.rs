//! Integration test: host snapshot on disk → Analyzer → violations.
//!
//! Uses fixture snapshots under `tests/fixtures/` and a small type-aware
//! rule defined here to drive the full load, visit, report and fix path.

use rbxts_lint_core::utils::types::{is_nan, is_possibly};
use rbxts_lint_core::utils::truthiness_sites;
use rbxts_lint_core::{
    apply_fixes, type_of, Analyzer, Fix, FileContext, HostSnapshot, LintError, Message, NodeId,
    NodeVisitor, Reporter, Rule, Severity, TextEdit, TypeChecker,
};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[derive(Clone, Copy)]
struct MaybeNan;

impl Message for MaybeNan {
    fn id(self) -> &'static str {
        "maybeNan"
    }
    fn template(self) -> &'static str {
        "`{{ name }}` may be NaN"
    }
}

struct NoNanTests;

impl Rule for NoNanTests {
    fn name(&self) -> &'static str {
        "no-nan-tests"
    }
    fn code(&self) -> &'static str {
        "T100"
    }
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }
    fn messages(&self) -> Vec<(&'static str, &'static str)> {
        vec![(MaybeNan.id(), MaybeNan.template())]
    }
    fn fixable(&self) -> bool {
        true
    }
    fn requires_type_checking(&self) -> bool {
        true
    }
    fn create<'a>(&self, ctx: &FileContext<'a>) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
        let checker = ctx.checker(self.name())?;
        Ok(Box::new(NoNanVisitor { ctx: *ctx, checker }))
    }
}

struct NoNanVisitor<'a> {
    ctx: FileContext<'a>,
    checker: &'a dyn TypeChecker,
}

impl NodeVisitor for NoNanVisitor<'_> {
    fn visit(&mut self, node: NodeId, reporter: &mut Reporter<'_>) {
        for site in truthiness_sites(self.ctx.tree, node) {
            let Some(ty) = type_of(self.ctx.tree, self.checker, site) else {
                continue;
            };
            if is_possibly(self.checker, ty, |t| is_nan(self.checker, t)) {
                let span = self.ctx.tree.span(site);
                let name = self.ctx.node_text(site);
                reporter.report_with(
                    site,
                    MaybeNan,
                    &[("name", name)],
                    Some(Fix::single(TextEdit::insert_after(span, " === n"))),
                );
            }
        }
    }
}

#[test]
fn reports_only_the_possibly_nan_test() {
    let analyzer = Analyzer::builder().rule(NoNanTests).build();
    let result = analyzer
        .analyze_paths(&[fixture("if_number.json")])
        .expect("analysis should succeed");

    assert_eq!(result.files_checked, 1);
    assert_eq!(result.violations.len(), 1, "{:#?}", result.violations);
    let v = &result.violations[0];
    insta::assert_snapshot!(
        v.to_string(),
        @"src/client/main.client.ts:1:5: warning [T100] `n` may be NaN"
    );
    assert_eq!(v.message_id, "maybeNan");
}

#[test]
fn fix_rewrites_the_source() {
    let snapshot = HostSnapshot::from_file(&fixture("if_number.json")).expect("fixture loads");
    let analyzer = Analyzer::builder().rule(NoNanTests).build();
    let violations = analyzer
        .analyze_file(&snapshot.context())
        .expect("analysis should succeed");

    let fixed = apply_fixes(&snapshot.source, violations.iter().filter_map(|v| v.fix.as_ref()));
    assert_eq!(fixed.output, "if (n === n) {}\nif (s) {}\n");
    assert_eq!(fixed.applied, 1);
}

#[test]
fn untyped_snapshot_is_rejected_by_type_aware_rules() {
    let mut snapshot = HostSnapshot::from_file(&fixture("if_number.json")).expect("fixture loads");
    snapshot.semantic = None;
    let err = Analyzer::builder()
        .rule(NoNanTests)
        .build()
        .analyze(&[snapshot])
        .expect_err("types are required");
    assert!(err.to_string().contains("requires type information"));
}
