//! Rule traits and the per-file reporter.

use crate::context::{FileContext, LintError};
use crate::syntax::NodeId;
use crate::types::{Fix, Location, Severity, Violation};

/// A stable, documented diagnostic message of a rule.
///
/// Rules define one enum per rule implementing this trait, so a report can
/// never reference an unknown message id.
pub trait Message: Copy {
    /// Stable identifier (e.g. `"valueOfLack"`).
    fn id(self) -> &'static str;

    /// Human-readable template; `{{ name }}` placeholders are filled from
    /// report data.
    fn template(self) -> &'static str;
}

/// A lint rule over the host's syntax tree and, optionally, its types.
///
/// The rule object itself is shared and immutable. [`Rule::create`] builds a
/// fresh [`NodeVisitor`] per file; any state a rule needs while walking a
/// file lives in that visitor.
///
/// # Example
///
/// ```ignore
/// use rbxts_lint_core::{FileContext, LintError, NodeVisitor, Reporter, Rule};
///
/// pub struct NoDebugger;
///
/// impl Rule for NoDebugger {
///     fn name(&self) -> &'static str { "no-debugger" }
///     fn code(&self) -> &'static str { "RBX100" }
///     fn messages(&self) -> Vec<(&'static str, &'static str)> {
///         vec![("debuggerViolation", "Unexpected debugger statement.")]
///     }
///     fn create<'a>(&self, ctx: &FileContext<'a>) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
///         Ok(Box::new(DebuggerVisitor { tree: ctx.tree }))
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "lua-truthiness").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "RBX003").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Message id / template pairs this rule can report.
    fn messages(&self) -> Vec<(&'static str, &'static str)>;

    /// Whether any message of this rule may carry a fix.
    fn fixable(&self) -> bool {
        false
    }

    /// Whether this rule needs the host's type checker.
    fn requires_type_checking(&self) -> bool {
        false
    }

    /// Creates the visitor for one file.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::MissingTypeInformation`] if the rule needs types
    /// and the context has no checker.
    fn create<'a>(&self, ctx: &FileContext<'a>) -> Result<Box<dyn NodeVisitor + 'a>, LintError>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// Per-file visitor produced by [`Rule::create`].
///
/// Called once per node in pre-order; implementations `match` on the node
/// kind and ignore kinds they are not interested in.
pub trait NodeVisitor {
    /// Visits one node.
    fn visit(&mut self, node: NodeId, reporter: &mut Reporter<'_>);
}

/// Collects the violations of one rule in one file.
pub struct Reporter<'a> {
    ctx: FileContext<'a>,
    rule: &'static str,
    code: &'static str,
    severity: Severity,
    violations: Vec<Violation>,
}

impl<'a> Reporter<'a> {
    /// Creates a reporter for `rule` over `ctx`.
    #[must_use]
    pub fn new(ctx: FileContext<'a>, rule: &dyn Rule) -> Self {
        Self {
            ctx,
            rule: rule.name(),
            code: rule.code(),
            severity: rule.default_severity(),
            violations: Vec::new(),
        }
    }

    /// Reports `message` at `node`.
    pub fn report<M: Message>(&mut self, node: NodeId, message: M) {
        self.report_with(node, message, &[], None);
    }

    /// Reports `message` at `node` with an automatic fix.
    pub fn report_fix<M: Message>(&mut self, node: NodeId, message: M, fix: Fix) {
        self.report_with(node, message, &[], Some(fix));
    }

    /// Reports `message` at `node`, filling placeholders from `data`.
    pub fn report_with<M: Message>(
        &mut self,
        node: NodeId,
        message: M,
        data: &[(&str, &str)],
        fix: Option<Fix>,
    ) {
        let span = self.ctx.tree.span(node);
        let location = Location::from_span(self.ctx.path.to_path_buf(), self.ctx.content, span);
        tracing::trace!(
            rule = self.rule,
            message_id = message.id(),
            offset = span.start,
            "violation"
        );
        let mut violation = Violation::new(
            self.code,
            self.rule,
            message.id(),
            self.severity,
            location,
            render_message(message.template(), data),
        );
        violation.fix = fix;
        self.violations.push(violation);
    }

    /// Number of violations reported so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Consumes the reporter.
    #[must_use]
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

/// Fills `{{ name }}` placeholders in `template`.
///
/// Unknown placeholders are left as written.
#[must_use]
pub fn render_message(template: &str, data: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };
        let key = after[..close].trim();
        match data.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + 2 + close + 2]),
        }
        rest = &after[close + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{NodeKind, Span, SyntaxTree, TreeBuilder};
    use std::path::Path;

    #[derive(Clone, Copy)]
    enum TestMessage {
        Found,
    }

    impl Message for TestMessage {
        fn id(self) -> &'static str {
            "found"
        }
        fn template(self) -> &'static str {
            "found {{ what }}"
        }
    }

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn messages(&self) -> Vec<(&'static str, &'static str)> {
            vec![(TestMessage::Found.id(), TestMessage::Found.template())]
        }
        fn create<'a>(
            &self,
            _ctx: &FileContext<'a>,
        ) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
            Ok(Box::new(TestVisitor))
        }
    }

    struct TestVisitor;

    impl NodeVisitor for TestVisitor {
        fn visit(&mut self, node: NodeId, reporter: &mut Reporter<'_>) {
            reporter.report_with(node, TestMessage::Found, &[("what", "it")], None);
        }
    }

    fn tree() -> SyntaxTree {
        let mut b = TreeBuilder::new();
        let x = b.ident("x", Span::new(2, 3));
        let root = b.push(NodeKind::Program { body: vec![x] }, Span::new(0, 3));
        b.finish(root)
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.code(), "TEST001");
        assert_eq!(rule.default_severity(), Severity::Error);
        assert!(!rule.fixable());
        assert!(!rule.requires_type_checking());
    }

    #[test]
    fn reporter_renders_message_and_location() {
        let tree = tree();
        let ctx = FileContext::new(Path::new("a.ts"), "\n x", &tree);
        let rule = TestRule;
        let mut visitor = rule.create(&ctx).expect("create");
        let mut reporter = Reporter::new(ctx, &rule);
        visitor.visit(crate::syntax::NodeId(0), &mut reporter);
        let violations = reporter.into_violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "found it");
        assert_eq!(violations[0].message_id, "found");
        assert_eq!(violations[0].location.line, 2);
        assert_eq!(violations[0].location.column, 2);
    }

    #[test]
    fn render_message_placeholders() {
        assert_eq!(
            render_message("{{ leftType }} {{operator}} {{ rightType }}", &[
                ("leftType", "string"),
                ("operator", "<"),
                ("rightType", "number"),
            ]),
            "string < number"
        );
        assert_eq!(render_message("keep {{ missing }}", &[]), "keep {{ missing }}");
        assert_eq!(render_message("open {{ end", &[]), "open {{ end");
    }
}
