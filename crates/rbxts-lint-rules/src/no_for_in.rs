//! Rule to forbid `for ... in` loops.
//!
//! A for-in loop always types its binding as `string`, and iterating Lua
//! tables by key does not shift array indices. The fix rewrites the loop to
//! `for ... of`.

use rbxts_lint_core::{
    FileContext, Fix, LintError, Message, NodeId, NodeKind, NodeVisitor, Reporter, Rule, Severity,
    Span, TextEdit,
};

/// Rule code for no-for-in.
pub const CODE: &str = "RBX008";

/// Rule name for no-for-in.
pub const NAME: &str = "no-for-in";

/// Messages of [`NoForIn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoForInMessage {
    /// A for-in loop.
    ForInViolation,
}

impl Message for NoForInMessage {
    fn id(self) -> &'static str {
        "forInViolation"
    }

    fn template(self) -> &'static str {
        "For-in loops are forbidden because it always types the iterator variable as `string`. Use for-of or array.forEach instead."
    }
}

/// Forbids for-in loops.
#[derive(Debug, Clone)]
pub struct NoForIn {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoForIn {
    fn default() -> Self {
        Self::new()
    }
}

impl NoForIn {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for NoForIn {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Disallows iterating with a for-in loop"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> Vec<(&'static str, &'static str)> {
        let m = NoForInMessage::ForInViolation;
        vec![(m.id(), m.template())]
    }

    fn fixable(&self) -> bool {
        true
    }

    fn create<'a>(&self, ctx: &FileContext<'a>) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
        Ok(Box::new(ForInVisitor { ctx: *ctx }))
    }
}

struct ForInVisitor<'a> {
    ctx: FileContext<'a>,
}

impl NodeVisitor for ForInVisitor<'_> {
    fn visit(&mut self, node: NodeId, reporter: &mut Reporter<'_>) {
        let Some(NodeKind::ForIn { left, right, .. }) = self.ctx.tree.kind(node) else {
            return;
        };
        let gap = Span::new(
            self.ctx.tree.span(*left).end,
            self.ctx.tree.span(*right).start,
        );
        reporter.report_fix(
            node,
            NoForInMessage::ForInViolation,
            Fix::single(TextEdit::replace(gap, " of ")),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixed, run, Fixture};

    #[test]
    fn test_rewrites_to_for_of() {
        let source = "for (const key in items) {}";
        let mut fx = Fixture::new(source);
        let left = fx.node(NodeKind::Other { children: vec![] }, "const key");
        let right = fx.ident("items");
        let body = fx.node(NodeKind::Block { body: vec![] }, "{}");
        let stmt = fx.node(NodeKind::ForIn { left, right, body }, source);
        let snapshot = fx.finish_untyped(vec![stmt]);

        let violations = run(NoForIn::new(), &snapshot);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].code, CODE);
        assert_eq!(violations[0].location.column, 1);
        assert_eq!(fixed(&snapshot, &violations), "for (const key of items) {}");
    }

    #[test]
    fn test_ignores_plain_for() {
        let source = "for (;;) {}";
        let mut fx = Fixture::new(source);
        let body = fx.node(NodeKind::Block { body: vec![] }, "{}");
        let stmt = fx.node(
            NodeKind::For {
                init: None,
                test: None,
                update: None,
                body,
            },
            source,
        );
        let snapshot = fx.finish_untyped(vec![stmt]);
        assert!(run(NoForIn::new(), &snapshot).is_empty());
    }
}
