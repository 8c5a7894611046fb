//! Rule to forbid rest elements in array destructuring.
//!
//! Array destructuring compiles to plain indexed reads; there is no slice
//! to collect `...rest` into.

use rbxts_lint_core::{
    FileContext, LintError, Message, NodeId, NodeKind, NodeVisitor, Reporter, Rule, Severity,
};

/// Rule code for no-spread-destructuring.
pub const CODE: &str = "RBX017";

/// Rule name for no-spread-destructuring.
pub const NAME: &str = "no-spread-destructuring";

/// Messages of [`NoSpreadDestructuring`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadDestructuringMessage {
    /// `...rest` inside an array pattern.
    SpreadDestructuringViolation,
}

impl Message for SpreadDestructuringMessage {
    fn id(self) -> &'static str {
        "spreadDestructuringViolation"
    }

    fn template(self) -> &'static str {
        "Operator `...` is not supported for destructuring!"
    }
}

/// Forbids `[a, ...rest] = value`.
#[derive(Debug, Clone)]
pub struct NoSpreadDestructuring {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoSpreadDestructuring {
    fn default() -> Self {
        Self::new()
    }
}

impl NoSpreadDestructuring {
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

impl Rule for NoSpreadDestructuring {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Bans spread destructuring from being used"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> Vec<(&'static str, &'static str)> {
        let m = SpreadDestructuringMessage::SpreadDestructuringViolation;
        vec![(m.id(), m.template())]
    }

    fn create<'a>(&self, ctx: &FileContext<'a>) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
        Ok(Box::new(PatternVisitor { ctx: *ctx }))
    }
}

struct PatternVisitor<'a> {
    ctx: FileContext<'a>,
}

impl NodeVisitor for PatternVisitor<'_> {
    fn visit(&mut self, node: NodeId, reporter: &mut Reporter<'_>) {
        let tree = self.ctx.tree;
        let Some(NodeKind::ArrayPattern { elements }) = tree.kind(node) else {
            return;
        };
        for element in elements.iter().flatten() {
            if matches!(tree.kind(*element), Some(NodeKind::RestElement { .. })) {
                reporter.report(node, SpreadDestructuringMessage::SpreadDestructuringViolation);
            }
        }
    }
}
