//! Rule to forbid the `delete` operator.

use rbxts_lint_core::syntax::UnaryOperator;
use rbxts_lint_core::{
    FileContext, LintError, Message, NodeId, NodeKind, NodeVisitor, Reporter, Rule, Severity,
};

/// Rule code for no-delete.
pub const CODE: &str = "RBX009";

/// Rule name for no-delete.
pub const NAME: &str = "no-delete";

/// Messages of [`NoDelete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoDeleteMessage {
    /// `delete` was used.
    DeleteViolation,
}

impl Message for NoDeleteMessage {
    fn id(self) -> &'static str {
        "deleteViolation"
    }

    fn template(self) -> &'static str {
        "The delete operator is not supported. Please use a map instead and use map.delete()"
    }
}

/// Forbids `delete expr`.
#[derive(Debug, Clone)]
pub struct NoDelete {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoDelete {
    fn default() -> Self {
        Self::new()
    }
}

impl NoDelete {
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

impl Rule for NoDelete {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Disallows the delete operator"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> Vec<(&'static str, &'static str)> {
        let m = NoDeleteMessage::DeleteViolation;
        vec![(m.id(), m.template())]
    }

    fn create<'a>(&self, ctx: &FileContext<'a>) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
        Ok(Box::new(UnaryOperatorVisitor {
            ctx: *ctx,
            operator: UnaryOperator::Delete,
            message: NoDeleteMessage::DeleteViolation,
        }))
    }
}

/// Reports every prefix expression using one operator.
pub(crate) struct UnaryOperatorVisitor<'a, M> {
    pub(crate) ctx: FileContext<'a>,
    pub(crate) operator: UnaryOperator,
    pub(crate) message: M,
}

impl<M: Message> NodeVisitor for UnaryOperatorVisitor<'_, M> {
    fn visit(&mut self, node: NodeId, reporter: &mut Reporter<'_>) {
        if let Some(NodeKind::Unary { operator, .. }) = self.ctx.tree.kind(node) {
            if *operator == self.operator {
                reporter.report(node, self.message);
            }
        }
    }
}
