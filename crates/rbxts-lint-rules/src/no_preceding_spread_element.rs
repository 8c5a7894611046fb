//! Rule to forbid spread arguments before the last position.
//!
//! A spread argument compiles to `unpack(...)`, which only expands to all
//! of its values in the last position of a Luau argument list.
//!
//! # Detected Patterns
//!
//! - `f(...args, x)`
//! - `new X(...args, x)`
//!
//! Spreads inside array and object literals are not affected.

use rbxts_lint_core::{
    FileContext, LintError, Message, NodeId, NodeKind, NodeVisitor, Reporter, Rule, Severity,
};

/// Rule code for no-preceding-spread-element.
pub const CODE: &str = "RBX018";

/// Rule name for no-preceding-spread-element.
pub const NAME: &str = "no-preceding-spread-element";

/// Messages of [`NoPrecedingSpreadElement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecedingSpreadMessage {
    /// A spread argument followed by other arguments.
    NoPrecedingSpreadElementViolation,
}

impl Message for PrecedingSpreadMessage {
    fn id(self) -> &'static str {
        "noPrecedingSpreadElementViolation"
    }

    fn template(self) -> &'static str {
        "Spread element must come last in a list of arguments!"
    }
}

/// Forbids spread arguments that are not last.
#[derive(Debug, Clone)]
pub struct NoPrecedingSpreadElement {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoPrecedingSpreadElement {
    fn default() -> Self {
        Self::new()
    }
}

impl NoPrecedingSpreadElement {
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

impl Rule for NoPrecedingSpreadElement {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Bans spread elements not last in a list of arguments from being used"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> Vec<(&'static str, &'static str)> {
        let m = PrecedingSpreadMessage::NoPrecedingSpreadElementViolation;
        vec![(m.id(), m.template())]
    }

    fn create<'a>(&self, ctx: &FileContext<'a>) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
        Ok(Box::new(SpreadVisitor { ctx: *ctx }))
    }
}

struct SpreadVisitor<'a> {
    ctx: FileContext<'a>,
}

impl NodeVisitor for SpreadVisitor<'_> {
    fn visit(&mut self, node: NodeId, reporter: &mut Reporter<'_>) {
        let tree = self.ctx.tree;
        if !matches!(tree.kind(node), Some(NodeKind::Spread { .. })) {
            return;
        }
        let arguments = match tree.parent(node).and_then(|parent| tree.kind(parent)) {
            Some(NodeKind::Call { arguments, .. } | NodeKind::New { arguments, .. }) => arguments,
            _ => return,
        };
        if arguments.contains(&node) && arguments.last() != Some(&node) {
            reporter.report(node, PrecedingSpreadMessage::NoPrecedingSpreadElementViolation);
        }
    }
}
