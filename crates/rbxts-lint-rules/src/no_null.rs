//! Rule to forbid `null`.
//!
//! # Rationale
//!
//! Lua has a single nil value. roblox-ts maps `undefined` to `nil`; `null`
//! has no counterpart.
//!
//! # Detected Patterns
//!
//! - `null` literals
//! - the `null` type keyword
//!
//! Both are fixed by replacing them with `undefined`.

use rbxts_lint_core::syntax::LiteralValue;
use rbxts_lint_core::{
    FileContext, Fix, LintError, Message, NodeId, NodeKind, NodeVisitor, Reporter, Rule, Severity,
    TextEdit,
};

/// Rule code for no-null.
pub const CODE: &str = "RBX007";

/// Rule name for no-null.
pub const NAME: &str = "no-null";

/// Messages of [`NoNull`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoNullMessage {
    /// `null` was used.
    NullViolation,
}

impl Message for NoNullMessage {
    fn id(self) -> &'static str {
        "nullViolation"
    }

    fn template(self) -> &'static str {
        "Don't use null. Use undefined instead"
    }
}

/// Forbids `null` values and types.
#[derive(Debug, Clone)]
pub struct NoNull {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoNull {
    fn default() -> Self {
        Self::new()
    }
}

impl NoNull {
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

impl Rule for NoNull {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Bans null from being used"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> Vec<(&'static str, &'static str)> {
        let m = NoNullMessage::NullViolation;
        vec![(m.id(), m.template())]
    }

    fn fixable(&self) -> bool {
        true
    }

    fn create<'a>(&self, ctx: &FileContext<'a>) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
        Ok(Box::new(NullVisitor { ctx: *ctx }))
    }
}

struct NullVisitor<'a> {
    ctx: FileContext<'a>,
}

impl NodeVisitor for NullVisitor<'_> {
    fn visit(&mut self, node: NodeId, reporter: &mut Reporter<'_>) {
        if matches!(
            self.ctx.tree.kind(node),
            Some(
                NodeKind::NullKeyword
                    | NodeKind::Literal {
                        value: LiteralValue::Null,
                    }
            )
        ) {
            let fix = Fix::single(TextEdit::replace(self.ctx.tree.span(node), "undefined"));
            reporter.report_fix(node, NoNullMessage::NullViolation, fix);
        }
    }
}
