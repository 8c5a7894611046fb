//! Rule to forbid `get` and `set` accessors.
//!
//! Accessors would need a metatable `__index`/`__newindex` hook on every
//! class and object literal that declares one, which roblox-ts does not
//! emit.

use rbxts_lint_core::{
    FileContext, LintError, Message, NodeId, NodeKind, NodeVisitor, Reporter, Rule, Severity,
};

/// Rule code for no-getters-or-setters.
pub const CODE: &str = "RBX016";

/// Rule name for no-getters-or-setters.
pub const NAME: &str = "no-getters-or-setters";

/// Messages of [`NoGettersOrSetters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetterSetterMessage {
    /// A `get` or `set` accessor.
    GetterSetterViolation,
}

impl Message for GetterSetterMessage {
    fn id(self) -> &'static str {
        "getterSetterViolation"
    }

    fn template(self) -> &'static str {
        "Getters and Setters are not supported for performance reasons. Please use a normal method instead."
    }
}

/// Forbids accessor definitions in classes and object literals.
#[derive(Debug, Clone)]
pub struct NoGettersOrSetters {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoGettersOrSetters {
    fn default() -> Self {
        Self::new()
    }
}

impl NoGettersOrSetters {
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

impl Rule for NoGettersOrSetters {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Disallows getters and setters"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> Vec<(&'static str, &'static str)> {
        let m = GetterSetterMessage::GetterSetterViolation;
        vec![(m.id(), m.template())]
    }

    fn create<'a>(&self, ctx: &FileContext<'a>) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
        Ok(Box::new(AccessorVisitor { ctx: *ctx }))
    }
}

struct AccessorVisitor<'a> {
    ctx: FileContext<'a>,
}

impl NodeVisitor for AccessorVisitor<'_> {
    fn visit(&mut self, node: NodeId, reporter: &mut Reporter<'_>) {
        if let Some(NodeKind::MethodDefinition { kind, .. }) = self.ctx.tree.kind(node) {
            if kind.is_accessor() {
                reporter.report(node, GetterSetterMessage::GetterSetterViolation);
            }
        }
    }
}
