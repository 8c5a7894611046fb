//! Rule to forbid `globalThis`.
//!
//! Luau has no object standing for the global scope that roblox-ts could
//! map `globalThis` onto.

use rbxts_lint_core::{
    FileContext, LintError, Message, NodeId, NodeVisitor, Reporter, Rule, Severity,
};

/// Rule code for no-global-this.
pub const CODE: &str = "RBX011";

/// Rule name for no-global-this.
pub const NAME: &str = "no-global-this";

const GLOBAL_THIS: &str = "globalThis";

/// Messages of [`NoGlobalThis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoGlobalThisMessage {
    /// `globalThis` was referenced.
    GlobalThisViolation,
}

impl Message for NoGlobalThisMessage {
    fn id(self) -> &'static str {
        "globalThisViolation"
    }

    fn template(self) -> &'static str {
        "`globalThis` is not supported!"
    }
}

/// Forbids references to `globalThis`.
#[derive(Debug, Clone)]
pub struct NoGlobalThis {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoGlobalThis {
    fn default() -> Self {
        Self::new()
    }
}

impl NoGlobalThis {
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

impl Rule for NoGlobalThis {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Bans globalThis from being used"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> Vec<(&'static str, &'static str)> {
        let m = NoGlobalThisMessage::GlobalThisViolation;
        vec![(m.id(), m.template())]
    }

    fn create<'a>(&self, ctx: &FileContext<'a>) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
        Ok(Box::new(GlobalThisVisitor { ctx: *ctx }))
    }
}

struct GlobalThisVisitor<'a> {
    ctx: FileContext<'a>,
}

impl NodeVisitor for GlobalThisVisitor<'_> {
    fn visit(&mut self, node: NodeId, reporter: &mut Reporter<'_>) {
        if self.ctx.tree.identifier_name(node) == Some(GLOBAL_THIS) {
            reporter.report(node, NoGlobalThisMessage::GlobalThisViolation);
        }
    }
}
