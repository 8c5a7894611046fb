//! Rule to forbid declaring one enum in several places.

use rbxts_lint_core::semantic::TypeChecker;
use rbxts_lint_core::{
    FileContext, LintError, Message, NodeId, NodeKind, NodeVisitor, Reporter, Rule, Severity,
};

/// Rule code for no-enum-merging.
pub const CODE: &str = "RBX022";

/// Rule name for no-enum-merging.
pub const NAME: &str = "no-enum-merging";

/// Messages of [`NoEnumMerging`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumMergingMessage {
    /// An enum with more than one declaration.
    EnumMergingViolation,
}

impl Message for EnumMergingMessage {
    fn id(self) -> &'static str {
        "enumMergingViolation"
    }

    fn template(self) -> &'static str {
        "Enum merging is not supported!"
    }
}

/// Forbids enum declaration merging.
#[derive(Debug, Clone)]
pub struct NoEnumMerging {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoEnumMerging {
    fn default() -> Self {
        Self::new()
    }
}

impl NoEnumMerging {
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

impl Rule for NoEnumMerging {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Bans enum declaration merging"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> Vec<(&'static str, &'static str)> {
        let m = EnumMergingMessage::EnumMergingViolation;
        vec![(m.id(), m.template())]
    }

    fn requires_type_checking(&self) -> bool {
        true
    }

    fn create<'a>(&self, ctx: &FileContext<'a>) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
        let checker = ctx.checker(NAME)?;
        Ok(Box::new(EnumVisitor { ctx: *ctx, checker }))
    }
}

struct EnumVisitor<'a> {
    ctx: FileContext<'a>,
    checker: &'a dyn TypeChecker,
}

impl NodeVisitor for EnumVisitor<'_> {
    fn visit(&mut self, node: NodeId, reporter: &mut Reporter<'_>) {
        let Some(NodeKind::EnumDeclaration { id, .. }) = self.ctx.tree.kind(node) else {
            return;
        };
        let merged = self
            .checker
            .symbol_at(*id)
            .and_then(|symbol| self.checker.symbol(symbol))
            .is_some_and(|symbol| symbol.declarations.len() > 1);
        if merged {
            reporter.report(*id, EnumMergingMessage::EnumMergingViolation);
        }
    }
}
