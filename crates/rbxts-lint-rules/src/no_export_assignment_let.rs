//! Rule to forbid `export =` of a `let` binding.
//!
//! The exported value is captured once when the module returns; later
//! assignments to the variable would silently not be seen by importers.

use rbxts_lint_core::syntax::{SyntaxTree, VariableKind};
use rbxts_lint_core::{
    FileContext, LintError, Message, NodeId, NodeKind, NodeVisitor, Reporter, Rule, Severity,
};

/// Rule code for no-export-assignment-let.
pub const CODE: &str = "RBX023";

/// Rule name for no-export-assignment-let.
pub const NAME: &str = "no-export-assignment-let";

/// Messages of [`NoExportAssignmentLet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportAssignmentLetMessage {
    /// `export =` naming a `let` variable.
    NoExportAssignmentLetViolation,
}

impl Message for ExportAssignmentLetMessage {
    fn id(self) -> &'static str {
        "noExportAssignmentLetViolation"
    }

    fn template(self) -> &'static str {
        "Cannot use `export =` on a `let` variable!"
    }
}

/// Forbids `export = x` where `x` is declared with `let`.
#[derive(Debug, Clone)]
pub struct NoExportAssignmentLet {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoExportAssignmentLet {
    fn default() -> Self {
        Self::new()
    }
}

impl NoExportAssignmentLet {
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

impl Rule for NoExportAssignmentLet {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Bans using `export =` on a let variable"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> Vec<(&'static str, &'static str)> {
        let m = ExportAssignmentLetMessage::NoExportAssignmentLetViolation;
        vec![(m.id(), m.template())]
    }

    fn create<'a>(&self, ctx: &FileContext<'a>) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
        Ok(Box::new(ExportAssignmentVisitor { ctx: *ctx }))
    }
}

struct ExportAssignmentVisitor<'a> {
    ctx: FileContext<'a>,
}

impl NodeVisitor for ExportAssignmentVisitor<'_> {
    fn visit(&mut self, node: NodeId, reporter: &mut Reporter<'_>) {
        let tree = self.ctx.tree;
        let Some(NodeKind::ExportAssignment { expression }) = tree.kind(node) else {
            return;
        };
        let Some(name) = tree.identifier_name(*expression) else {
            return;
        };
        if declared_with_let(tree, name) {
            reporter.report(node, ExportAssignmentLetMessage::NoExportAssignmentLetViolation);
        }
    }
}

/// Searches module-scope statements for a `let` binding of `name`.
///
/// `export =` is only legal at the top level, so nested scopes cannot hold
/// the binding it names.
fn declared_with_let(tree: &SyntaxTree, name: &str) -> bool {
    let Some(NodeKind::Program { body }) = tree.root().and_then(|root| tree.kind(root)) else {
        return false;
    };
    let mut stack: Vec<NodeId> = body.clone();
    while let Some(node) = stack.pop() {
        match tree.kind(node) {
            Some(NodeKind::VariableDeclaration {
                kind: VariableKind::Let,
                id,
                ..
            }) if tree.identifier_name(*id) == Some(name) => return true,
            Some(NodeKind::Export {
                declaration: Some(declaration),
                ..
            }) => stack.push(*declaration),
            Some(NodeKind::Other { children }) => stack.extend(children),
            _ => {}
        }
    }
    false
}
