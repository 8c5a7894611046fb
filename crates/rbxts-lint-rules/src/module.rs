//! Rule to require every file to be a module.
//!
//! roblox-ts compiles each file to a ModuleScript. A file with no import or
//! export statement is a script in TypeScript's eyes, and its top-level
//! declarations leak into the global scope of every other script. The fix
//! prepends `export {};`.

use rbxts_lint_core::{
    FileContext, Fix, LintError, Message, NodeId, NodeKind, NodeVisitor, Reporter, Rule, Severity,
    SyntaxTree, TextEdit,
};

/// Rule code for module.
pub const CODE: &str = "RBX015";

/// Rule name for module.
pub const NAME: &str = "module";

/// Messages of [`Module`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleMessage {
    /// The file has no import or export.
    ModuleViolation,
}

impl Message for ModuleMessage {
    fn id(self) -> &'static str {
        "moduleViolation"
    }

    fn template(self) -> &'static str {
        "File must contain at least one import or export statement to be a module."
    }
}

/// Requires at least one import or export per file.
#[derive(Debug, Clone)]
pub struct Module {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for Module {
    fn default() -> Self {
        Self::new()
    }
}

impl Module {
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

impl Rule for Module {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Enforces file is a module"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> Vec<(&'static str, &'static str)> {
        let m = ModuleMessage::ModuleViolation;
        vec![(m.id(), m.template())]
    }

    fn fixable(&self) -> bool {
        true
    }

    fn create<'a>(&self, ctx: &FileContext<'a>) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
        Ok(Box::new(ModuleVisitor { ctx: *ctx }))
    }
}

/// Import, export and `export =` statements mark a file as a module.
fn is_module_indicator(tree: &SyntaxTree, node: NodeId) -> bool {
    matches!(
        tree.kind(node),
        Some(NodeKind::Import { .. } | NodeKind::Export { .. } | NodeKind::ExportAssignment { .. })
    )
}

struct ModuleVisitor<'a> {
    ctx: FileContext<'a>,
}

impl NodeVisitor for ModuleVisitor<'_> {
    fn visit(&mut self, node: NodeId, reporter: &mut Reporter<'_>) {
        let tree = self.ctx.tree;
        let Some(NodeKind::Program { body }) = tree.kind(node) else {
            return;
        };
        if body.iter().any(|stmt| is_module_indicator(tree, *stmt)) {
            return;
        }
        reporter.report_fix(
            node,
            ModuleMessage::ModuleViolation,
            Fix::single(TextEdit::insert_before(tree.span(node), "export {};\n")),
        );
    }
}
