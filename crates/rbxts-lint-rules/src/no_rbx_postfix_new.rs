//! Rule to forbid Luau-style `.new()` constructor calls on Roblox data types.
//!
//! Code ported from Luau often writes `Vector3.new(1, 2, 3)`. In roblox-ts
//! the data type constructors are classes, so the call is written
//! `new Vector3(1, 2, 3)`; the rule rewrites it that way.

use crate::no_object_math::DATA_TYPES;
use rbxts_lint_core::{
    constrained_type_of, FileContext, Fix, LintError, Message, NodeId, NodeKind, NodeVisitor,
    Reporter, Rule, Severity, Span, TextEdit, TypeChecker,
};

/// Rule code for no-rbx-postfix-new.
pub const CODE: &str = "RBX014";

/// Rule name for no-rbx-postfix-new.
pub const NAME: &str = "no-rbx-postfix-new";

/// Suffix of the constructor interfaces the data types are declared with.
const CONSTRUCTOR_SUFFIX: &str = "Constructor";

/// Messages of [`NoRbxPostfixNew`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixNewMessage {
    /// `X.new(...)` on a data type constructor.
    NewViolation,
}

impl Message for PostfixNewMessage {
    fn id(self) -> &'static str {
        "newViolation"
    }

    fn template(self) -> &'static str {
        "Don't use `.new` use `new X()` instead."
    }
}

/// Flags `.new()` calls on Roblox data type constructors.
#[derive(Debug, Clone)]
pub struct NoRbxPostfixNew {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoRbxPostfixNew {
    fn default() -> Self {
        Self::new()
    }
}

impl NoRbxPostfixNew {
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

impl Rule for NoRbxPostfixNew {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Bans calling .new() on Roblox objects (helps transition to TS)"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> Vec<(&'static str, &'static str)> {
        let m = PostfixNewMessage::NewViolation;
        vec![(m.id(), m.template())]
    }

    fn fixable(&self) -> bool {
        true
    }

    fn requires_type_checking(&self) -> bool {
        true
    }

    fn create<'a>(&self, ctx: &FileContext<'a>) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
        let checker = ctx.checker(NAME)?;
        Ok(Box::new(PostfixNewVisitor { ctx: *ctx, checker }))
    }
}

/// Returns true for `CFrameConstructor`, `Vector3Constructor`, ...
fn is_data_type_constructor(name: &str) -> bool {
    name.strip_suffix(CONSTRUCTOR_SUFFIX)
        .is_some_and(|data_type| DATA_TYPES.contains(&data_type))
}

struct PostfixNewVisitor<'a> {
    ctx: FileContext<'a>,
    checker: &'a dyn TypeChecker,
}

impl NodeVisitor for PostfixNewVisitor<'_> {
    fn visit(&mut self, node: NodeId, reporter: &mut Reporter<'_>) {
        let tree = self.ctx.tree;
        let Some(NodeKind::Call { callee, .. }) = tree.kind(node) else {
            return;
        };
        let Some(NodeKind::Member {
            object,
            property,
            computed: false,
        }) = tree.kind(*callee)
        else {
            return;
        };
        if tree.identifier_name(*property) != Some("new") {
            return;
        }
        let is_constructor = constrained_type_of(tree, self.checker, *object)
            .and_then(|ty| self.checker.symbol_name(ty))
            .is_some_and(is_data_type_constructor);
        if !is_constructor {
            return;
        }

        let suffix = Span::new(tree.span(*object).end, tree.span(*callee).end);
        let fix = Fix::new(vec![
            TextEdit::delete(suffix),
            TextEdit::insert_before(tree.span(node), "new "),
        ]);
        reporter.report_fix(node, PostfixNewMessage::NewViolation, fix);
    }
}
