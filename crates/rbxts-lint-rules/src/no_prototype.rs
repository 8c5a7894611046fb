//! Rule to forbid `prototype` access.
//!
//! roblox-ts classes compile to Luau metatables; there is no prototype
//! object to read or patch.
//!
//! # Detected Patterns
//!
//! - `X.prototype`
//! - `X["prototype"]`

use rbxts_lint_core::syntax::LiteralValue;
use rbxts_lint_core::{
    FileContext, LintError, Message, NodeId, NodeKind, NodeVisitor, Reporter, Rule, Severity,
    SyntaxTree,
};

/// Rule code for no-prototype.
pub const CODE: &str = "RBX012";

/// Rule name for no-prototype.
pub const NAME: &str = "no-prototype";

const PROTOTYPE: &str = "prototype";

/// Messages of [`NoPrototype`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoPrototypeMessage {
    /// `prototype` was accessed.
    PrototypeViolation,
}

impl Message for NoPrototypeMessage {
    fn id(self) -> &'static str {
        "prototypeViolation"
    }

    fn template(self) -> &'static str {
        "`prototype` is not supported!"
    }
}

/// Forbids accessing `prototype`.
#[derive(Debug, Clone)]
pub struct NoPrototype {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoPrototype {
    fn default() -> Self {
        Self::new()
    }
}

impl NoPrototype {
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

impl Rule for NoPrototype {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Bans prototype from being used"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> Vec<(&'static str, &'static str)> {
        let m = NoPrototypeMessage::PrototypeViolation;
        vec![(m.id(), m.template())]
    }

    fn create<'a>(&self, ctx: &FileContext<'a>) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
        Ok(Box::new(PrototypeVisitor { ctx: *ctx }))
    }
}

/// Returns true if `node` reads `prototype` by name.
fn is_prototype_access(tree: &SyntaxTree, node: NodeId) -> bool {
    let Some(NodeKind::Member {
        property, computed, ..
    }) = tree.kind(node)
    else {
        return false;
    };
    if *computed {
        matches!(
            tree.kind(tree.skip_downwards(*property)),
            Some(NodeKind::Literal { value: LiteralValue::String(s) }) if s == PROTOTYPE
        )
    } else {
        tree.identifier_name(*property) == Some(PROTOTYPE)
    }
}

struct PrototypeVisitor<'a> {
    ctx: FileContext<'a>,
}

impl NodeVisitor for PrototypeVisitor<'_> {
    fn visit(&mut self, node: NodeId, reporter: &mut Reporter<'_>) {
        if is_prototype_access(self.ctx.tree, node) {
            reporter.report(node, NoPrototypeMessage::PrototypeViolation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ids, run, Fixture};

    #[test]
    fn test_detects_dotted_access() {
        let mut fx = Fixture::new("Foo.prototype;");
        let foo = fx.ident("Foo");
        let proto = fx.ident("prototype");
        let member = fx.member(foo, proto, false, "Foo.prototype");
        let stmt = fx.statement(member);
        let snapshot = fx.finish_untyped(vec![stmt]);

        let violations = run(NoPrototype::new(), &snapshot);
        assert_eq!(ids(&violations), vec!["prototypeViolation"]);
        assert_eq!(violations[0].location.length, "Foo.prototype".len());
    }

    #[test]
    fn test_detects_string_index() {
        let mut fx = Fixture::new("Foo[\"prototype\"];");
        let foo = fx.ident("Foo");
        let key = fx.literal(LiteralValue::String(PROTOTYPE.into()), "\"prototype\"");
        let member = fx.member(foo, key, true, "Foo[\"prototype\"]");
        let stmt = fx.statement(member);
        let snapshot = fx.finish_untyped(vec![stmt]);
        assert_eq!(run(NoPrototype::new(), &snapshot).len(), 1);
    }

    #[test]
    fn test_allows_computed_identifier() {
        // `prototype` here is a variable holding some other key.
        let mut fx = Fixture::new("Foo[prototype];");
        let foo = fx.ident("Foo");
        let key = fx.ident("prototype");
        let member = fx.member(foo, key, true, "Foo[prototype]");
        let stmt = fx.statement(member);
        let snapshot = fx.finish_untyped(vec![stmt]);
        assert!(run(NoPrototype::new(), &snapshot).is_empty());
    }
}
