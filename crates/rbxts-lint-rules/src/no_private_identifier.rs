//! Rule to forbid `#private` class fields.
//!
//! ECMAScript private names have no Luau counterpart; use the `private`
//! modifier instead.

use rbxts_lint_core::{
    FileContext, LintError, Message, NodeId, NodeKind, NodeVisitor, Reporter, Rule, Severity,
};

/// Rule code for no-private-identifier.
pub const CODE: &str = "RBX019";

/// Rule name for no-private-identifier.
pub const NAME: &str = "no-private-identifier";

/// Messages of [`NoPrivateIdentifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivateIdentifierMessage {
    /// A field named with `#`.
    PrivateIdentifierViolation,
}

impl Message for PrivateIdentifierMessage {
    fn id(self) -> &'static str {
        "privateIdentifierViolation"
    }

    fn template(self) -> &'static str {
        "Private identifiers are not supported!"
    }
}

/// Forbids class fields keyed by a private identifier.
#[derive(Debug, Clone)]
pub struct NoPrivateIdentifier {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoPrivateIdentifier {
    fn default() -> Self {
        Self::new()
    }
}

impl NoPrivateIdentifier {
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

impl Rule for NoPrivateIdentifier {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Bans private identifiers from being used"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> Vec<(&'static str, &'static str)> {
        let m = PrivateIdentifierMessage::PrivateIdentifierViolation;
        vec![(m.id(), m.template())]
    }

    fn create<'a>(&self, ctx: &FileContext<'a>) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
        Ok(Box::new(PrivateFieldVisitor { ctx: *ctx }))
    }
}

struct PrivateFieldVisitor<'a> {
    ctx: FileContext<'a>,
}

impl NodeVisitor for PrivateFieldVisitor<'_> {
    fn visit(&mut self, node: NodeId, reporter: &mut Reporter<'_>) {
        let tree = self.ctx.tree;
        let Some(NodeKind::PropertyDefinition { key, .. }) = tree.kind(node) else {
            return;
        };
        if matches!(tree.kind(*key), Some(NodeKind::PrivateIdentifier { .. })) {
            reporter.report(node, PrivateIdentifierMessage::PrivateIdentifierViolation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ids, run, Fixture};
    use rbxts_lint_core::syntax::LiteralValue;

    #[test]
    fn test_detects_private_field() {
        let source = "class A { #count = 0; }";
        let mut fx = Fixture::new(source);
        let key = fx.node(
            NodeKind::PrivateIdentifier {
                name: "count".into(),
            },
            "#count",
        );
        let zero = fx.literal(LiteralValue::Number(0.0), "0");
        let field = fx.node(
            NodeKind::PropertyDefinition {
                key,
                value: Some(zero),
            },
            "#count = 0;",
        );
        let class = fx.node(NodeKind::Other { children: vec![field] }, source);
        let snapshot = fx.finish_untyped(vec![class]);

        let violations = run(NoPrivateIdentifier::new(), &snapshot);
        assert_eq!(ids(&violations), vec!["privateIdentifierViolation"]);
        assert_eq!(violations[0].location.column, 11);
    }

    #[test]
    fn test_allows_modifier_private_field() {
        let source = "class A { private count = 0; }";
        let mut fx = Fixture::new(source);
        let key = fx.ident("count");
        let field = fx.node(NodeKind::PropertyDefinition { key, value: None }, "count = 0;");
        let snapshot = fx.finish_untyped(vec![field]);
        assert!(run(NoPrivateIdentifier::new(), &snapshot).is_empty());
    }
}
