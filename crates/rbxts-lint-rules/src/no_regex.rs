//! Rule to forbid regular expression literals.
//!
//! Luau string patterns are not regular expressions and roblox-ts ships no
//! regex engine, so `/.../` literals cannot be compiled.

use rbxts_lint_core::syntax::LiteralValue;
use rbxts_lint_core::{
    FileContext, LintError, Message, NodeId, NodeKind, NodeVisitor, Reporter, Rule, Severity,
};

/// Rule code for no-regex.
pub const CODE: &str = "RBX013";

/// Rule name for no-regex.
pub const NAME: &str = "no-regex";

/// Messages of [`NoRegex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoRegexMessage {
    /// A regex literal was used.
    RegexViolation,
}

impl Message for NoRegexMessage {
    fn id(self) -> &'static str {
        "regexViolation"
    }

    fn template(self) -> &'static str {
        "Regex literals are not supported."
    }
}

/// Forbids regular expression literals.
#[derive(Debug, Clone)]
pub struct NoRegex {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoRegex {
    fn default() -> Self {
        Self::new()
    }
}

impl NoRegex {
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

impl Rule for NoRegex {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Disallows the regex operator"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> Vec<(&'static str, &'static str)> {
        let m = NoRegexMessage::RegexViolation;
        vec![(m.id(), m.template())]
    }

    fn create<'a>(&self, ctx: &FileContext<'a>) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
        Ok(Box::new(RegexVisitor { ctx: *ctx }))
    }
}

struct RegexVisitor<'a> {
    ctx: FileContext<'a>,
}

impl NodeVisitor for RegexVisitor<'_> {
    fn visit(&mut self, node: NodeId, reporter: &mut Reporter<'_>) {
        if let Some(NodeKind::Literal {
            value: LiteralValue::Regex(_),
        }) = self.ctx.tree.kind(node)
        {
            reporter.report(node, NoRegexMessage::RegexViolation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{run, Fixture};
    use rbxts_lint_core::syntax::VariableKind;

    #[test]
    fn test_detects_regex_literal() {
        let mut fx = Fixture::new("const re = /ab+c/i;");
        let id = fx.ident("re");
        let regex = fx.literal(LiteralValue::Regex("ab+c".into()), "/ab+c/i");
        let decl = fx.node(
            NodeKind::VariableDeclaration {
                kind: VariableKind::Const,
                id,
                init: Some(regex),
            },
            "const re = /ab+c/i;",
        );
        let snapshot = fx.finish_untyped(vec![decl]);

        let violations = run(NoRegex::new(), &snapshot);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Regex literals are not supported.");
        assert_eq!(violations[0].location.column, 12);
    }

    #[test]
    fn test_allows_pattern_strings() {
        let mut fx = Fixture::new("\"%d+\";");
        let pattern = fx.literal(LiteralValue::String("%d+".into()), "\"%d+\"");
        let stmt = fx.statement(pattern);
        let snapshot = fx.finish_untyped(vec![stmt]);
        assert!(run(NoRegex::new(), &snapshot).is_empty());
    }
}
