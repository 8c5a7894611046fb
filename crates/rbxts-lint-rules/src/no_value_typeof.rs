//! Rule to forbid `typeof` on values.
//!
//! `typeof` in type position (`type T = typeof x`) is not a unary expression
//! and is unaffected.

use crate::no_delete::UnaryOperatorVisitor;
use rbxts_lint_core::syntax::UnaryOperator;
use rbxts_lint_core::{FileContext, LintError, Message, NodeVisitor, Rule, Severity};

/// Rule code for no-value-typeof.
pub const CODE: &str = "RBX010";

/// Rule name for no-value-typeof.
pub const NAME: &str = "no-value-typeof";

/// Messages of [`NoValueTypeof`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoValueTypeofMessage {
    /// `typeof value` was used.
    TypeofValueViolation,
}

impl Message for NoValueTypeofMessage {
    fn id(self) -> &'static str {
        "typeofValueViolation"
    }

    fn template(self) -> &'static str {
        "The typeof operator is not supported for values. Please use `typeIs(value, typeName)` instead."
    }
}

/// Forbids the `typeof` operator in expressions.
#[derive(Debug, Clone)]
pub struct NoValueTypeof {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoValueTypeof {
    fn default() -> Self {
        Self::new()
    }
}

impl NoValueTypeof {
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

impl Rule for NoValueTypeof {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Disallows the typeof operator for values"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> Vec<(&'static str, &'static str)> {
        let m = NoValueTypeofMessage::TypeofValueViolation;
        vec![(m.id(), m.template())]
    }

    fn create<'a>(&self, ctx: &FileContext<'a>) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
        Ok(Box::new(UnaryOperatorVisitor {
            ctx: *ctx,
            operator: UnaryOperator::TypeOf,
            message: NoValueTypeofMessage::TypeofValueViolation,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{run, Fixture};
    use rbxts_lint_core::syntax::{BinaryOperator, LiteralValue};

    #[test]
    fn test_detects_typeof_value() {
        let source = r#"if (typeof x === "number") {}"#;
        let mut fx = Fixture::new(source);
        let x = fx.ident("x");
        let typeof_x = fx.unary(UnaryOperator::TypeOf, x, "typeof x");
        let lit = fx.literal(LiteralValue::String("number".into()), r#""number""#);
        let cmp = fx.binary(BinaryOperator::StrictEq, typeof_x, lit);
        let stmt = fx.if_statement(cmp);
        let snapshot = fx.finish_untyped(vec![stmt]);

        let violations = run(NoValueTypeof::new(), &snapshot);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.column, 5);
        insta::assert_snapshot!(
            violations[0].message.as_str(),
            @"The typeof operator is not supported for values. Please use `typeIs(value, typeName)` instead."
        );
    }
}
