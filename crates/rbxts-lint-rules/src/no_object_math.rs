//! Rule to forbid arithmetic operators on Roblox data types.
//!
//! # Rationale
//!
//! Data types such as `Vector3` overload `+` in Luau but are plain objects in
//! TypeScript, so the compiler requires the explicit method form.
//!
//! # Detected Patterns
//!
//! A binary expression whose left operand is one of [`DATA_TYPES`]:
//!
//! - `+ - * /` are reported with a fix to `a.add(b)` (resp. `sub`, `mul`, `div`)
//! - `===` and `!==` are allowed
//! - any other operator is reported without a fix

use rbxts_lint_core::syntax::BinaryOperator;
use rbxts_lint_core::{
    constrained_type_of, FileContext, Fix, LintError, Message, NodeId, NodeKind, NodeVisitor,
    Reporter, Rule, Severity, Span, TextEdit, TypeChecker,
};

/// Rule code for no-object-math.
pub const CODE: &str = "RBX004";

/// Rule name for no-object-math.
pub const NAME: &str = "no-object-math";

/// Nominal names of the structured value types.
pub const DATA_TYPES: &[&str] = &[
    "CFrame",
    "UDim",
    "UDim2",
    "Vector2",
    "Vector2int16",
    "Vector3",
    "Vector3int16",
];

/// Messages of [`NoObjectMath`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectMathMessage {
    /// `+`
    AddViolation,
    /// `-`
    SubViolation,
    /// `*`
    MulViolation,
    /// `/`
    DivViolation,
    /// Any other unsupported operator.
    OtherViolation,
}

impl ObjectMathMessage {
    const ALL: [Self; 5] = [
        Self::AddViolation,
        Self::SubViolation,
        Self::MulViolation,
        Self::DivViolation,
        Self::OtherViolation,
    ];

    /// Message and replacement method for an operator. `None` for the
    /// allowed equality operators.
    #[must_use]
    pub fn for_operator(operator: BinaryOperator) -> Option<(Self, Option<&'static str>)> {
        match operator {
            BinaryOperator::Add => Some((Self::AddViolation, Some("add"))),
            BinaryOperator::Sub => Some((Self::SubViolation, Some("sub"))),
            BinaryOperator::Mul => Some((Self::MulViolation, Some("mul"))),
            BinaryOperator::Div => Some((Self::DivViolation, Some("div"))),
            BinaryOperator::StrictEq | BinaryOperator::StrictNotEq => None,
            _ => Some((Self::OtherViolation, None)),
        }
    }
}

impl Message for ObjectMathMessage {
    fn id(self) -> &'static str {
        match self {
            Self::AddViolation => "addViolation",
            Self::SubViolation => "subViolation",
            Self::MulViolation => "mulViolation",
            Self::DivViolation => "divViolation",
            Self::OtherViolation => "otherViolation",
        }
    }

    fn template(self) -> &'static str {
        match self {
            Self::AddViolation => "Don't use `+` use .add() instead.",
            Self::SubViolation => "Don't use `-` use .sub() instead.",
            Self::MulViolation => "Don't use `*` use .mul() instead.",
            Self::DivViolation => "Don't use `/` use .div() instead.",
            Self::OtherViolation => "Cannot use this operator on a Roblox Data type.",
        }
    }
}

/// Forbids math operators on data types.
#[derive(Debug, Clone)]
pub struct NoObjectMath {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoObjectMath {
    fn default() -> Self {
        Self::new()
    }
}

impl NoObjectMath {
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

impl Rule for NoObjectMath {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Bans math operators from being used on data types"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> Vec<(&'static str, &'static str)> {
        ObjectMathMessage::ALL
            .into_iter()
            .map(|m| (m.id(), m.template()))
            .collect()
    }

    fn fixable(&self) -> bool {
        true
    }

    fn requires_type_checking(&self) -> bool {
        true
    }

    fn create<'a>(&self, ctx: &FileContext<'a>) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
        let checker = ctx.checker(NAME)?;
        Ok(Box::new(ObjectMathVisitor { ctx: *ctx, checker }))
    }
}

struct ObjectMathVisitor<'a> {
    ctx: FileContext<'a>,
    checker: &'a dyn TypeChecker,
}

impl NodeVisitor for ObjectMathVisitor<'_> {
    fn visit(&mut self, node: NodeId, reporter: &mut Reporter<'_>) {
        let tree = self.ctx.tree;
        let Some(NodeKind::Binary {
            operator,
            left,
            right,
        }) = tree.kind(node)
        else {
            return;
        };
        let is_data_type = constrained_type_of(tree, self.checker, *left)
            .and_then(|ty| self.checker.symbol_name(ty))
            .is_some_and(|name| DATA_TYPES.contains(&name));
        if !is_data_type {
            return;
        }
        let Some((message, method)) = ObjectMathMessage::for_operator(*operator) else {
            return;
        };
        let fix = method.map(|method| {
            let gap = Span::new(tree.span(*left).end, tree.span(*right).start);
            Fix::new(vec![
                TextEdit::replace(gap, format!(".{method}(")),
                TextEdit::insert_after(tree.span(*right), ")"),
            ])
        });
        reporter.report_with(node, message, &[], fix);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixed, ids, run, Fixture};
    use rbxts_lint_core::semantic::ObjectFlavor;
    use rbxts_lint_core::{HostSnapshot, Violation};

    fn vector_op(source: &str, operator: BinaryOperator) -> (HostSnapshot, Vec<Violation>) {
        let mut fx = Fixture::new(source);
        let vector = fx
            .store
            .object(Some("Vector3"), ObjectFlavor::Interface, vec![], vec![]);
        let a = fx.typed_ident("a", vector);
        let b = fx.typed_ident("b", vector);
        let expr = fx.binary(operator, a, b);
        let stmt = fx.statement(expr);
        let snapshot = fx.finish(vec![stmt]);
        let violations = run(NoObjectMath::new(), &snapshot);
        (snapshot, violations)
    }

    #[test]
    fn test_add_rewrites_to_method() {
        let (snapshot, violations) = vector_op("a + b;", BinaryOperator::Add);
        assert_eq!(ids(&violations), vec!["addViolation"]);
        assert_eq!(fixed(&snapshot, &violations), "a.add(b);");
    }

    #[test]
    fn test_sub_rewrites_to_method() {
        let (snapshot, violations) = vector_op("a - b;", BinaryOperator::Sub);
        assert_eq!(ids(&violations), vec!["subViolation"]);
        assert_eq!(fixed(&snapshot, &violations), "a.sub(b);");
    }

    #[test]
    fn test_mul_rewrites_to_method() {
        let (snapshot, violations) = vector_op("a * b;", BinaryOperator::Mul);
        assert_eq!(ids(&violations), vec!["mulViolation"]);
        assert_eq!(fixed(&snapshot, &violations), "a.mul(b);");
    }

    #[test]
    fn test_div_rewrites_to_method() {
        let (snapshot, violations) = vector_op("a / b;", BinaryOperator::Div);
        assert_eq!(ids(&violations), vec!["divViolation"]);
        assert_eq!(violations[0].message, "Don't use `/` use .div() instead.");
        assert_eq!(fixed(&snapshot, &violations), "a.div(b);");
    }

    #[test]
    fn test_strict_equality_is_allowed() {
        let (_, violations) = vector_op("a === b;", BinaryOperator::StrictEq);
        assert!(violations.is_empty());
    }

    #[test]
    fn test_other_operator_has_no_fix() {
        let (_, violations) = vector_op("a % b;", BinaryOperator::Rem);
        assert_eq!(ids(&violations), vec!["otherViolation"]);
        assert!(violations[0].fix.is_none());
    }

    #[test]
    fn test_chained_addition_fixes_compose() {
        // (a + b) + c: the inner fix ends where the outer one starts
        let mut fx = Fixture::new("a + b + c;");
        let vector = fx
            .store
            .object(Some("CFrame"), ObjectFlavor::Interface, vec![], vec![]);
        let a = fx.typed_ident("a", vector);
        let b = fx.typed_ident("b", vector);
        let c = fx.typed_ident("c", vector);
        let inner = fx.binary(BinaryOperator::Add, a, b);
        fx.set_type(inner, vector);
        let outer = fx.binary(BinaryOperator::Add, inner, c);
        let stmt = fx.statement(outer);
        let snapshot = fx.finish(vec![stmt]);

        let violations = run(NoObjectMath::new(), &snapshot);
        assert_eq!(violations.len(), 2);
        assert_eq!(fixed(&snapshot, &violations), "a.add(b).add(c);");
    }

    #[test]
    fn test_plain_numbers_are_ignored() {
        let mut fx = Fixture::new("a * b;");
        let n = fx.store.number();
        let a = fx.typed_ident("a", n);
        let b = fx.typed_ident("b", n);
        let expr = fx.binary(BinaryOperator::Mul, a, b);
        let stmt = fx.statement(expr);
        let snapshot = fx.finish(vec![stmt]);
        assert!(run(NoObjectMath::new(), &snapshot).is_empty());
    }
}
