//! Rule to forbid using values of type `any`.
//!
//! # Rationale
//!
//! The compiler emits Lua based on the static type of an operand. A value
//! typed `any` gives it nothing to go on, so operators, calls and property
//! access on it cannot be compiled faithfully.
//!
//! # Detected Patterns
//!
//! An operand whose type is definitely `any`, in any of these positions:
//!
//! - either side of a binary expression
//! - the operand of a prefix `!`, `-`, `+`, `~` or of `++`/`--`
//! - the callee and each argument of a call or `new`
//! - a spread argument
//! - the object of a member access, and the key of a computed access

use rbxts_lint_core::syntax::UnaryOperator;
use rbxts_lint_core::utils::types::{is_definitely, is_explicit_any};
use rbxts_lint_core::{
    type_of, FileContext, LintError, Message, NodeId, NodeKind, NodeVisitor, Reporter, Rule,
    Severity, TypeChecker,
};

/// Rule code for no-any.
pub const CODE: &str = "RBX001";

/// Rule name for no-any.
pub const NAME: &str = "no-any";

/// Messages of [`NoAny`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoAnyMessage {
    /// An `any`-typed operand.
    AnyViolation,
}

impl Message for NoAnyMessage {
    fn id(self) -> &'static str {
        "anyViolation"
    }

    fn template(self) -> &'static str {
        "Using values of type `any` is not supported! Use `unknown` instead."
    }
}

/// Forbids operating on `any`-typed values.
#[derive(Debug, Clone)]
pub struct NoAny {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoAny {
    fn default() -> Self {
        Self::new()
    }
}

impl NoAny {
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

impl Rule for NoAny {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Bans values of type `any` from being used"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> Vec<(&'static str, &'static str)> {
        let m = NoAnyMessage::AnyViolation;
        vec![(m.id(), m.template())]
    }

    fn requires_type_checking(&self) -> bool {
        true
    }

    fn create<'a>(&self, ctx: &FileContext<'a>) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
        let checker = ctx.checker(NAME)?;
        Ok(Box::new(AnyVisitor { ctx: *ctx, checker }))
    }
}

struct AnyVisitor<'a> {
    ctx: FileContext<'a>,
    checker: &'a dyn TypeChecker,
}

impl AnyVisitor<'_> {
    fn operands(&self, node: NodeId) -> Vec<NodeId> {
        let Some(kind) = self.ctx.tree.kind(node) else {
            return Vec::new();
        };
        match kind {
            NodeKind::Binary { left, right, .. } => vec![*left, *right],
            NodeKind::Unary { operator, argument } => match operator {
                UnaryOperator::Not
                | UnaryOperator::Minus
                | UnaryOperator::Plus
                | UnaryOperator::BitNot => vec![*argument],
                UnaryOperator::TypeOf | UnaryOperator::Void | UnaryOperator::Delete => Vec::new(),
            },
            NodeKind::Update { argument, .. } | NodeKind::Spread { argument } => vec![*argument],
            NodeKind::Call { callee, arguments } | NodeKind::New { callee, arguments } => {
                std::iter::once(*callee).chain(arguments.iter().copied()).collect()
            }
            NodeKind::Member {
                object,
                property,
                computed,
            } => {
                if *computed {
                    vec![*object, *property]
                } else {
                    vec![*object]
                }
            }
            _ => Vec::new(),
        }
    }
}

impl NodeVisitor for AnyVisitor<'_> {
    fn visit(&mut self, node: NodeId, reporter: &mut Reporter<'_>) {
        for operand in self.operands(node) {
            let Some(ty) = type_of(self.ctx.tree, self.checker, operand) else {
                continue;
            };
            if is_definitely(self.checker, ty, |t| is_explicit_any(self.checker, t)) {
                reporter.report(operand, NoAnyMessage::AnyViolation);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{run, Fixture};
    use rbxts_lint_core::semantic::TypeKind;
    use rbxts_lint_core::syntax::BinaryOperator;

    #[test]
    fn test_detects_any_operand() {
        let mut fx = Fixture::new("a + b;");
        let any = fx.kind(TypeKind::Any);
        let num = fx.store.number();
        let a = fx.typed_ident("a", any);
        let b = fx.typed_ident("b", num);
        let sum = fx.binary(BinaryOperator::Add, a, b);
        let stmt = fx.statement(sum);
        let snapshot = fx.finish(vec![stmt]);

        let violations = run(NoAny::new(), &snapshot);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.offset, 0);
        assert_eq!(violations[0].code, CODE);
    }

    #[test]
    fn test_detects_any_callee_and_arguments() {
        let mut fx = Fixture::new("f(x, y);");
        let any = fx.kind(TypeKind::Any);
        let unknown = fx.kind(TypeKind::Unknown);
        let f = fx.typed_ident("f", any);
        let x = fx.typed_ident("x", any);
        let y = fx.typed_ident("y", unknown);
        let call = fx.call(f, vec![x, y], "f(x, y)");
        let stmt = fx.statement(call);
        let snapshot = fx.finish(vec![stmt]);

        let offsets: Vec<_> = run(NoAny::new(), &snapshot)
            .iter()
            .map(|v| v.location.offset)
            .collect();
        assert_eq!(offsets, vec![0, 2]);
    }

    #[test]
    fn test_computed_member_key() {
        let mut fx = Fixture::new("t[k];");
        let any = fx.kind(TypeKind::Any);
        let table = fx.kind(TypeKind::Unknown);
        let t = fx.typed_ident("t", table);
        let k = fx.typed_ident("k", any);
        let access = fx.member(t, k, true, "t[k]");
        let stmt = fx.statement(access);
        let snapshot = fx.finish(vec![stmt]);
        assert_eq!(run(NoAny::new(), &snapshot).len(), 1);
    }

    #[test]
    fn test_union_with_any_member_is_not_definitely_any() {
        let mut fx = Fixture::new("-v;");
        let any = fx.kind(TypeKind::Any);
        let num = fx.store.number();
        let union = fx.store.union(vec![any, num]);
        let v = fx.typed_ident("v", union);
        let neg = fx.unary(UnaryOperator::Minus, v, "-v");
        let stmt = fx.statement(neg);
        let snapshot = fx.finish(vec![stmt]);
        assert!(run(NoAny::new(), &snapshot).is_empty());
    }

    #[test]
    fn test_constrained_type_parameter() {
        let mut fx = Fixture::new("!t;");
        let any = fx.kind(TypeKind::Any);
        let param = fx.store.type_parameter("T", Some(any));
        let t = fx.typed_ident("t", param);
        let not = fx.unary(UnaryOperator::Not, t, "!t");
        let stmt = fx.statement(not);
        let snapshot = fx.finish(vec![stmt]);
        assert_eq!(run(NoAny::new(), &snapshot).len(), 1);
    }

    #[test]
    fn test_requires_type_information() {
        let mut fx = Fixture::new("a;");
        let a = fx.ident("a");
        let stmt = fx.statement(a);
        let snapshot = fx.finish_untyped(vec![stmt]);
        let err = NoAny::new()
            .create(&snapshot.context())
            .err()
            .expect("no checker");
        assert!(matches!(err, LintError::MissingTypeInformation { rule: NAME }));
    }
}
