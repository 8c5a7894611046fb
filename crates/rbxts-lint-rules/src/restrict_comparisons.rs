//! Rule to restrict relational comparisons to strings or numbers.
//!
//! # Rationale
//!
//! Luau's `<` only orders two strings or two numbers; anything else throws at
//! runtime. TypeScript happily compares mixed operands, and objects through
//! `valueOf`, which the compiled code cannot do implicitly.
//!
//! # Algorithm
//!
//! For `<`, `>`, `<=` and `>=`, both operand types are resolved to their
//! constraints and compared:
//!
//! - A union operand must be entirely numeric or entirely string-like
//!   (`nonNumericUnion`). Checking continues either way.
//! - Two primitives must both be assignable to exactly one of `string` and
//!   `number | bigint`, and to the same one (`badComparison`).
//! - An object and a primitive never compare (`badComparison`).
//! - Two objects each need a non-optional `valueOf` method
//!   (`valueOfLack`), declared as a real method rather than a function-typed
//!   property without a `this` parameter (`badValueOfFunctionType`), with a
//!   resolvable return type (`valueOfBadReturnType`). The comparison is then
//!   re-checked on the two return types, once: objects at that level are
//!   `recursiveValueOf`.
//!
//! Class methods named `valueOf` are also checked on their own: their return
//! type must be string-like or numeric, not both.

use rbxts_lint_core::semantic::{Declaration, DeclarationKind, Member, ObjectType, TypeKind};
use rbxts_lint_core::syntax::{BinaryOperator, LiteralValue};
use rbxts_lint_core::utils::types::{is_definitely, is_numeric, is_string};
use rbxts_lint_core::{
    constrained_type_of, type_of, FileContext, LintError, Message, NodeId, NodeKind, NodeVisitor,
    Reporter, Rule, Severity, TypeChecker, TypeId,
};
use std::collections::HashSet;

/// Rule code for restrict-comparisons.
pub const CODE: &str = "RBX005";

/// Rule name for restrict-comparisons.
pub const NAME: &str = "restrict-comparisons";

/// Name of the coercion method consulted for object operands.
pub const VALUE_OF: &str = "valueOf";

const ANONYMOUS_OBJECT: &str = "(Anonymous Object)";

/// Messages of [`RestrictComparisons`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonMessage {
    /// Operands are not both strings or both numeric.
    BadComparison,
    /// A union operand mixes strings and numbers, or holds neither.
    NonNumericUnion,
    /// An object operand has no usable `valueOf`.
    ValueOfLack,
    /// `valueOf` is a function property, not a method.
    BadValueOfFunctionType,
    /// `valueOf` returns something that is not exactly string or numeric.
    ValueOfBadReturnType,
    /// `valueOf` returns another object.
    RecursiveValueOf,
}

impl ComparisonMessage {
    const ALL: [Self; 6] = [
        Self::BadComparison,
        Self::NonNumericUnion,
        Self::ValueOfLack,
        Self::BadValueOfFunctionType,
        Self::ValueOfBadReturnType,
        Self::RecursiveValueOf,
    ];
}

impl Message for ComparisonMessage {
    fn id(self) -> &'static str {
        match self {
            Self::BadComparison => "badComparison",
            Self::NonNumericUnion => "nonNumericUnion",
            Self::ValueOfLack => "valueOfLack",
            Self::BadValueOfFunctionType => "badValueOfFunctionType",
            Self::ValueOfBadReturnType => "valueOfBadReturnType",
            Self::RecursiveValueOf => "recursiveValueOf",
        }
    }

    fn template(self) -> &'static str {
        match self {
            Self::BadComparison => {
                "Invalid comparison. Both values must either always be strings or always be numeric values, got: {{ leftType }} {{ operator }} {{ rightType }}"
            }
            Self::NonNumericUnion => {
                "Cannot compare values with union types which aren't `number | bigint`."
            }
            Self::ValueOfLack => {
                "The object referenced in this comparison lacks a non-optional `valueOf` method."
            }
            Self::BadValueOfFunctionType => {
                "`{{ name }}` has a `valueOf` function but it isn't a method. Try adding `this: {{ name }}` as the first parameter."
            }
            Self::ValueOfBadReturnType => {
                "`valueOf` must return a value castable to either `string` or `number | bigint` and not both."
            }
            Self::RecursiveValueOf => {
                "Cannot recursively evaluate valueOf. Try calling `.valueOf()` on the objects being compared."
            }
        }
    }
}

/// Restricts `<`, `>`, `<=` and `>=` to string or numeric operands.
#[derive(Debug, Clone)]
pub struct RestrictComparisons {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for RestrictComparisons {
    fn default() -> Self {
        Self::new()
    }
}

impl RestrictComparisons {
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

impl Rule for RestrictComparisons {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Bans comparison expressions between unions"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> Vec<(&'static str, &'static str)> {
        ComparisonMessage::ALL
            .into_iter()
            .map(|m| (m.id(), m.template()))
            .collect()
    }

    fn requires_type_checking(&self) -> bool {
        true
    }

    fn create<'a>(&self, ctx: &FileContext<'a>) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
        let checker = ctx.checker(NAME)?;
        Ok(Box::new(ComparisonVisitor { ctx: *ctx, checker }))
    }
}

/// Which primitive family a type is assignable to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Assignability {
    string: bool,
    numeric: bool,
}

impl Assignability {
    fn of(checker: &dyn TypeChecker, ty: TypeId) -> Self {
        Self {
            string: assignable(checker, ty, &is_string_kind, &mut HashSet::new()),
            numeric: assignable(checker, ty, &is_numeric_kind, &mut HashSet::new()),
        }
    }

    /// Exactly one family.
    fn is_unambiguous(self) -> bool {
        self.string != self.numeric
    }
}

fn is_string_kind(kind: &TypeKind) -> bool {
    matches!(kind, TypeKind::String | TypeKind::StringLiteral { .. })
}

fn is_numeric_kind(kind: &TypeKind) -> bool {
    matches!(
        kind,
        TypeKind::Number
            | TypeKind::NumberLiteral { .. }
            | TypeKind::BigInt
            | TypeKind::BigIntLiteral { .. }
    )
}

/// Assignability of `ty` to the primitive family described by `leaf`.
/// `any` and `never` are assignable to everything.
fn assignable(
    checker: &dyn TypeChecker,
    ty: TypeId,
    leaf: &dyn Fn(&TypeKind) -> bool,
    visited: &mut HashSet<TypeId>,
) -> bool {
    let ty = checker.base_constraint(ty).unwrap_or(ty);
    if !visited.insert(ty) {
        return false;
    }
    let Some(data) = checker.type_data(ty) else {
        return false;
    };
    let result = match &data.kind {
        TypeKind::Any | TypeKind::Never => true,
        TypeKind::Union { types } => {
            !types.is_empty() && types.iter().all(|t| assignable(checker, *t, leaf, visited))
        }
        TypeKind::Intersection { types } => {
            types.iter().any(|t| assignable(checker, *t, leaf, visited))
        }
        kind => leaf(kind),
    };
    visited.remove(&ty);
    result
}

fn parenthesize(rendered: String) -> String {
    if rendered.contains(' ') {
        format!("({rendered})")
    } else {
        rendered
    }
}

/// Outcome of inspecting one object's `valueOf`.
enum ValueOf {
    Missing,
    NotAMethod,
    NoReturnType,
    Returns(TypeId),
}

struct ComparisonVisitor<'a> {
    ctx: FileContext<'a>,
    checker: &'a dyn TypeChecker,
}

impl<'a> ComparisonVisitor<'a> {
    fn object(&self, ty: TypeId) -> Option<&'a ObjectType> {
        self.checker.type_data(ty).and_then(|t| t.as_object())
    }

    /// Finds `valueOf` on `ty` or its transitive bases.
    fn find_value_of(&self, ty: TypeId, visited: &mut HashSet<TypeId>) -> Option<&'a Member> {
        if !visited.insert(ty) {
            return None;
        }
        let object = self.object(ty)?;
        object
            .members
            .iter()
            .find(|member| member.name == VALUE_OF)
            .or_else(|| {
                object
                    .base_types
                    .iter()
                    .find_map(|base| self.find_value_of(*base, visited))
            })
    }

    fn is_void(&self, ty: Option<TypeId>) -> bool {
        ty.and_then(|t| self.checker.type_data(t))
            .is_some_and(|t| matches!(t.kind, TypeKind::Void))
    }

    /// A declaration callable with the object as its receiver.
    fn is_method_like(&self, declaration: &Declaration) -> bool {
        let receiver = declaration.parameters.first().filter(|p| p.is_this());
        match declaration.kind {
            DeclarationKind::Method
            | DeclarationKind::MethodSignature
            | DeclarationKind::ObjectLiteralMethod => {
                !receiver.is_some_and(|param| self.is_void(param.ty))
            }
            _ => receiver.is_some_and(|param| !self.is_void(param.ty)),
        }
    }

    fn value_of(&self, ty: TypeId) -> ValueOf {
        let Some(member) = self.find_value_of(ty, &mut HashSet::new()) else {
            return ValueOf::Missing;
        };
        if member.optional {
            return ValueOf::Missing;
        }
        let declarations = self
            .checker
            .symbol(member.symbol)
            .map(|s| s.declarations.as_slice())
            .unwrap_or_default();
        if !declarations.iter().all(|d| self.is_method_like(d)) {
            return ValueOf::NotAMethod;
        }
        match declarations.first().and_then(|d| d.return_type) {
            Some(ret) => ValueOf::Returns(ret),
            None => ValueOf::NoReturnType,
        }
    }

    fn report_bad_comparison(
        &self,
        node: NodeId,
        operator: BinaryOperator,
        left: TypeId,
        right: TypeId,
        reporter: &mut Reporter<'_>,
    ) {
        let left_type = parenthesize(self.checker.type_to_string(left));
        let right_type = parenthesize(self.checker.type_to_string(right));
        reporter.report_with(
            node,
            ComparisonMessage::BadComparison,
            &[
                ("leftType", left_type.as_str()),
                ("rightType", right_type.as_str()),
                ("operator", operator.as_str()),
            ],
            None,
        );
    }

    fn is_mixed_union(&self, ty: TypeId) -> bool {
        let checker = self.checker;
        let is_union = matches!(
            checker.type_data(ty).map(|t| &t.kind),
            Some(TypeKind::Union { .. })
        );
        is_union
            && !is_definitely(checker, ty, |t| is_numeric(checker, t))
            && !is_definitely(checker, ty, |t| is_string(checker, t))
    }

    fn check_types(
        &self,
        (node, operator): (NodeId, BinaryOperator),
        (left_node, right_node): (NodeId, NodeId),
        left: TypeId,
        right: TypeId,
        allow_objects: bool,
        reporter: &mut Reporter<'_>,
    ) {
        let left = self.checker.base_constraint(left).unwrap_or(left);
        let right = self.checker.base_constraint(right).unwrap_or(right);

        for side in [left, right] {
            if self.is_mixed_union(side) {
                reporter.report(node, ComparisonMessage::NonNumericUnion);
            }
        }

        match (self.object(left).is_some(), self.object(right).is_some()) {
            (true, true) => {
                if !allow_objects {
                    reporter.report(node, ComparisonMessage::RecursiveValueOf);
                    return;
                }
                let sides = [
                    (left_node, left, self.value_of(left)),
                    (right_node, right, self.value_of(right)),
                ];

                let mut lacking = false;
                for (operand, _, value_of) in &sides {
                    if matches!(value_of, ValueOf::Missing) {
                        reporter.report(*operand, ComparisonMessage::ValueOfLack);
                        lacking = true;
                    }
                }
                if lacking {
                    return;
                }

                for (operand, ty, value_of) in &sides {
                    if matches!(value_of, ValueOf::NotAMethod) {
                        let name = self.checker.symbol_name(*ty).unwrap_or(ANONYMOUS_OBJECT);
                        reporter.report_with(
                            *operand,
                            ComparisonMessage::BadValueOfFunctionType,
                            &[("name", name)],
                            None,
                        );
                        return;
                    }
                }

                let mut returns = Vec::with_capacity(2);
                for (operand, _, value_of) in &sides {
                    match value_of {
                        ValueOf::Returns(ret) => returns.push(*ret),
                        _ => {
                            reporter.report(*operand, ComparisonMessage::ValueOfBadReturnType);
                            return;
                        }
                    }
                }
                tracing::trace!(?returns, "comparing valueOf results");
                self.check_types(
                    (node, operator),
                    (left_node, right_node),
                    returns[0],
                    returns[1],
                    false,
                    reporter,
                );
            }
            (false, false) => {
                let l = Assignability::of(self.checker, left);
                let r = Assignability::of(self.checker, right);
                if !l.is_unambiguous() || !r.is_unambiguous() || l.string != r.string {
                    self.report_bad_comparison(node, operator, left, right, reporter);
                }
            }
            _ => self.report_bad_comparison(node, operator, left, right, reporter),
        }
    }

    fn check_value_of_definition(
        &self,
        node: NodeId,
        key: NodeId,
        value: NodeId,
        reporter: &mut Reporter<'_>,
    ) {
        let tree = self.ctx.tree;
        let named_value_of = match tree.kind(key) {
            Some(NodeKind::Identifier { name }) => name == VALUE_OF,
            Some(NodeKind::Literal {
                value: LiteralValue::String(text),
            }) => text == VALUE_OF,
            _ => false,
        };
        if !named_value_of {
            return;
        }
        let declared = self
            .checker
            .symbol_at(key)
            .and_then(|id| self.checker.symbol(id))
            .and_then(|symbol| symbol.declarations.first())
            .and_then(|decl| decl.return_type);
        let inferred = || {
            type_of(tree, self.checker, value).and_then(|ty| {
                match self.checker.type_data(ty).map(|t| &t.kind) {
                    Some(TypeKind::Function { return_type }) => *return_type,
                    _ => None,
                }
            })
        };
        let Some(ret) = declared.or_else(inferred) else {
            return;
        };
        if !Assignability::of(self.checker, ret).is_unambiguous() {
            reporter.report(node, ComparisonMessage::ValueOfBadReturnType);
        }
    }
}

impl NodeVisitor for ComparisonVisitor<'_> {
    fn visit(&mut self, node: NodeId, reporter: &mut Reporter<'_>) {
        let tree = self.ctx.tree;
        match tree.kind(node) {
            Some(NodeKind::Binary {
                operator,
                left,
                right,
            }) if operator.is_relational() => {
                let (Some(left_ty), Some(right_ty)) = (
                    constrained_type_of(tree, self.checker, *left),
                    constrained_type_of(tree, self.checker, *right),
                ) else {
                    return;
                };
                self.check_types(
                    (node, *operator),
                    (*left, *right),
                    left_ty,
                    right_ty,
                    true,
                    reporter,
                );
            }
            Some(NodeKind::MethodDefinition { key, value, .. }) => {
                self.check_value_of_definition(node, *key, *value, reporter);
            }
            _ => {}
        }
    }
}
