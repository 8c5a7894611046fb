//! Type predicates and their quantifiers.
//!
//! Leaf predicates classify a single, non-composite type. [`is_definitely`]
//! and [`is_possibly`] lift a leaf predicate across unions, intersections,
//! type-parameter constraints and class/interface base-type chains.
//!
//! Quantification:
//!
//! | Shape | `is_definitely` | `is_possibly` |
//! |---|---|---|
//! | `A \| B` | every member | some member |
//! | `A & B` | some member | some member |
//! | `T extends C` | uses `C` | uses `C` |
//! | unconstrained `T`, `any`, `unknown` | leaf only | always true |
//! | object with no own members | leaf or any transitive base | always true |
//! | class/interface | leaf or any transitive base | leaf or any transitive base |

use crate::semantic::{TypeChecker, TypeId, TypeKind};
use std::collections::HashSet;

/// Array wrapper types treated as array-like by name.
pub const ARRAY_TYPE_NAMES: &[&str] = &[
    "Array",
    "ReadonlyArray",
    "ReadVoxelsArray",
    "TemplateStringsArray",
];

/// True only if `predicate` holds for every union alternative and for at
/// least one intersection facet, or for some transitive base type.
pub fn is_definitely<C, P>(checker: &C, ty: TypeId, predicate: P) -> bool
where
    C: TypeChecker + ?Sized,
    P: Fn(TypeId) -> bool,
{
    definitely(checker, ty, &predicate, &mut HashSet::new())
}

/// True if `predicate` holds for any union or intersection member or any
/// transitive base type, and conservatively for types the checker cannot
/// refine further.
pub fn is_possibly<C, P>(checker: &C, ty: TypeId, predicate: P) -> bool
where
    C: TypeChecker + ?Sized,
    P: Fn(TypeId) -> bool,
{
    possibly(checker, ty, &predicate, &mut HashSet::new())
}

fn definitely<C, P>(checker: &C, ty: TypeId, predicate: &P, visited: &mut HashSet<TypeId>) -> bool
where
    C: TypeChecker + ?Sized,
    P: Fn(TypeId) -> bool,
{
    let ty = checker.base_constraint(ty).unwrap_or(ty);
    if !visited.insert(ty) {
        return false;
    }
    let Some(data) = checker.type_data(ty) else {
        return false;
    };
    let result = match &data.kind {
        TypeKind::Union { types } => {
            !types.is_empty() && types.iter().all(|t| definitely(checker, *t, predicate, visited))
        }
        TypeKind::Intersection { types } => {
            types.iter().any(|t| definitely(checker, *t, predicate, visited))
        }
        TypeKind::Object(object) => {
            predicate(ty)
                || object
                    .base_types
                    .iter()
                    .any(|base| definitely(checker, *base, predicate, visited))
        }
        _ => predicate(ty),
    };
    // `visited` holds the current path only; sibling branches may share bases.
    visited.remove(&ty);
    result
}

fn possibly<C, P>(checker: &C, ty: TypeId, predicate: &P, visited: &mut HashSet<TypeId>) -> bool
where
    C: TypeChecker + ?Sized,
    P: Fn(TypeId) -> bool,
{
    let ty = checker.base_constraint(ty).unwrap_or(ty);
    if !visited.insert(ty) {
        return false;
    }
    let Some(data) = checker.type_data(ty) else {
        return false;
    };
    let result = match &data.kind {
        TypeKind::Union { types } | TypeKind::Intersection { types } => {
            types.iter().any(|t| possibly(checker, *t, predicate, visited))
        }
        TypeKind::TypeParameter { .. } | TypeKind::Any | TypeKind::Unknown => true,
        TypeKind::Object(object) if object.members.is_empty() => true,
        TypeKind::Object(object) => {
            predicate(ty)
                || object
                    .base_types
                    .iter()
                    .any(|base| possibly(checker, *base, predicate, visited))
        }
        _ => predicate(ty),
    };
    visited.remove(&ty);
    result
}

fn kind_of<C: TypeChecker + ?Sized>(checker: &C, ty: TypeId) -> Option<&TypeKind> {
    checker.type_data(ty).map(|t| &t.kind)
}

/// `any` or `unknown`.
pub fn is_any<C: TypeChecker + ?Sized>(checker: &C, ty: TypeId) -> bool {
    matches!(kind_of(checker, ty), Some(TypeKind::Any | TypeKind::Unknown))
}

/// `any` alone, the erased type the dialect forbids.
pub fn is_explicit_any<C: TypeChecker + ?Sized>(checker: &C, ty: TypeId) -> bool {
    matches!(kind_of(checker, ty), Some(TypeKind::Any))
}

/// `boolean` or a boolean literal.
pub fn is_boolean<C: TypeChecker + ?Sized>(checker: &C, ty: TypeId) -> bool {
    matches!(
        kind_of(checker, ty),
        Some(TypeKind::Boolean | TypeKind::BooleanLiteral { .. })
    )
}

/// A boolean that may hold `value`: the literal `value` or widened `boolean`.
pub fn is_boolean_literal<C: TypeChecker + ?Sized>(checker: &C, ty: TypeId, value: bool) -> bool {
    match kind_of(checker, ty) {
        Some(TypeKind::Boolean) => true,
        Some(TypeKind::BooleanLiteral { value: v }) => *v == value,
        _ => false,
    }
}

/// `number` or a numeric literal.
pub fn is_number<C: TypeChecker + ?Sized>(checker: &C, ty: TypeId) -> bool {
    matches!(
        kind_of(checker, ty),
        Some(TypeKind::Number | TypeKind::NumberLiteral { .. })
    )
}

/// Exactly the numeric literal `value`.
#[allow(clippy::float_cmp)]
pub fn is_number_literal<C: TypeChecker + ?Sized>(checker: &C, ty: TypeId, value: f64) -> bool {
    matches!(kind_of(checker, ty), Some(TypeKind::NumberLiteral { value: v }) if *v == value)
}

/// Numeric but not a provable literal, so it could hold `NaN`.
pub fn is_nan<C: TypeChecker + ?Sized>(checker: &C, ty: TypeId) -> bool {
    match kind_of(checker, ty) {
        Some(TypeKind::Number) => true,
        Some(TypeKind::NumberLiteral { value }) => value.is_nan(),
        _ => false,
    }
}

/// `bigint` or a bigint literal.
pub fn is_bigint<C: TypeChecker + ?Sized>(checker: &C, ty: TypeId) -> bool {
    matches!(
        kind_of(checker, ty),
        Some(TypeKind::BigInt | TypeKind::BigIntLiteral { .. })
    )
}

/// `number`, `bigint`, or one of their literals.
pub fn is_numeric<C: TypeChecker + ?Sized>(checker: &C, ty: TypeId) -> bool {
    is_number(checker, ty) || is_bigint(checker, ty)
}

/// `string` or a string literal.
pub fn is_string<C: TypeChecker + ?Sized>(checker: &C, ty: TypeId) -> bool {
    matches!(
        kind_of(checker, ty),
        Some(TypeKind::String | TypeKind::StringLiteral { .. })
    )
}

/// A string that may hold `value`: the literal `value` or widened `string`.
pub fn is_string_literal<C: TypeChecker + ?Sized>(checker: &C, ty: TypeId, value: &str) -> bool {
    match kind_of(checker, ty) {
        Some(TypeKind::String) => true,
        Some(TypeKind::StringLiteral { value: v }) => v == value,
        _ => false,
    }
}

/// The literal `""`, or widened `string`.
pub fn is_empty_string<C: TypeChecker + ?Sized>(checker: &C, ty: TypeId) -> bool {
    is_string_literal(checker, ty, "")
}

/// `undefined` or `void`.
pub fn is_undefined<C: TypeChecker + ?Sized>(checker: &C, ty: TypeId) -> bool {
    matches!(
        kind_of(checker, ty),
        Some(TypeKind::Undefined | TypeKind::Void)
    )
}

/// A class, interface or object literal type.
pub fn is_object<C: TypeChecker + ?Sized>(checker: &C, ty: TypeId) -> bool {
    matches!(kind_of(checker, ty), Some(TypeKind::Object(_)))
}

/// Tuples, arrays, and the named array wrapper types.
pub fn is_array<C: TypeChecker + ?Sized>(checker: &C, ty: TypeId) -> bool {
    match kind_of(checker, ty) {
        Some(TypeKind::Array { .. } | TypeKind::Tuple { .. }) => true,
        Some(_) => checker
            .symbol_name(ty)
            .is_some_and(|name| ARRAY_TYPE_NAMES.contains(&name)),
        None => false,
    }
}
