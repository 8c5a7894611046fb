//! # rbxts-lint-rules
//!
//! Built-in lint rules for rbxts-lint.
//!
//! These rules flag TypeScript that the roblox-ts compiler cannot translate
//! faithfully to Luau. Most of them are driven by the host's type checker.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | RBX001 | `no-any` | Forbids operating on values of type `any` |
//! | RBX002 | `misleading-luatuple-checks` | Forbids `LuaTuple` values in conditions |
//! | RBX003 | `lua-truthiness` | Flags `0`, `NaN` and `""` in truthiness checks |
//! | RBX004 | `no-object-math` | Forbids math operators on Roblox data types |
//! | RBX005 | `restrict-comparisons` | Restricts `<`/`>` to strings or numbers |
//! | RBX006 | `no-array-pairs` | Forbids `pairs()`/`ipairs()` over arrays |
//! | RBX007 | `no-null` | Forbids `null` |
//! | RBX008 | `no-for-in` | Forbids for-in loops |
//! | RBX009 | `no-delete` | Forbids the `delete` operator |
//! | RBX010 | `no-value-typeof` | Forbids `typeof` on values |
//! | RBX011 | `no-global-this` | Forbids `globalThis` |
//! | RBX012 | `no-prototype` | Forbids `prototype` access |
//! | RBX013 | `no-regex` | Forbids regex literals |
//! | RBX014 | `no-rbx-postfix-new` | Rewrites `X.new()` on data types to `new X()` |
//! | RBX015 | `module` | Requires every file to be a module |
//! | RBX016 | `no-getters-or-setters` | Forbids `get`/`set` accessors |
//! | RBX017 | `no-spread-destructuring` | Forbids `...rest` in array destructuring |
//! | RBX018 | `no-preceding-spread-element` | Requires a spread argument to come last |
//! | RBX019 | `no-private-identifier` | Forbids `#private` fields |
//! | RBX020 | `no-function-expression-id` | Forbids named function expressions |
//! | RBX021 | `no-namespace-merging` | Forbids merging runtime namespaces |
//! | RBX022 | `no-enum-merging` | Forbids enum declaration merging |
//! | RBX023 | `no-export-assignment-let` | Forbids `export =` of a `let` variable |
//!
//! ## Usage
//!
//! ```ignore
//! use rbxts_lint_core::{Analyzer, HostSnapshot};
//! use rbxts_lint_rules::{LuaTruthiness, NoObjectMath};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(LuaTruthiness::new())
//!     .rule(NoObjectMath::new())
//!     .build();
//! let result = analyzer.analyze(&[HostSnapshot::from_file("out/main.json".as_ref())?])?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod lua_truthiness;
pub mod misleading_luatuple_checks;
pub mod module;
pub mod no_any;
pub mod no_array_pairs;
pub mod no_delete;
pub mod no_enum_merging;
pub mod no_export_assignment_let;
pub mod no_for_in;
pub mod no_function_expression_id;
pub mod no_getters_or_setters;
pub mod no_global_this;
pub mod no_namespace_merging;
pub mod no_null;
pub mod no_object_math;
pub mod no_preceding_spread_element;
pub mod no_private_identifier;
pub mod no_prototype;
pub mod no_rbx_postfix_new;
pub mod no_regex;
pub mod no_spread_destructuring;
pub mod no_value_typeof;
mod plugin;
mod presets;
pub mod restrict_comparisons;

#[cfg(test)]
mod test_support;

pub use lua_truthiness::{Falsiness, LuaTruthiness, LuaTruthinessMessage};
pub use misleading_luatuple_checks::{LuaTupleMessage, MisleadingLuaTupleChecks};
pub use module::{Module, ModuleMessage};
pub use no_any::{NoAny, NoAnyMessage};
pub use no_array_pairs::{ArrayPairsMessage, NoArrayPairs};
pub use no_delete::{NoDelete, NoDeleteMessage};
pub use no_enum_merging::{EnumMergingMessage, NoEnumMerging};
pub use no_export_assignment_let::{ExportAssignmentLetMessage, NoExportAssignmentLet};
pub use no_for_in::{NoForIn, NoForInMessage};
pub use no_function_expression_id::{FunctionExpressionIdMessage, NoFunctionExpressionId};
pub use no_getters_or_setters::{GetterSetterMessage, NoGettersOrSetters};
pub use no_global_this::{NoGlobalThis, NoGlobalThisMessage};
pub use no_namespace_merging::{NamespaceMergingMessage, NoNamespaceMerging};
pub use no_null::{NoNull, NoNullMessage};
pub use no_object_math::{NoObjectMath, ObjectMathMessage};
pub use no_preceding_spread_element::{NoPrecedingSpreadElement, PrecedingSpreadMessage};
pub use no_private_identifier::{NoPrivateIdentifier, PrivateIdentifierMessage};
pub use no_prototype::{NoPrototype, NoPrototypeMessage};
pub use no_rbx_postfix_new::{NoRbxPostfixNew, PostfixNewMessage};
pub use no_regex::{NoRegex, NoRegexMessage};
pub use no_spread_destructuring::{NoSpreadDestructuring, SpreadDestructuringMessage};
pub use no_value_typeof::{NoValueTypeof, NoValueTypeofMessage};
pub use plugin::{Plugin, PluginBuilder, PluginError, RuleLevel};
pub use presets::Preset;
pub use restrict_comparisons::{ComparisonMessage, RestrictComparisons};

/// Re-export core types for convenience.
pub use rbxts_lint_core::{Rule, Severity, Violation};
