//! # rbxts-lint-core
//!
//! Core framework for type-aware roblox-ts lint rules.
//!
//! The host (a TypeScript parser plus checker) owns parsing and type
//! resolution. This crate defines the shape of what rules consume and the
//! machinery that runs them:
//!
//! - [`SyntaxTree`] and [`TypeChecker`], the host model
//! - [`Rule`] and [`NodeVisitor`], the per-file rule protocol
//! - [`Analyzer`] for orchestrating lint execution
//! - [`Violation`] and [`Fix`] for representing lint findings
//! - [`utils::types`], the type predicate library with its
//!   [`is_definitely`](utils::is_definitely) /
//!   [`is_possibly`](utils::is_possibly) quantifiers
//!
//! ## Example
//!
//! ```ignore
//! use rbxts_lint_core::{Analyzer, HostSnapshot};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(MyRule::new())
//!     .build();
//!
//! let snapshot = HostSnapshot::from_file("out/main.json".as_ref())?;
//! let result = analyzer.analyze(&[snapshot])?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod fix;
mod rule;
mod snapshot;
mod types;

pub mod semantic;
pub mod syntax;
/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{is_snapshot_path, Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{Config, ConfigError, RuleConfig, RULE_PREFIX};
pub use context::{constrained_type_of, type_of, FileContext, LintError};
pub use fix::{apply_fixes, FixOutput};
pub use rule::{render_message, Message, NodeVisitor, Reporter, Rule, RuleBox};
pub use semantic::{SemanticModel, TypeChecker, TypeId, TypeStore};
pub use snapshot::{HostSnapshot, SnapshotError};
pub use syntax::{NodeId, NodeKind, Span, SyntaxTree, TreeBuilder, TreeError};
pub use types::{Fix, LintResult, Location, Severity, TextEdit, Violation, ViolationDiagnostic};
