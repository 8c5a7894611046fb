//! Context types for rule execution.

use crate::semantic::{TypeChecker, TypeId};
use crate::syntax::{NodeId, Span, SyntaxTree};
use std::path::Path;

/// Errors raised while creating or running a rule.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum LintError {
    /// A type-aware rule ran without a type checker.
    #[error(
        "rule '{rule}' requires type information, but the host did not provide a type checker"
    )]
    #[diagnostic(
        code(rbxts_lint::missing_type_information),
        help("configure the host to produce semantic information (e.g. set `parserOptions.project` to your tsconfig.json) or disable '{rule}'")
    )]
    MissingTypeInformation {
        /// Name of the rule that needed types.
        rule: &'static str,
    },
}

/// Context provided to rules for one file.
///
/// Holds the host's syntax tree and, when available, its type checker. Both
/// are read-only for the duration of the analysis.
#[derive(Clone, Copy)]
pub struct FileContext<'a> {
    /// Path of the file, as given by the host.
    pub path: &'a Path,
    /// File contents.
    pub content: &'a str,
    /// Parsed syntax tree.
    pub tree: &'a SyntaxTree,
    checker: Option<&'a dyn TypeChecker>,
}

impl std::fmt::Debug for FileContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileContext")
            .field("path", &self.path)
            .field("nodes", &self.tree.len())
            .field("has_checker", &self.checker.is_some())
            .finish()
    }
}

impl<'a> FileContext<'a> {
    /// Creates a syntax-only context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, tree: &'a SyntaxTree) -> Self {
        Self {
            path,
            content,
            tree,
            checker: None,
        }
    }

    /// Attaches the host's type checker.
    #[must_use]
    pub fn with_checker(mut self, checker: &'a dyn TypeChecker) -> Self {
        self.checker = Some(checker);
        self
    }

    /// Returns true if a type checker is attached.
    #[must_use]
    pub fn has_checker(&self) -> bool {
        self.checker.is_some()
    }

    /// Returns the type checker for a type-aware rule.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::MissingTypeInformation`] when the host did not
    /// provide one.
    pub fn checker(&self, rule: &'static str) -> Result<&'a dyn TypeChecker, LintError> {
        self.checker
            .ok_or(LintError::MissingTypeInformation { rule })
    }

    /// Source text of a span, or `""` if it is out of bounds.
    #[must_use]
    pub fn text(&self, span: Span) -> &'a str {
        self.content.get(span.start..span.end).unwrap_or("")
    }

    /// Source text of a node.
    #[must_use]
    pub fn node_text(&self, node: NodeId) -> &'a str {
        self.text(self.tree.span(node))
    }
}

/// Type of a node, looked up on its outermost wrapper so `(x as T)` and
/// `x!` report the type the surrounding code sees.
#[must_use]
pub fn type_of(tree: &SyntaxTree, checker: &dyn TypeChecker, node: NodeId) -> Option<TypeId> {
    let outer = tree.skip_upwards(node);
    checker.type_at(outer).or_else(|| checker.type_at(node))
}

/// Like [`type_of`], but resolved to the base constraint of type parameters.
#[must_use]
pub fn constrained_type_of(
    tree: &SyntaxTree,
    checker: &dyn TypeChecker,
    node: NodeId,
) -> Option<TypeId> {
    let ty = type_of(tree, checker, node)?;
    Some(checker.base_constraint(ty).unwrap_or(ty))
}
