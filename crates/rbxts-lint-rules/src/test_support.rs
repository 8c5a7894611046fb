//! Fixture builder shared by rule tests.
//!
//! A fixture is a snippet of source text plus the tree and types a host
//! would produce for it. Node spans are located by searching the source, so
//! tests read close to the code they describe.

#![allow(clippy::expect_used)]

use rbxts_lint_core::semantic::{SymbolId, TypeKind};
use rbxts_lint_core::syntax::{BinaryOperator, LiteralValue, LogicalOperator, UnaryOperator};
use rbxts_lint_core::{
    apply_fixes, Analyzer, HostSnapshot, NodeId, NodeKind, Rule, SemanticModel, Span, TreeBuilder,
    TypeId, TypeStore, Violation,
};
use std::path::PathBuf;

pub(crate) struct Fixture {
    pub source: String,
    pub tree: TreeBuilder,
    pub store: TypeStore,
    types: Vec<(NodeId, TypeId)>,
    symbols: Vec<(NodeId, SymbolId)>,
}

impl Fixture {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            tree: TreeBuilder::new(),
            store: TypeStore::new(),
            types: Vec::new(),
            symbols: Vec::new(),
        }
    }

    /// Span of the `nth` (0-based) occurrence of `needle`.
    pub fn span_nth(&self, needle: &str, nth: usize) -> Span {
        let start = self
            .source
            .match_indices(needle)
            .nth(nth)
            .map(|(i, _)| i)
            .unwrap_or_else(|| panic!("`{needle}` #{nth} not found in `{}`", self.source));
        Span::new(start, start + needle.len())
    }

    pub fn span(&self, needle: &str) -> Span {
        self.span_nth(needle, 0)
    }

    /// Pushes a node spanning the first occurrence of `text`.
    pub fn node(&mut self, kind: NodeKind, text: &str) -> NodeId {
        let span = self.span(text);
        self.tree.push(kind, span)
    }

    pub fn ident(&mut self, name: &str) -> NodeId {
        self.ident_nth(name, 0)
    }

    pub fn ident_nth(&mut self, name: &str, nth: usize) -> NodeId {
        let span = self.span_nth(name, nth);
        self.tree.ident(name, span)
    }

    pub fn typed_ident(&mut self, name: &str, ty: TypeId) -> NodeId {
        let id = self.ident(name);
        self.set_type(id, ty);
        id
    }

    pub fn literal(&mut self, value: LiteralValue, text: &str) -> NodeId {
        let span = self.span(text);
        self.tree.literal(value, span)
    }

    pub fn binary(&mut self, operator: BinaryOperator, left: NodeId, right: NodeId) -> NodeId {
        self.tree.binary(operator, left, right)
    }

    pub fn logical(&mut self, operator: LogicalOperator, left: NodeId, right: NodeId) -> NodeId {
        self.tree.logical(operator, left, right)
    }

    pub fn unary(&mut self, operator: UnaryOperator, argument: NodeId, text: &str) -> NodeId {
        self.node(NodeKind::Unary { operator, argument }, text)
    }

    pub fn member(&mut self, object: NodeId, property: NodeId, computed: bool, text: &str) -> NodeId {
        self.node(
            NodeKind::Member {
                object,
                property,
                computed,
            },
            text,
        )
    }

    pub fn call(&mut self, callee: NodeId, arguments: Vec<NodeId>, text: &str) -> NodeId {
        self.node(NodeKind::Call { callee, arguments }, text)
    }

    /// `if (test) {}` spanning the whole source.
    pub fn if_statement(&mut self, test: NodeId) -> NodeId {
        let end = self.source.len();
        let block = self.tree.push(NodeKind::Block { body: vec![] }, Span::empty(end));
        self.tree.push(
            NodeKind::If {
                test,
                consequent: block,
                alternate: None,
            },
            Span::new(0, end),
        )
    }

    pub fn statement(&mut self, expression: NodeId) -> NodeId {
        self.tree.expression_statement(expression)
    }

    pub fn set_type(&mut self, node: NodeId, ty: TypeId) {
        self.types.push((node, ty));
    }

    pub fn set_symbol(&mut self, node: NodeId, symbol: SymbolId) {
        self.symbols.push((node, symbol));
    }

    pub fn kind(&mut self, kind: TypeKind) -> TypeId {
        self.store.add_kind(kind)
    }

    /// Finishes with a program root over `body`.
    pub fn finish(self, body: Vec<NodeId>) -> HostSnapshot {
        self.finish_with(body, true)
    }

    /// Finishes without a semantic model, as a host without type
    /// information would.
    pub fn finish_untyped(self, body: Vec<NodeId>) -> HostSnapshot {
        self.finish_with(body, false)
    }

    fn finish_with(mut self, body: Vec<NodeId>, typed: bool) -> HostSnapshot {
        let end = self.source.len();
        let root = self.tree.push(NodeKind::Program { body }, Span::new(0, end));
        let mut model = SemanticModel::new(self.store);
        for (node, ty) in self.types {
            model.set_type(node, ty);
        }
        for (node, symbol) in self.symbols {
            model.set_symbol(node, symbol);
        }
        HostSnapshot {
            path: PathBuf::from("src/test.ts"),
            source: self.source,
            tree: self.tree.finish(root),
            semantic: typed.then_some(model),
        }
    }
}

/// Runs one rule over a snapshot.
pub(crate) fn run(rule: impl Rule + 'static, snapshot: &HostSnapshot) -> Vec<Violation> {
    Analyzer::builder()
        .rule(rule)
        .build()
        .analyze_file(&snapshot.context())
        .expect("rule should run")
}

/// Applies every fix carried by `violations`.
pub(crate) fn fixed(snapshot: &HostSnapshot, violations: &[Violation]) -> String {
    apply_fixes(
        &snapshot.source,
        violations.iter().filter_map(|v| v.fix.as_ref()),
    )
    .output
}

/// Message ids of `violations`, in report order.
pub(crate) fn ids(violations: &[Violation]) -> Vec<&str> {
    violations.iter().map(|v| v.message_id.as_str()).collect()
}
