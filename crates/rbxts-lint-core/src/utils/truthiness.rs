//! Locates expressions whose truthiness is evaluated by control flow.

use crate::syntax::{LogicalOperator, NodeId, NodeKind, SyntaxTree, UnaryOperator};

/// Returns the sub-expressions of `node` whose boolean-coerced value is
/// observed.
///
/// - Conditional expressions and `if`/`while`/`do`/`for` statements yield
///   their test, unless the test is itself a logical expression: that node is
///   located on its own visit, so testing its overall result here would
///   report the same check twice.
/// - `&&` and `||` yield both operands. `??` yields nothing.
/// - `!x` yields `x`.
#[must_use]
pub fn truthiness_sites(tree: &SyntaxTree, node: NodeId) -> Vec<NodeId> {
    let Some(kind) = tree.kind(node) else {
        return Vec::new();
    };
    match kind {
        NodeKind::If { .. }
        | NodeKind::While { .. }
        | NodeKind::DoWhile { .. }
        | NodeKind::For { .. }
        | NodeKind::Conditional { .. } => kind
            .test()
            .filter(|test| !is_logical(tree, *test))
            .into_iter()
            .collect(),
        NodeKind::Logical {
            operator: LogicalOperator::And | LogicalOperator::Or,
            left,
            right,
        } => vec![*left, *right],
        NodeKind::Unary {
            operator: UnaryOperator::Not,
            argument,
        } => vec![*argument],
        _ => Vec::new(),
    }
}

fn is_logical(tree: &SyntaxTree, node: NodeId) -> bool {
    matches!(
        tree.kind(tree.skip_downwards(node)),
        Some(NodeKind::Logical { .. })
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{Span, TreeBuilder};

    #[test]
    fn if_statement_yields_plain_test() {
        // if (x) {}
        let mut b = TreeBuilder::new();
        let x = b.ident("x", Span::new(4, 5));
        let block = b.push(NodeKind::Block { body: vec![] }, Span::new(7, 9));
        let stmt = b.push(
            NodeKind::If {
                test: x,
                consequent: block,
                alternate: None,
            },
            Span::new(0, 9),
        );
        let tree = b.finish(stmt);
        assert_eq!(truthiness_sites(&tree, stmt), vec![x]);
    }

    #[test]
    fn logical_test_is_left_to_the_logical_visit() {
        // while ((a && b)) {}
        let mut b = TreeBuilder::new();
        let a = b.ident("a", Span::new(8, 9));
        let rhs = b.ident("b", Span::new(13, 14));
        let and = b.logical(LogicalOperator::And, a, rhs);
        let paren = b.push(NodeKind::Parenthesized { expression: and }, Span::new(7, 15));
        let body = b.push(NodeKind::Block { body: vec![] }, Span::new(17, 19));
        let stmt = b.push(NodeKind::While { test: paren, body }, Span::new(0, 19));
        let tree = b.finish(stmt);
        assert!(truthiness_sites(&tree, stmt).is_empty());
        assert_eq!(truthiness_sites(&tree, and), vec![a, rhs]);
    }

    #[test]
    fn nullish_and_other_unary_operators_are_ignored() {
        let mut b = TreeBuilder::new();
        let a = b.ident("a", Span::new(0, 1));
        let rhs = b.ident("b", Span::new(5, 6));
        let nullish = b.logical(LogicalOperator::NullishCoalescing, a, rhs);
        let neg = b.push(
            NodeKind::Unary {
                operator: UnaryOperator::Minus,
                argument: a,
            },
            Span::new(0, 2),
        );
        let not = b.push(
            NodeKind::Unary {
                operator: UnaryOperator::Not,
                argument: rhs,
            },
            Span::new(4, 6),
        );
        let root = b.push(NodeKind::Other { children: vec![nullish, neg, not] }, Span::new(0, 6));
        let tree = b.finish(root);
        assert!(truthiness_sites(&tree, nullish).is_empty());
        assert!(truthiness_sites(&tree, neg).is_empty());
        assert_eq!(truthiness_sites(&tree, not), vec![rhs]);
    }

    #[test]
    fn endless_for_has_no_site() {
        let mut b = TreeBuilder::new();
        let body = b.push(NodeKind::Block { body: vec![] }, Span::new(9, 11));
        let stmt = b.push(
            NodeKind::For {
                init: None,
                test: None,
                update: None,
                body,
            },
            Span::new(0, 11),
        );
        let tree = b.finish(stmt);
        assert!(truthiness_sites(&tree, stmt).is_empty());
    }
}
