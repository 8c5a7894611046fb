//! Syntax tree model consumed by rules.
//!
//! The tree is produced by the host parser and handed to the analyzer as an
//! arena of [`Node`]s. Rules never build trees themselves; [`TreeBuilder`]
//! exists for host adapters and tests.

use serde::{Deserialize, Serialize};

/// Index of a node inside a [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Half-open byte range `[start, end)` in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset.
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Empty span at `offset`, used for insertions.
    #[must_use]
    pub const fn empty(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true for zero-length spans.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }
}

/// Operators of [`NodeKind::Binary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `**`
    Exp,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    LtEq,
    /// `>=`
    GtEq,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `===`
    StrictEq,
    /// `!==`
    StrictNotEq,
    /// `&`
    BitAnd,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `>>>`
    UShr,
    /// `in`
    In,
    /// `instanceof`
    InstanceOf,
}

impl BinaryOperator {
    /// Source spelling of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Exp => "**",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::StrictEq => "===",
            Self::StrictNotEq => "!==",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::UShr => ">>>",
            Self::In => "in",
            Self::InstanceOf => "instanceof",
        }
    }

    /// Returns true for `<`, `>`, `<=` and `>=`.
    #[must_use]
    pub const fn is_relational(self) -> bool {
        matches!(self, Self::Lt | Self::Gt | Self::LtEq | Self::GtEq)
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operators of [`NodeKind::Logical`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalOperator {
    /// `&&`
    And,
    /// `||`
    Or,
    /// `??`
    NullishCoalescing,
}

/// Operators of [`NodeKind::Unary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperator {
    /// `!`
    Not,
    /// `-`
    Minus,
    /// `+`
    Plus,
    /// `~`
    BitNot,
    /// `typeof`
    TypeOf,
    /// `void`
    Void,
    /// `delete`
    Delete,
}

/// Binding keyword of a [`NodeKind::VariableDeclaration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    /// `const`
    #[default]
    Const,
    /// `let`
    Let,
    /// `var`
    Var,
}

/// Flavor of a [`NodeKind::MethodDefinition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    /// Plain method.
    #[default]
    Method,
    /// `get name()`
    Get,
    /// `set name(value)`
    Set,
    /// Class constructor.
    Constructor,
}

impl MethodKind {
    /// True for `get` and `set` accessors.
    #[must_use]
    pub const fn is_accessor(self) -> bool {
        matches!(self, Self::Get | Self::Set)
    }
}

/// Literal values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum LiteralValue {
    /// `null`
    Null,
    /// `true` / `false`
    Boolean(bool),
    /// Numeric literal.
    Number(f64),
    /// String literal (unquoted contents).
    String(String),
    /// Regular expression literal source.
    Regex(String),
}

/// Shape of a syntax node.
///
/// This is a closed enumeration; rules dispatch on it with `match`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum NodeKind {
    /// Root of a file.
    Program {
        /// Top-level statements.
        body: Vec<NodeId>,
    },
    /// `{ ... }`
    Block {
        /// Statements.
        body: Vec<NodeId>,
    },
    /// `expr;`
    ExpressionStatement {
        /// The expression.
        expression: NodeId,
    },
    /// `let name = init;`
    VariableDeclaration {
        /// Binding keyword.
        #[serde(default, rename = "declaration")]
        kind: VariableKind,
        /// Binding identifier or pattern.
        id: NodeId,
        /// Initializer.
        init: Option<NodeId>,
    },
    /// `import ... from "..."` or `import x = require(...)`.
    Import {
        /// Imported bindings.
        #[serde(default)]
        specifiers: Vec<NodeId>,
    },
    /// `export ...`, `export { ... }` or `export default ...`.
    Export {
        /// Exported declaration or default expression.
        #[serde(default)]
        declaration: Option<NodeId>,
        /// Exported bindings.
        #[serde(default)]
        specifiers: Vec<NodeId>,
    },
    /// `export = expression;`
    ExportAssignment {
        /// Exported value.
        expression: NodeId,
    },
    /// `namespace id { ... }`
    ModuleDeclaration {
        /// Namespace name.
        id: NodeId,
        /// Namespace body.
        #[serde(default)]
        body: Option<NodeId>,
        /// True if the namespace holds values and so exists at runtime.
        #[serde(default)]
        instantiated: bool,
    },
    /// `enum id { ... }`
    EnumDeclaration {
        /// Enum name.
        id: NodeId,
        /// Members.
        #[serde(default)]
        members: Vec<NodeId>,
    },
    /// `if (test) consequent else alternate`
    If {
        /// Condition.
        test: NodeId,
        /// Then branch.
        consequent: NodeId,
        /// Else branch.
        alternate: Option<NodeId>,
    },
    /// `while (test) body`
    While {
        /// Condition.
        test: NodeId,
        /// Loop body.
        body: NodeId,
    },
    /// `do body while (test)`
    DoWhile {
        /// Loop body.
        body: NodeId,
        /// Condition.
        test: NodeId,
    },
    /// `for (init; test; update) body`
    For {
        /// Initializer.
        init: Option<NodeId>,
        /// Condition, absent for `for (;;)`.
        test: Option<NodeId>,
        /// Update expression.
        update: Option<NodeId>,
        /// Loop body.
        body: NodeId,
    },
    /// `for (left in right) body`
    ForIn {
        /// Loop binding.
        left: NodeId,
        /// Iterated object.
        right: NodeId,
        /// Loop body.
        body: NodeId,
    },
    /// `test ? consequent : alternate`
    Conditional {
        /// Condition.
        test: NodeId,
        /// Value when truthy.
        consequent: NodeId,
        /// Value when falsy.
        alternate: NodeId,
    },
    /// `left && right`, `left || right`, `left ?? right`
    Logical {
        /// Operator.
        operator: LogicalOperator,
        /// Left operand.
        left: NodeId,
        /// Right operand.
        right: NodeId,
    },
    /// Any other binary operator.
    Binary {
        /// Operator.
        operator: BinaryOperator,
        /// Left operand.
        left: NodeId,
        /// Right operand.
        right: NodeId,
    },
    /// Prefix unary operator.
    Unary {
        /// Operator.
        operator: UnaryOperator,
        /// Operand.
        argument: NodeId,
    },
    /// `++x`, `x--`, ...
    Update {
        /// True for `++`.
        increment: bool,
        /// True for prefix position.
        prefix: bool,
        /// Operand.
        argument: NodeId,
    },
    /// `callee(arguments)`
    Call {
        /// Called expression.
        callee: NodeId,
        /// Arguments.
        arguments: Vec<NodeId>,
    },
    /// `new callee(arguments)`
    New {
        /// Constructed expression.
        callee: NodeId,
        /// Arguments.
        arguments: Vec<NodeId>,
    },
    /// `object.property` or `object[property]`
    Member {
        /// Accessed object.
        object: NodeId,
        /// Property name or index expression.
        property: NodeId,
        /// True for `object[property]`.
        computed: bool,
    },
    /// `...argument`
    Spread {
        /// Spread expression.
        argument: NodeId,
    },
    /// `[a, , ...rest]` in binding position.
    ArrayPattern {
        /// Elements; holes are `None`.
        elements: Vec<Option<NodeId>>,
    },
    /// `...rest` in binding position.
    RestElement {
        /// Bound target.
        argument: NodeId,
    },
    /// `function id() {}` in expression position.
    FunctionExpression {
        /// Optional name.
        #[serde(default)]
        id: Option<NodeId>,
        /// Function body.
        body: NodeId,
    },
    /// `(expression)`
    Parenthesized {
        /// Inner expression.
        expression: NodeId,
    },
    /// `expression!`
    NonNull {
        /// Inner expression.
        expression: NodeId,
    },
    /// `expression as T`
    As {
        /// Inner expression.
        expression: NodeId,
    },
    /// Class or object-literal method.
    MethodDefinition {
        /// Method, accessor or constructor.
        #[serde(default, rename = "method")]
        kind: MethodKind,
        /// Method key.
        key: NodeId,
        /// Function body node.
        value: NodeId,
    },
    /// Class field.
    PropertyDefinition {
        /// Field key.
        key: NodeId,
        /// Initializer.
        #[serde(default)]
        value: Option<NodeId>,
    },
    /// An identifier.
    Identifier {
        /// Name.
        name: String,
    },
    /// `#name`
    PrivateIdentifier {
        /// Name without `#`.
        name: String,
    },
    /// A literal value.
    Literal {
        /// Value.
        value: LiteralValue,
    },
    /// `null` in type position.
    NullKeyword,
    /// Any construct the rules do not inspect.
    Other {
        /// Children in source order.
        children: Vec<NodeId>,
    },
}

impl NodeKind {
    /// Children in source order.
    #[must_use]
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Self::Program { body } | Self::Block { body } => body.clone(),
            Self::Other { children } => children.clone(),
            Self::ExpressionStatement { expression }
            | Self::Parenthesized { expression }
            | Self::NonNull { expression }
            | Self::As { expression } => vec![*expression],
            Self::VariableDeclaration { id, init, .. } => {
                std::iter::once(*id).chain(*init).collect()
            }
            Self::Import { specifiers } => specifiers.clone(),
            Self::Export {
                declaration,
                specifiers,
            } => declaration.iter().chain(specifiers).copied().collect(),
            Self::ExportAssignment { expression } => vec![*expression],
            Self::ModuleDeclaration { id, body, .. } => std::iter::once(*id).chain(*body).collect(),
            Self::EnumDeclaration { id, members } => {
                std::iter::once(*id).chain(members.iter().copied()).collect()
            }
            Self::ArrayPattern { elements } => elements.iter().flatten().copied().collect(),
            Self::RestElement { argument } => vec![*argument],
            Self::FunctionExpression { id, body } => id.iter().copied().chain([*body]).collect(),
            Self::PropertyDefinition { key, value } => std::iter::once(*key).chain(*value).collect(),
            Self::If {
                test,
                consequent,
                alternate,
            } => [*test, *consequent].into_iter().chain(*alternate).collect(),
            Self::While { test, body } => vec![*test, *body],
            Self::DoWhile { body, test } => vec![*body, *test],
            Self::For {
                init,
                test,
                update,
                body,
            } => init
                .iter()
                .chain(test)
                .chain(update)
                .copied()
                .chain(std::iter::once(*body))
                .collect(),
            Self::ForIn { left, right, body } => vec![*left, *right, *body],
            Self::Conditional {
                test,
                consequent,
                alternate,
            } => vec![*test, *consequent, *alternate],
            Self::Logical { left, right, .. } | Self::Binary { left, right, .. } => {
                vec![*left, *right]
            }
            Self::Unary { argument, .. }
            | Self::Update { argument, .. }
            | Self::Spread { argument } => vec![*argument],
            Self::Call { callee, arguments } | Self::New { callee, arguments } => {
                std::iter::once(*callee).chain(arguments.iter().copied()).collect()
            }
            Self::Member {
                object, property, ..
            } => vec![*object, *property],
            Self::MethodDefinition { key, value, .. } => vec![*key, *value],
            Self::Identifier { .. }
            | Self::PrivateIdentifier { .. }
            | Self::Literal { .. }
            | Self::NullKeyword => Vec::new(),
        }
    }

    /// The condition of a test-bearing statement or conditional expression.
    #[must_use]
    pub fn test(&self) -> Option<NodeId> {
        match self {
            Self::If { test, .. }
            | Self::While { test, .. }
            | Self::DoWhile { test, .. }
            | Self::Conditional { test, .. } => Some(*test),
            Self::For { test, .. } => *test,
            _ => None,
        }
    }

    fn wrapped(&self) -> Option<NodeId> {
        match self {
            Self::Parenthesized { expression }
            | Self::NonNull { expression }
            | Self::As { expression } => Some(*expression),
            _ => None,
        }
    }
}

/// A node in the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node shape.
    #[serde(flatten)]
    pub kind: NodeKind,
    /// Source range.
    pub span: Span,
    /// Parent node, `None` for the root.
    #[serde(default)]
    pub parent: Option<NodeId>,
}

/// Structural defects of a deserialized [`SyntaxTree`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The root id does not name a node.
    #[error("root node {root} is out of range ({len} nodes)")]
    RootOutOfRange {
        /// Root id.
        root: u32,
        /// Number of nodes.
        len: usize,
    },
    /// A node lists a child id that does not name a node.
    #[error("node {node} lists child {child}, which is out of range")]
    ChildOutOfRange {
        /// Listing node.
        node: u32,
        /// Missing child.
        child: u32,
    },
    /// A node is reached twice from the root, through a cycle or a second
    /// parent.
    #[error("node {child} is reached twice (again from node {node})")]
    SharedChild {
        /// Second listing node.
        node: u32,
        /// Shared child.
        child: u32,
    },
    /// A node's parent link disagrees with the node listing it.
    #[error("node {child} is listed by node {node} but its parent is {parent:?}")]
    ParentMismatch {
        /// Listing node.
        node: u32,
        /// Child whose link is wrong.
        child: u32,
        /// Recorded parent.
        parent: Option<u32>,
    },
}

/// Arena-backed syntax tree of one file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl SyntaxTree {
    /// Returns the node with the given id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Returns the kind of the given node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.get(id).map(|n| &n.kind)
    }

    /// Returns the span of the given node, or an empty span if unknown.
    #[must_use]
    pub fn span(&self, id: NodeId) -> Span {
        self.get(id).map(|n| n.span).unwrap_or_default()
    }

    /// Returns the parent of the given node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Root node.
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Checks that the nodes reachable from the root form a tree: every
    /// child id exists, every node has exactly one listing parent, and
    /// parent links agree with the child lists.
    ///
    /// Trees built with [`TreeBuilder`] always pass. Trees read from
    /// snapshots must be validated before they are walked, since
    /// [`preorder`](Self::preorder) and the wrapper-skipping helpers do not
    /// guard against cycles.
    ///
    /// # Errors
    ///
    /// Returns the first structural defect found.
    pub fn validate(&self) -> Result<(), TreeError> {
        let Some(root) = self.root else {
            return Ok(());
        };
        if self.get(root).is_none() {
            return Err(TreeError::RootOutOfRange {
                root: root.0,
                len: self.nodes.len(),
            });
        }
        if let Some(parent) = self.parent(root) {
            return Err(TreeError::ParentMismatch {
                node: parent.0,
                child: root.0,
                parent: Some(parent.0),
            });
        }

        let mut seen = vec![false; self.nodes.len()];
        seen[root.index()] = true;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else { continue };
            for child in node.kind.children() {
                let Some(child_node) = self.get(child) else {
                    return Err(TreeError::ChildOutOfRange {
                        node: id.0,
                        child: child.0,
                    });
                };
                if std::mem::replace(&mut seen[child.index()], true) {
                    return Err(TreeError::SharedChild {
                        node: id.0,
                        child: child.0,
                    });
                }
                if child_node.parent != Some(id) {
                    return Err(TreeError::ParentMismatch {
                        node: id.0,
                        child: child.0,
                        parent: child_node.parent.map(|p| p.0),
                    });
                }
                stack.push(child);
            }
        }
        Ok(())
    }

    /// Pre-order traversal from the root.
    ///
    /// Uses an explicit stack so deeply nested expressions cannot overflow.
    #[must_use]
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else { continue };
            order.push(id);
            stack.extend(node.kind.children().into_iter().rev());
        }
        order
    }

    /// Strips parentheses, non-null assertions and `as` casts around `id`.
    #[must_use]
    pub fn skip_downwards(&self, mut id: NodeId) -> NodeId {
        while let Some(inner) = self.kind(id).and_then(NodeKind::wrapped) {
            id = inner;
        }
        id
    }

    /// Walks up through enclosing parentheses, non-null assertions and `as`
    /// casts, returning the outermost wrapper of `id`.
    #[must_use]
    pub fn skip_upwards(&self, mut id: NodeId) -> NodeId {
        while let Some(parent) = self.parent(id) {
            if self.kind(parent).and_then(NodeKind::wrapped).is_some() {
                id = parent;
            } else {
                break;
            }
        }
        id
    }

    /// Returns the identifier name if the node is an identifier.
    #[must_use]
    pub fn identifier_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Identifier { name } => Some(name),
            _ => None,
        }
    }
}

/// Builds a [`SyntaxTree`] bottom-up, wiring parent links.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
}

impl TreeBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node whose children have already been added.
    pub fn push(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        for child in kind.children() {
            if let Some(node) = self.nodes.get_mut(child.index()) {
                node.parent = Some(id);
            }
        }
        self.nodes.push(Node {
            kind,
            span,
            parent: None,
        });
        id
    }

    /// Adds an identifier.
    pub fn ident(&mut self, name: impl Into<String>, span: Span) -> NodeId {
        self.push(NodeKind::Identifier { name: name.into() }, span)
    }

    /// Adds a literal.
    pub fn literal(&mut self, value: LiteralValue, span: Span) -> NodeId {
        self.push(NodeKind::Literal { value }, span)
    }

    /// Adds a binary expression spanning both operands.
    pub fn binary(&mut self, operator: BinaryOperator, left: NodeId, right: NodeId) -> NodeId {
        let span = self.cover(left, right);
        self.push(
            NodeKind::Binary {
                operator,
                left,
                right,
            },
            span,
        )
    }

    /// Adds a logical expression spanning both operands.
    pub fn logical(&mut self, operator: LogicalOperator, left: NodeId, right: NodeId) -> NodeId {
        let span = self.cover(left, right);
        self.push(
            NodeKind::Logical {
                operator,
                left,
                right,
            },
            span,
        )
    }

    /// Adds an expression statement with the same span as its expression.
    pub fn expression_statement(&mut self, expression: NodeId) -> NodeId {
        let span = self.span_of(expression);
        self.push(NodeKind::ExpressionStatement { expression }, span)
    }

    /// Span of an already-added node.
    #[must_use]
    pub fn span_of(&self, id: NodeId) -> Span {
        self.nodes.get(id.index()).map(|n| n.span).unwrap_or_default()
    }

    fn cover(&self, first: NodeId, last: NodeId) -> Span {
        Span::new(self.span_of(first).start, self.span_of(last).end)
    }

    /// Finishes the tree with `root` as its root node.
    #[must_use]
    pub fn finish(self, root: NodeId) -> SyntaxTree {
        SyntaxTree {
            nodes: self.nodes,
            root: Some(root),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (SyntaxTree, NodeId, NodeId) {
        // "(x as any)!"
        let mut b = TreeBuilder::new();
        let x = b.ident("x", Span::new(1, 2));
        let cast = b.push(NodeKind::As { expression: x }, Span::new(1, 9));
        let paren = b.push(NodeKind::Parenthesized { expression: cast }, Span::new(0, 10));
        let non_null = b.push(NodeKind::NonNull { expression: paren }, Span::new(0, 11));
        let stmt = b.expression_statement(non_null);
        let program = b.push(NodeKind::Program { body: vec![stmt] }, Span::new(0, 11));
        (b.finish(program), x, non_null)
    }

    #[test]
    fn builder_wires_parents() {
        let (tree, x, _) = sample();
        let parent = tree.parent(x).expect("x has a parent");
        assert!(matches!(tree.kind(parent), Some(NodeKind::As { .. })));
        assert_eq!(tree.parent(tree.root().expect("root")), None);
    }

    #[test]
    fn skips_wrappers_in_both_directions() {
        let (tree, x, outer) = sample();
        assert_eq!(tree.skip_downwards(outer), x);
        assert_eq!(tree.skip_upwards(x), outer);
    }

    #[test]
    fn preorder_visits_parents_first() {
        let (tree, x, outer) = sample();
        let order = tree.preorder();
        assert_eq!(order.len(), tree.len());
        let pos = |id| order.iter().position(|n| *n == id);
        assert!(pos(outer) < pos(x));
        assert_eq!(order.first().copied(), tree.root());
    }

    #[test]
    fn built_trees_validate() {
        let (tree, _, _) = sample();
        assert_eq!(tree.validate(), Ok(()));
        assert_eq!(SyntaxTree::default().validate(), Ok(()));
    }

    fn parse(json: &str) -> SyntaxTree {
        serde_json::from_str(json).expect("tree json")
    }

    #[test]
    fn self_listing_root_is_rejected() {
        let tree = parse(
            r#"{"nodes": [{"kind": "Program", "body": [0], "span": {"start": 0, "end": 0}}], "root": 0}"#,
        );
        assert_eq!(
            tree.validate(),
            Err(TreeError::SharedChild { node: 0, child: 0 })
        );
    }

    #[test]
    fn dangling_child_and_bad_parent_are_rejected() {
        let dangling = parse(
            r#"{"nodes": [{"kind": "Program", "body": [7], "span": {"start": 0, "end": 0}}], "root": 0}"#,
        );
        assert_eq!(
            dangling.validate(),
            Err(TreeError::ChildOutOfRange { node: 0, child: 7 })
        );

        let orphan = parse(
            r#"{"nodes": [
                {"kind": "Identifier", "name": "x", "span": {"start": 0, "end": 1}},
                {"kind": "Program", "body": [0], "span": {"start": 0, "end": 1}}
            ], "root": 1}"#,
        );
        assert!(matches!(
            orphan.validate(),
            Err(TreeError::ParentMismatch { child: 0, parent: None, .. })
        ));
        assert!(matches!(
            parse(r#"{"nodes": [], "root": 3}"#).validate(),
            Err(TreeError::RootOutOfRange { root: 3, len: 0 })
        ));
    }

    #[test]
    fn for_statement_without_test() {
        let kind = NodeKind::For {
            init: None,
            test: None,
            update: None,
            body: NodeId(0),
        };
        assert_eq!(kind.test(), None);
        assert_eq!(kind.children(), vec![NodeId(0)]);
    }

    #[test]
    fn relational_operators() {
        assert!(BinaryOperator::LtEq.is_relational());
        assert!(!BinaryOperator::StrictEq.is_relational());
        assert_eq!(BinaryOperator::UShr.to_string(), ">>>");
    }
}
