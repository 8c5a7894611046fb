//! Semantic type model and the type-resolution capability.
//!
//! The host's checker is external. Rules consume it through the
//! [`TypeChecker`] trait; [`SemanticModel`] is an in-memory implementation
//! that host bridges serialize into snapshots and tests build directly.

use crate::syntax::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Index of a type in a [`TypeStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(pub u32);

/// Index of a symbol in a [`TypeStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub u32);

/// Flavor of an object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectFlavor {
    /// Declared with `class`.
    Class,
    /// Declared with `interface`.
    Interface,
    /// Object literal or anonymous type literal.
    Anonymous,
}

/// A named member of an object type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Property name.
    pub name: String,
    /// Symbol carrying the member's declarations.
    pub symbol: SymbolId,
    /// Declared with `?`.
    #[serde(default)]
    pub optional: bool,
}

/// Class, interface, or anonymous object shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectType {
    /// Object flavor.
    pub flavor: ObjectFlavor,
    /// Own members.
    #[serde(default)]
    pub members: Vec<Member>,
    /// Direct base types (`extends` / `implements`).
    #[serde(default)]
    pub base_types: Vec<TypeId>,
}

/// Shape of a resolved type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeKind {
    /// `any`
    Any,
    /// `unknown`
    Unknown,
    /// `never`
    Never,
    /// `void`
    Void,
    /// `undefined`
    Undefined,
    /// `null`
    Null,
    /// `boolean`
    Boolean,
    /// `true` / `false`
    BooleanLiteral {
        /// Literal value.
        value: bool,
    },
    /// `number`
    Number,
    /// A numeric literal type.
    NumberLiteral {
        /// Literal value.
        value: f64,
    },
    /// `bigint`
    BigInt,
    /// A bigint literal type.
    BigIntLiteral {
        /// Literal digits.
        value: String,
    },
    /// `string`
    String,
    /// A string literal type.
    StringLiteral {
        /// Literal value.
        value: String,
    },
    /// `A | B`
    Union {
        /// Alternatives.
        types: Vec<TypeId>,
    },
    /// `A & B`
    Intersection {
        /// Facets.
        types: Vec<TypeId>,
    },
    /// A type parameter.
    TypeParameter {
        /// Upper bound.
        #[serde(default)]
        constraint: Option<TypeId>,
    },
    /// Class, interface or object literal type.
    Object(ObjectType),
    /// `T[]`
    Array {
        /// Element type.
        element: TypeId,
    },
    /// `[A, B]`
    Tuple {
        /// Element types.
        elements: Vec<TypeId>,
    },
    /// A function type.
    Function {
        /// Return type.
        #[serde(default)]
        return_type: Option<TypeId>,
    },
}

/// A resolved type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Type {
    /// Shape.
    #[serde(flatten)]
    pub kind: TypeKind,
    /// Nominal symbol (the declared class/interface/type name).
    #[serde(default)]
    pub symbol: Option<SymbolId>,
    /// Alias symbol, set when the type was written through a type alias.
    #[serde(default)]
    pub alias_symbol: Option<SymbolId>,
}

impl Type {
    /// Creates a type without symbols.
    #[must_use]
    pub fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            symbol: None,
            alias_symbol: None,
        }
    }

    /// Returns the object shape if this is an object type.
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectType> {
        match &self.kind {
            TypeKind::Object(object) => Some(object),
            _ => None,
        }
    }
}

/// A documentation tag (`@name text`) attached to a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocTag {
    /// Tag name without `@`.
    pub name: String,
    /// Tag text.
    #[serde(default)]
    pub text: Option<String>,
}

impl DocTag {
    /// Creates a tag.
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: Some(text.into()),
        }
    }
}

/// Syntactic kind of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeclarationKind {
    /// Class method.
    Method,
    /// Interface or type-literal method signature.
    MethodSignature,
    /// Function expression assigned to an object-literal property.
    ObjectLiteralMethod,
    /// Property whose type is a function type.
    FunctionProperty,
    /// Plain property.
    Property,
    /// Function declaration with a body.
    Function,
    /// Function overload or ambient signature without a body.
    FunctionSignature,
    /// Variable.
    Variable,
    /// Class declaration.
    Class,
    /// Interface declaration.
    Interface,
    /// Type alias.
    TypeAlias,
    /// Namespace holding values, so it exists at runtime.
    Namespace,
    /// Namespace holding only types.
    TypeNamespace,
    /// Enum declaration.
    Enum,
}

impl DeclarationKind {
    /// True for declarations that create a runtime namespace object: an
    /// instantiated namespace, or a function with a body that namespaces
    /// may merge into.
    #[must_use]
    pub const fn is_namespace_value(self) -> bool {
        matches!(self, Self::Namespace | Self::Function)
    }
}

/// A declared parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name; `this` marks a receiver-type parameter.
    pub name: String,
    /// Declared type.
    #[serde(default)]
    pub ty: Option<TypeId>,
}

impl Parameter {
    /// Returns true for a `this:` receiver parameter.
    #[must_use]
    pub fn is_this(&self) -> bool {
        self.name == "this"
    }
}

/// A declaration site of a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Declaration kind.
    pub kind: DeclarationKind,
    /// Parameters for callable declarations.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Declared or inferred return type for callable declarations.
    #[serde(default)]
    pub return_type: Option<TypeId>,
    /// Documentation tags.
    #[serde(default)]
    pub doc_tags: Vec<DocTag>,
}

impl Declaration {
    /// Creates a declaration without parameters, return type or tags.
    #[must_use]
    pub fn new(kind: DeclarationKind) -> Self {
        Self {
            kind,
            parameters: Vec::new(),
            return_type: None,
            doc_tags: Vec::new(),
        }
    }

    /// Sets the parameters.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Sets the return type.
    #[must_use]
    pub fn with_return_type(mut self, ty: TypeId) -> Self {
        self.return_type = Some(ty);
        self
    }

    /// Adds a documentation tag.
    #[must_use]
    pub fn with_doc_tag(mut self, tag: DocTag) -> Self {
        self.doc_tags.push(tag);
        self
    }

    /// Returns true if a tag with this name and text is attached.
    #[must_use]
    pub fn has_doc_tag(&self, name: &str, text: &str) -> bool {
        self.doc_tags
            .iter()
            .any(|tag| tag.name == name && tag.text.as_deref() == Some(text))
    }
}

/// A named declaration handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// Symbol name.
    pub name: String,
    /// Declaration sites.
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

/// The host's type-resolution capability.
///
/// All lookups return `Option`; a `None` means the host could not resolve
/// the query and callers treat it as "no information".
pub trait TypeChecker {
    /// Semantic type of a syntax node.
    fn type_at(&self, node: NodeId) -> Option<TypeId>;

    /// Data of a type.
    fn type_data(&self, ty: TypeId) -> Option<&Type>;

    /// Data of a symbol.
    fn symbol(&self, id: SymbolId) -> Option<&Symbol>;

    /// Symbol referenced by a syntax node (e.g. the name of a property access).
    fn symbol_at(&self, node: NodeId) -> Option<SymbolId>;

    /// Base constraint of a type parameter, following nested parameters.
    fn base_constraint(&self, ty: TypeId) -> Option<TypeId> {
        let mut seen = HashSet::new();
        let mut current = ty;
        let mut found = None;
        while seen.insert(current) {
            match self.type_data(current).map(|t| &t.kind) {
                Some(TypeKind::TypeParameter {
                    constraint: Some(constraint),
                }) => {
                    found = Some(*constraint);
                    current = *constraint;
                }
                _ => break,
            }
        }
        found
    }

    /// Type of `node`, resolved to its constraint when it is a type parameter.
    fn constrained_type_at(&self, node: NodeId) -> Option<TypeId> {
        let ty = self.type_at(node)?;
        Some(self.base_constraint(ty).unwrap_or(ty))
    }

    /// Nominal symbol name of a type.
    fn symbol_name(&self, ty: TypeId) -> Option<&str> {
        let symbol = self.type_data(ty)?.symbol?;
        self.symbol(symbol).map(|s| s.name.as_str())
    }

    /// Alias symbol name of a type.
    fn alias_name(&self, ty: TypeId) -> Option<&str> {
        let symbol = self.type_data(ty)?.alias_symbol?;
        self.symbol(symbol).map(|s| s.name.as_str())
    }

    /// Human-readable rendering of a type.
    fn type_to_string(&self, ty: TypeId) -> String {
        render_type(self, ty, &mut HashSet::new())
    }
}

fn render_type<C: TypeChecker + ?Sized>(checker: &C, ty: TypeId, seen: &mut HashSet<TypeId>) -> String {
    let Some(data) = checker.type_data(ty) else {
        return "unknown".to_string();
    };
    if let Some(alias) = data.alias_symbol.and_then(|s| checker.symbol(s)) {
        return alias.name.clone();
    }
    if !seen.insert(ty) {
        return "...".to_string();
    }
    let joined = |types: &[TypeId], sep: &str, seen: &mut HashSet<TypeId>| {
        types
            .iter()
            .map(|t| render_type(checker, *t, seen))
            .collect::<Vec<_>>()
            .join(sep)
    };
    let rendered = match &data.kind {
        TypeKind::Any => "any".to_string(),
        TypeKind::Unknown => "unknown".to_string(),
        TypeKind::Never => "never".to_string(),
        TypeKind::Void => "void".to_string(),
        TypeKind::Undefined => "undefined".to_string(),
        TypeKind::Null => "null".to_string(),
        TypeKind::Boolean => "boolean".to_string(),
        TypeKind::BooleanLiteral { value } => value.to_string(),
        TypeKind::Number => "number".to_string(),
        TypeKind::NumberLiteral { value } => value.to_string(),
        TypeKind::BigInt => "bigint".to_string(),
        TypeKind::BigIntLiteral { value } => format!("{value}n"),
        TypeKind::String => "string".to_string(),
        TypeKind::StringLiteral { value } => format!("\"{value}\""),
        TypeKind::Union { types } => joined(types, " | ", seen),
        TypeKind::Intersection { types } => joined(types, " & ", seen),
        TypeKind::Array { element } => format!("{}[]", render_type(checker, *element, seen)),
        TypeKind::Tuple { elements } => format!("[{}]", joined(elements, ", ", seen)),
        TypeKind::Function { return_type } => match return_type {
            Some(ret) => format!("() => {}", render_type(checker, *ret, seen)),
            None => "Function".to_string(),
        },
        TypeKind::TypeParameter { .. } | TypeKind::Object(_) => {
            match data.symbol.and_then(|s| checker.symbol(s)) {
                Some(symbol) => symbol.name.clone(),
                None if matches!(data.kind, TypeKind::Object(_)) => "{}".to_string(),
                None => "T".to_string(),
            }
        }
    };
    seen.remove(&ty);
    rendered
}

/// Arena of types and symbols.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeStore {
    types: Vec<Type>,
    symbols: Vec<Symbol>,
}

impl TypeStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type.
    pub fn add(&mut self, ty: Type) -> TypeId {
        self.types.push(ty);
        TypeId(u32::try_from(self.types.len() - 1).unwrap_or(u32::MAX))
    }

    /// Adds a type without symbols.
    pub fn add_kind(&mut self, kind: TypeKind) -> TypeId {
        self.add(Type::new(kind))
    }

    /// Adds a symbol.
    pub fn add_symbol(&mut self, name: impl Into<String>, declarations: Vec<Declaration>) -> SymbolId {
        self.symbols.push(Symbol {
            name: name.into(),
            declarations,
        });
        SymbolId(u32::try_from(self.symbols.len() - 1).unwrap_or(u32::MAX))
    }

    /// Looks up a type.
    #[must_use]
    pub fn get(&self, ty: TypeId) -> Option<&Type> {
        self.types.get(ty.0 as usize)
    }

    /// Mutable lookup, used to close cycles after both ends exist.
    pub fn get_mut(&mut self, ty: TypeId) -> Option<&mut Type> {
        self.types.get_mut(ty.0 as usize)
    }

    /// Looks up a symbol.
    #[must_use]
    pub fn get_symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    /// `number`
    pub fn number(&mut self) -> TypeId {
        self.add_kind(TypeKind::Number)
    }

    /// A numeric literal type.
    pub fn number_literal(&mut self, value: f64) -> TypeId {
        self.add_kind(TypeKind::NumberLiteral { value })
    }

    /// `string`
    pub fn string(&mut self) -> TypeId {
        self.add_kind(TypeKind::String)
    }

    /// A string literal type.
    pub fn string_literal(&mut self, value: impl Into<String>) -> TypeId {
        self.add_kind(TypeKind::StringLiteral {
            value: value.into(),
        })
    }

    /// `boolean`
    pub fn boolean(&mut self) -> TypeId {
        self.add_kind(TypeKind::Boolean)
    }

    /// `undefined`
    pub fn undefined(&mut self) -> TypeId {
        self.add_kind(TypeKind::Undefined)
    }

    /// A union type.
    pub fn union(&mut self, types: Vec<TypeId>) -> TypeId {
        self.add_kind(TypeKind::Union { types })
    }

    /// An intersection type.
    pub fn intersection(&mut self, types: Vec<TypeId>) -> TypeId {
        self.add_kind(TypeKind::Intersection { types })
    }

    /// A type parameter with an optional constraint.
    pub fn type_parameter(&mut self, name: &str, constraint: Option<TypeId>) -> TypeId {
        let symbol = self.add_symbol(name, Vec::new());
        self.add(Type {
            kind: TypeKind::TypeParameter { constraint },
            symbol: Some(symbol),
            alias_symbol: None,
        })
    }

    /// A named object type with the given members and bases.
    pub fn object(
        &mut self,
        name: Option<&str>,
        flavor: ObjectFlavor,
        members: Vec<Member>,
        base_types: Vec<TypeId>,
    ) -> TypeId {
        let declaration_kind = match flavor {
            ObjectFlavor::Class => DeclarationKind::Class,
            ObjectFlavor::Interface => DeclarationKind::Interface,
            ObjectFlavor::Anonymous => DeclarationKind::TypeAlias,
        };
        let symbol = name.map(|n| self.add_symbol(n, vec![Declaration::new(declaration_kind)]));
        self.add(Type {
            kind: TypeKind::Object(ObjectType {
                flavor,
                members,
                base_types,
            }),
            symbol,
            alias_symbol: None,
        })
    }

    /// A member backed by a fresh symbol with the given declarations.
    pub fn member(&mut self, name: &str, declarations: Vec<Declaration>) -> Member {
        let symbol = self.add_symbol(name, declarations);
        Member {
            name: name.to_string(),
            symbol,
            optional: false,
        }
    }

    /// Wraps `target` in a named alias, like `type LuaTuple<T> = ...`.
    pub fn alias(&mut self, name: &str, target: TypeId) -> TypeId {
        let alias_symbol = self.add_symbol(name, vec![Declaration::new(DeclarationKind::TypeAlias)]);
        let mut ty = self
            .get(target)
            .cloned()
            .unwrap_or_else(|| Type::new(TypeKind::Unknown));
        ty.alias_symbol = Some(alias_symbol);
        self.add(ty)
    }
}

/// In-memory [`TypeChecker`]: a [`TypeStore`] plus node-to-type and
/// node-to-symbol tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemanticModel {
    /// Types and symbols.
    pub store: TypeStore,
    /// Type of each typed node.
    #[serde(default)]
    pub node_types: BTreeMap<NodeId, TypeId>,
    /// Symbol referenced by each named node.
    #[serde(default)]
    pub node_symbols: BTreeMap<NodeId, SymbolId>,
}

impl SemanticModel {
    /// Creates a model over an existing store.
    #[must_use]
    pub fn new(store: TypeStore) -> Self {
        Self {
            store,
            node_types: BTreeMap::new(),
            node_symbols: BTreeMap::new(),
        }
    }

    /// Records the type of a node.
    pub fn set_type(&mut self, node: NodeId, ty: TypeId) {
        self.node_types.insert(node, ty);
    }

    /// Records the symbol a node refers to.
    pub fn set_symbol(&mut self, node: NodeId, symbol: SymbolId) {
        self.node_symbols.insert(node, symbol);
    }
}

impl TypeChecker for SemanticModel {
    fn type_at(&self, node: NodeId) -> Option<TypeId> {
        self.node_types.get(&node).copied()
    }

    fn type_data(&self, ty: TypeId) -> Option<&Type> {
        self.store.get(ty)
    }

    fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.store.get_symbol(id)
    }

    fn symbol_at(&self, node: NodeId) -> Option<SymbolId> {
        self.node_symbols.get(&node).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_unions_and_literals() {
        let mut store = TypeStore::new();
        let a = store.string_literal("a");
        let n = store.number();
        let u = store.union(vec![a, n]);
        let model = SemanticModel::new(store);
        assert_eq!(model.type_to_string(u), "\"a\" | number");
    }

    #[test]
    fn renders_alias_name_over_structure() {
        let mut store = TypeStore::new();
        let n = store.number();
        let tuple = store.add_kind(TypeKind::Tuple { elements: vec![n] });
        let aliased = store.alias("LuaTuple", tuple);
        let model = SemanticModel::new(store);
        assert_eq!(model.type_to_string(aliased), "LuaTuple");
        assert_eq!(model.alias_name(aliased), Some("LuaTuple"));
        assert_eq!(model.type_to_string(tuple), "[number]");
    }

    #[test]
    fn base_constraint_follows_nested_parameters() {
        let mut store = TypeStore::new();
        let s = store.string();
        let inner = store.type_parameter("U", Some(s));
        let outer = store.type_parameter("T", Some(inner));
        let bare = store.type_parameter("V", None);
        let model = SemanticModel::new(store);
        assert_eq!(model.base_constraint(outer), Some(s));
        assert_eq!(model.base_constraint(bare), None);
        assert_eq!(model.base_constraint(s), None);
    }

    #[test]
    fn base_constraint_terminates_on_cycles() {
        let mut store = TypeStore::new();
        let t = store.type_parameter("T", None);
        let u = store.type_parameter("U", Some(t));
        if let Some(ty) = store.get_mut(t) {
            ty.kind = TypeKind::TypeParameter {
                constraint: Some(u),
            };
        }
        let model = SemanticModel::new(store);
        assert!(model.base_constraint(t).is_some());
    }

    #[test]
    fn unresolved_lookups_are_none() {
        let model = SemanticModel::default();
        assert_eq!(model.type_at(NodeId(3)), None);
        assert!(model.type_data(TypeId(9)).is_none());
        assert_eq!(model.type_to_string(TypeId(9)), "unknown");
    }

    #[test]
    fn model_round_trips_through_json() {
        let mut store = TypeStore::new();
        let n = store.number();
        let mut model = SemanticModel::new(store);
        model.set_type(NodeId(4), n);
        let json = serde_json::to_string(&model).expect("serialize");
        let back: SemanticModel = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.type_at(NodeId(4)), Some(n));
    }
}
