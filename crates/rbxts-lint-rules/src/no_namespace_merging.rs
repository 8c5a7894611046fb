//! Rule to forbid merging a runtime namespace with another declaration.
//!
//! A namespace compiles to a table. Two instantiated namespaces of one name,
//! or a namespace merged into a function, would need one value to be both.
//! Namespaces holding only types never reach runtime and may merge freely.

use rbxts_lint_core::semantic::TypeChecker;
use rbxts_lint_core::{
    FileContext, LintError, Message, NodeId, NodeKind, NodeVisitor, Reporter, Rule, Severity,
};

/// Rule code for no-namespace-merging.
pub const CODE: &str = "RBX021";

/// Rule name for no-namespace-merging.
pub const NAME: &str = "no-namespace-merging";

/// Messages of [`NoNamespaceMerging`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceMergingMessage {
    /// A namespace sharing its runtime value with another declaration.
    NamespaceMergingViolation,
}

impl Message for NamespaceMergingMessage {
    fn id(self) -> &'static str {
        "namespaceMergingViolation"
    }

    fn template(self) -> &'static str {
        "Namespace merging is not supported!"
    }
}

/// Forbids declaration merging of instantiated namespaces.
#[derive(Debug, Clone)]
pub struct NoNamespaceMerging {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoNamespaceMerging {
    fn default() -> Self {
        Self::new()
    }
}

impl NoNamespaceMerging {
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

impl Rule for NoNamespaceMerging {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Bans namespace declaration merging"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> Vec<(&'static str, &'static str)> {
        let m = NamespaceMergingMessage::NamespaceMergingViolation;
        vec![(m.id(), m.template())]
    }

    fn requires_type_checking(&self) -> bool {
        true
    }

    fn create<'a>(&self, ctx: &FileContext<'a>) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
        let checker = ctx.checker(NAME)?;
        Ok(Box::new(NamespaceVisitor { ctx: *ctx, checker }))
    }
}

struct NamespaceVisitor<'a> {
    ctx: FileContext<'a>,
    checker: &'a dyn TypeChecker,
}

impl NodeVisitor for NamespaceVisitor<'_> {
    fn visit(&mut self, node: NodeId, reporter: &mut Reporter<'_>) {
        let Some(NodeKind::ModuleDeclaration {
            id,
            instantiated: true,
            ..
        }) = self.ctx.tree.kind(node)
        else {
            return;
        };
        let runtime_declarations = self
            .checker
            .symbol_at(*id)
            .and_then(|symbol| self.checker.symbol(symbol))
            .map_or(0, |symbol| {
                symbol
                    .declarations
                    .iter()
                    .filter(|d| d.kind.is_namespace_value())
                    .count()
            });
        if runtime_declarations > 1 {
            reporter.report(*id, NamespaceMergingMessage::NamespaceMergingViolation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ids, run, Fixture};
    use rbxts_lint_core::semantic::{Declaration, DeclarationKind};
    use rbxts_lint_core::Violation;

    /// `namespace N { ... }` whose symbol carries `declarations`.
    fn namespace(instantiated: bool, declarations: &[DeclarationKind]) -> Vec<Violation> {
        let source = "namespace N { export const a = 1; }";
        let mut fx = Fixture::new(source);
        let id = fx.ident("N");
        let body = fx.node(NodeKind::Block { body: vec![] }, "{ export const a = 1; }");
        let decl = fx.node(
            NodeKind::ModuleDeclaration {
                id,
                body: Some(body),
                instantiated,
            },
            source,
        );
        let symbol = fx.store.add_symbol(
            "N",
            declarations.iter().map(|k| Declaration::new(*k)).collect(),
        );
        fx.set_symbol(id, symbol);
        let snapshot = fx.finish(vec![decl]);
        run(NoNamespaceMerging::new(), &snapshot)
    }

    #[test]
    fn test_detects_two_runtime_namespaces() {
        let violations = namespace(true, &[DeclarationKind::Namespace, DeclarationKind::Namespace]);
        assert_eq!(ids(&violations), vec!["namespaceMergingViolation"]);
        assert_eq!(violations[0].location.column, 11);
    }

    #[test]
    fn test_detects_namespace_merged_into_function() {
        let violations = namespace(true, &[DeclarationKind::Function, DeclarationKind::Namespace]);
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_allows_single_namespace() {
        assert!(namespace(true, &[DeclarationKind::Namespace]).is_empty());
    }

    #[test]
    fn test_allows_merging_with_types() {
        let kinds = [
            DeclarationKind::Namespace,
            DeclarationKind::TypeNamespace,
            DeclarationKind::Interface,
            DeclarationKind::FunctionSignature,
        ];
        assert!(namespace(true, &kinds).is_empty());
    }

    #[test]
    fn test_ignores_type_only_namespace() {
        let kinds = [DeclarationKind::TypeNamespace, DeclarationKind::TypeNamespace];
        assert!(namespace(false, &kinds).is_empty());
    }

    #[test]
    fn test_requires_type_information() {
        let mut fx = Fixture::new("N;");
        let n = fx.ident("N");
        let stmt = fx.statement(n);
        let snapshot = fx.finish_untyped(vec![stmt]);
        let err = NoNamespaceMerging::new()
            .create(&snapshot.context())
            .err()
            .expect("no checker");
        assert!(matches!(err, LintError::MissingTypeInformation { rule: NAME }));
    }
}
