//! Rule to forbid names on function expressions.
//!
//! A named function expression binds its own name inside its body, a scope
//! the compiler does not model.

use rbxts_lint_core::{
    FileContext, LintError, Message, NodeId, NodeKind, NodeVisitor, Reporter, Rule, Severity,
};

/// Rule code for no-function-expression-id.
pub const CODE: &str = "RBX020";

/// Rule name for no-function-expression-id.
pub const NAME: &str = "no-function-expression-id";

/// Messages of [`NoFunctionExpressionId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionExpressionIdMessage {
    /// A named function expression.
    FunctionExpressionIdViolation,
}

impl Message for FunctionExpressionIdMessage {
    fn id(self) -> &'static str {
        "functionExpressionIdViolation"
    }

    fn template(self) -> &'static str {
        "Function expression ids are not supported!"
    }
}

/// Forbids `function name() {}` in expression position.
#[derive(Debug, Clone)]
pub struct NoFunctionExpressionId {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoFunctionExpressionId {
    fn default() -> Self {
        Self::new()
    }
}

impl NoFunctionExpressionId {
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

impl Rule for NoFunctionExpressionId {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Bans function expression names"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> Vec<(&'static str, &'static str)> {
        let m = FunctionExpressionIdMessage::FunctionExpressionIdViolation;
        vec![(m.id(), m.template())]
    }

    fn create<'a>(&self, ctx: &FileContext<'a>) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
        Ok(Box::new(FunctionExpressionVisitor { ctx: *ctx }))
    }
}

struct FunctionExpressionVisitor<'a> {
    ctx: FileContext<'a>,
}

impl NodeVisitor for FunctionExpressionVisitor<'_> {
    fn visit(&mut self, node: NodeId, reporter: &mut Reporter<'_>) {
        if let Some(NodeKind::FunctionExpression { id: Some(id), .. }) = self.ctx.tree.kind(node) {
            reporter.report(*id, FunctionExpressionIdMessage::FunctionExpressionIdViolation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ids, run, Fixture};

    fn function_expression(source: &str, name: Option<&str>) -> Vec<rbxts_lint_core::Violation> {
        let mut fx = Fixture::new(source);
        let id = name.map(|name| fx.ident(name));
        let body = fx.node(NodeKind::Block { body: vec![] }, "{}");
        let text = source.trim_start_matches("const f = ").trim_end_matches(';');
        let function = fx.node(NodeKind::FunctionExpression { id, body }, text);
        let stmt = fx.statement(function);
        let snapshot = fx.finish_untyped(vec![stmt]);
        run(NoFunctionExpressionId::new(), &snapshot)
    }

    #[test]
    fn test_reports_the_name() {
        let violations = function_expression("const f = function helper() {};", Some("helper"));
        assert_eq!(ids(&violations), vec!["functionExpressionIdViolation"]);
        assert_eq!(violations[0].location.column, 20);
        assert_eq!(violations[0].location.length, "helper".len());
    }

    #[test]
    fn test_allows_anonymous_function() {
        assert!(function_expression("const f = function () {};", None).is_empty());
    }
}
