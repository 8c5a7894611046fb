//! Rule to flag truthiness checks on `LuaTuple` values.
//!
//! # Rationale
//!
//! A `LuaTuple<T>` is an array at the type level, so it is always truthy in
//! TypeScript. After compilation the call returns multiple values and the
//! condition observes only the first one. Either way the check is
//! misleading.
//!
//! # Detected Patterns
//!
//! - A truthiness-tested expression whose type is the `LuaTuple` alias.
//!   Fix: append `[0]`.
//! - `obj.method()[0]` tested for truthiness, where `method` is declared
//!   with `@rbxts disallow-tuple-truthy`. Fix: append ` !== undefined`.

use rbxts_lint_core::utils::truthiness_sites;
use rbxts_lint_core::{
    constrained_type_of, FileContext, Fix, LintError, Message, NodeId, NodeKind, NodeVisitor,
    Reporter, Rule, Severity, TextEdit, TypeChecker,
};

/// Rule code for misleading-luatuple-checks.
pub const CODE: &str = "RBX002";

/// Rule name for misleading-luatuple-checks.
pub const NAME: &str = "misleading-luatuple-checks";

/// Alias name of the multiple-return type.
pub const LUA_TUPLE_ALIAS: &str = "LuaTuple";

/// Messages of [`MisleadingLuaTupleChecks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LuaTupleMessage {
    /// A `LuaTuple` tested for truthiness.
    BannedLuaTupleCheck,
    /// The first element of a tagged method's result tested for truthiness.
    BannedImplicitTupleCheck,
}

impl Message for LuaTupleMessage {
    fn id(self) -> &'static str {
        match self {
            Self::BannedLuaTupleCheck => "bannedLuaTupleCheck",
            Self::BannedImplicitTupleCheck => "bannedImplicitTupleCheck",
        }
    }

    fn template(self) -> &'static str {
        match self {
            Self::BannedLuaTupleCheck => {
                "Unexpected LuaTuple in conditional expression. Add [0]."
            }
            Self::BannedImplicitTupleCheck => {
                "Unexpected implicit truthy check of a Lua built-in method: A return value of 0 or \"\" would evaluate as false."
            }
        }
    }
}

/// Flags `LuaTuple` values in conditions.
#[derive(Debug, Clone)]
pub struct MisleadingLuaTupleChecks {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for MisleadingLuaTupleChecks {
    fn default() -> Self {
        Self::new()
    }
}

impl MisleadingLuaTupleChecks {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for MisleadingLuaTupleChecks {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Disallows the use of LuaTuple in conditional expressions"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> Vec<(&'static str, &'static str)> {
        [
            LuaTupleMessage::BannedLuaTupleCheck,
            LuaTupleMessage::BannedImplicitTupleCheck,
        ]
        .into_iter()
        .map(|m| (m.id(), m.template()))
        .collect()
    }

    fn fixable(&self) -> bool {
        true
    }

    fn requires_type_checking(&self) -> bool {
        true
    }

    fn create<'a>(&self, ctx: &FileContext<'a>) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
        let checker = ctx.checker(NAME)?;
        Ok(Box::new(LuaTupleVisitor { ctx: *ctx, checker }))
    }
}

struct LuaTupleVisitor<'a> {
    ctx: FileContext<'a>,
    checker: &'a dyn TypeChecker,
}

impl LuaTupleVisitor<'_> {
    fn check_truthy(&self, node: NodeId, reporter: &mut Reporter<'_>) {
        let span = self.ctx.tree.span(node);
        if self.is_implicit_tuple_index(node) {
            reporter.report_fix(
                node,
                LuaTupleMessage::BannedImplicitTupleCheck,
                Fix::single(TextEdit::insert_after(span, " !== undefined")),
            );
            return;
        }
        let is_lua_tuple = constrained_type_of(self.ctx.tree, self.checker, node)
            .and_then(|ty| self.checker.alias_name(ty))
            == Some(LUA_TUPLE_ALIAS);
        if is_lua_tuple {
            reporter.report_fix(
                node,
                LuaTupleMessage::BannedLuaTupleCheck,
                Fix::single(TextEdit::insert_after(span, "[0]")),
            );
        }
    }

    /// `receiver.method(...)[index]` where `method` opts into the check.
    fn is_implicit_tuple_index(&self, node: NodeId) -> bool {
        let tree = self.ctx.tree;
        let Some(NodeKind::Member {
            object,
            computed: true,
            ..
        }) = tree.kind(tree.skip_downwards(node))
        else {
            return false;
        };
        let Some(NodeKind::Call { callee, .. }) = tree.kind(tree.skip_downwards(*object)) else {
            return false;
        };
        let Some(NodeKind::Member {
            property,
            computed: false,
            ..
        }) = tree.kind(tree.skip_downwards(*callee))
        else {
            return false;
        };
        self.checker
            .symbol_at(*property)
            .and_then(|id| self.checker.symbol(id))
            .is_some_and(|symbol| {
                symbol
                    .declarations
                    .iter()
                    .any(|decl| decl.has_doc_tag("rbxts", "disallow-tuple-truthy"))
            })
    }
}

impl NodeVisitor for LuaTupleVisitor<'_> {
    fn visit(&mut self, node: NodeId, reporter: &mut Reporter<'_>) {
        for site in truthiness_sites(self.ctx.tree, node) {
            self.check_truthy(site, reporter);
        }
    }
}
