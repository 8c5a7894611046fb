//! Rule to flag truthiness checks on values Lua treats differently.
//!
//! # Rationale
//!
//! In TypeScript `0`, `NaN` and `""` are falsy. In Lua only `nil` and
//! `false` are, so `if (count)` silently changes meaning after compilation.
//!
//! # Detected Patterns
//!
//! Every truthiness-tested expression whose type could be the literal `0`,
//! `NaN` (any non-literal number) or the empty string.
//!
//! # Fix
//!
//! ` !== undefined` is appended when the value may be `undefined` and can
//! never be a boolean. A boolean `false` must stay falsy, so no fix is
//! offered when one is possible.

use rbxts_lint_core::utils::truthiness_sites;
use rbxts_lint_core::utils::types::{
    is_boolean, is_empty_string, is_nan, is_number_literal, is_possibly, is_undefined,
};
use rbxts_lint_core::{
    type_of, FileContext, Fix, LintError, Message, NodeId, NodeVisitor, Reporter, Rule, Severity,
    TextEdit, TypeChecker, TypeId,
};

/// Rule code for lua-truthiness.
pub const CODE: &str = "RBX003";

/// Rule name for lua-truthiness.
pub const NAME: &str = "lua-truthiness";

/// Messages of [`LuaTruthiness`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LuaTruthinessMessage {
    /// A possibly falsy string or number in a truthiness check.
    FalsyStringNumberCheck,
}

impl Message for LuaTruthinessMessage {
    fn id(self) -> &'static str {
        "falsyStringNumberCheck"
    }

    fn template(self) -> &'static str {
        r#"0, NaN, and "" are falsy in TS. If intentional, disable this rule by placing `"roblox-ts/lua-truthiness": "off"` in your .eslintrc file in the "rules" object."#
    }
}

/// Falsy-literal classification of one type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Falsiness {
    /// May be the literal `0`.
    pub zero: bool,
    /// May be `NaN`.
    pub nan: bool,
    /// May be `""`.
    pub empty_string: bool,
    /// May be `undefined`.
    pub undefined: bool,
    /// May be a boolean.
    pub boolean: bool,
}

impl Falsiness {
    /// Classifies `ty`.
    pub fn of<C: TypeChecker + ?Sized>(checker: &C, ty: TypeId) -> Self {
        Self {
            zero: is_possibly(checker, ty, |t| is_number_literal(checker, t, 0.0)),
            nan: is_possibly(checker, ty, |t| is_nan(checker, t)),
            empty_string: is_possibly(checker, ty, |t| is_empty_string(checker, t)),
            undefined: is_possibly(checker, ty, |t| is_undefined(checker, t)),
            boolean: is_possibly(checker, ty, |t| is_boolean(checker, t)),
        }
    }

    /// Lua would disagree with TypeScript about this value's truthiness.
    #[must_use]
    pub fn is_misleading(self) -> bool {
        self.zero || self.nan || self.empty_string
    }

    /// Rewriting `x` to `x !== undefined` keeps the meaning of the check.
    #[must_use]
    pub fn undefined_check_is_safe(self) -> bool {
        self.undefined && !self.boolean
    }
}

/// Flags numbers and strings used as conditions.
#[derive(Debug, Clone)]
pub struct LuaTruthiness {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for LuaTruthiness {
    fn default() -> Self {
        Self::new()
    }
}

impl LuaTruthiness {
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

impl Rule for LuaTruthiness {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Warns against falsy strings and numbers"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> Vec<(&'static str, &'static str)> {
        let m = LuaTruthinessMessage::FalsyStringNumberCheck;
        vec![(m.id(), m.template())]
    }

    fn fixable(&self) -> bool {
        true
    }

    fn requires_type_checking(&self) -> bool {
        true
    }

    fn create<'a>(&self, ctx: &FileContext<'a>) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
        let checker = ctx.checker(NAME)?;
        Ok(Box::new(TruthinessVisitor { ctx: *ctx, checker }))
    }
}

struct TruthinessVisitor<'a> {
    ctx: FileContext<'a>,
    checker: &'a dyn TypeChecker,
}

impl TruthinessVisitor<'_> {
    fn check_truthy(&self, node: NodeId, reporter: &mut Reporter<'_>) {
        let Some(ty) = type_of(self.ctx.tree, self.checker, node) else {
            return;
        };
        let falsiness = Falsiness::of(self.checker, ty);
        if !falsiness.is_misleading() {
            return;
        }
        tracing::trace!(?falsiness, offset = self.ctx.tree.span(node).start, "falsy check");
        let fix = falsiness.undefined_check_is_safe().then(|| {
            Fix::single(TextEdit::insert_after(
                self.ctx.tree.span(node),
                " !== undefined",
            ))
        });
        reporter.report_with(node, LuaTruthinessMessage::FalsyStringNumberCheck, &[], fix);
    }
}

impl NodeVisitor for TruthinessVisitor<'_> {
    fn visit(&mut self, node: NodeId, reporter: &mut Reporter<'_>) {
        for site in truthiness_sites(self.ctx.tree, node) {
            self.check_truthy(site, reporter);
        }
    }
}
