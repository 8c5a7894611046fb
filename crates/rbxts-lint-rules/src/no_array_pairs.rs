//! Rule to flag `pairs()` and `ipairs()` over arrays.
//!
//! Arrays are 0-indexed in TypeScript and 1-indexed in Lua. The compiler
//! shifts indices for array methods and for-of loops, but keys produced by
//! the raw `pairs`/`ipairs` iterators come through unshifted.

use rbxts_lint_core::utils::types::{is_array, is_possibly};
use rbxts_lint_core::{
    type_of, FileContext, LintError, Message, NodeId, NodeKind, NodeVisitor, Reporter, Rule,
    Severity, TypeChecker,
};

/// Rule code for no-array-pairs.
pub const CODE: &str = "RBX006";

/// Rule name for no-array-pairs.
pub const NAME: &str = "no-array-pairs";

/// Messages of [`NoArrayPairs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayPairsMessage {
    /// `pairs(array)`
    ArrayPairsViolation,
    /// `ipairs(array)`
    ArrayIPairsViolation,
}

impl ArrayPairsMessage {
    /// Message for a call to the iterator named `callee`.
    #[must_use]
    pub fn for_callee(callee: &str) -> Option<Self> {
        match callee {
            "pairs" => Some(Self::ArrayPairsViolation),
            "ipairs" => Some(Self::ArrayIPairsViolation),
            _ => None,
        }
    }
}

impl Message for ArrayPairsMessage {
    fn id(self) -> &'static str {
        match self {
            Self::ArrayPairsViolation => "arrayPairsViolation",
            Self::ArrayIPairsViolation => "arrayIPairsViolation",
        }
    }

    fn template(self) -> &'static str {
        match self {
            Self::ArrayPairsViolation => {
                "Do not use Array<T> with pairs(). Key values will not be shifted from 1-indexed to 0-indexed."
            }
            Self::ArrayIPairsViolation => {
                "Do not use Array<T> with ipairs(). Key values will not be shifted from 1-indexed to 0-indexed."
            }
        }
    }
}

/// Flags raw Lua iteration over arrays.
#[derive(Debug, Clone)]
pub struct NoArrayPairs {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoArrayPairs {
    fn default() -> Self {
        Self::new()
    }
}

impl NoArrayPairs {
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

impl Rule for NoArrayPairs {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Disallows usage of pairs() and ipairs() with Array<T>"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> Vec<(&'static str, &'static str)> {
        [
            ArrayPairsMessage::ArrayPairsViolation,
            ArrayPairsMessage::ArrayIPairsViolation,
        ]
        .into_iter()
        .map(|m| (m.id(), m.template()))
        .collect()
    }

    fn requires_type_checking(&self) -> bool {
        true
    }

    fn create<'a>(&self, ctx: &FileContext<'a>) -> Result<Box<dyn NodeVisitor + 'a>, LintError> {
        let checker = ctx.checker(NAME)?;
        Ok(Box::new(ArrayPairsVisitor { ctx: *ctx, checker }))
    }
}

struct ArrayPairsVisitor<'a> {
    ctx: FileContext<'a>,
    checker: &'a dyn TypeChecker,
}

impl NodeVisitor for ArrayPairsVisitor<'_> {
    fn visit(&mut self, node: NodeId, reporter: &mut Reporter<'_>) {
        let tree = self.ctx.tree;
        let Some(NodeKind::Call { callee, arguments }) = tree.kind(node) else {
            return;
        };
        let Some(message) = tree
            .identifier_name(*callee)
            .and_then(ArrayPairsMessage::for_callee)
        else {
            return;
        };
        let Some(ty) = arguments
            .first()
            .and_then(|arg| type_of(tree, self.checker, *arg))
        else {
            return;
        };
        if is_possibly(self.checker, ty, |t| is_array(self.checker, t)) {
            reporter.report(node, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ids, run, Fixture};
    use rbxts_lint_core::semantic::{ObjectFlavor, TypeKind};
    use rbxts_lint_core::{HostSnapshot, TypeId};

    fn iterate(callee: &str, build: impl FnOnce(&mut Fixture) -> TypeId) -> HostSnapshot {
        let source = format!("{callee}(list);");
        let mut fx = Fixture::new(&source);
        let ty = build(&mut fx);
        let function = fx.ident(callee);
        let list = fx.typed_ident("list", ty);
        let call = fx.call(function, vec![list], &format!("{callee}(list)"));
        let stmt = fx.statement(call);
        fx.finish(vec![stmt])
    }

    #[test]
    fn test_pairs_over_array() {
        let snapshot = iterate("pairs", |fx| {
            let n = fx.store.number();
            fx.kind(TypeKind::Array { element: n })
        });
        let violations = run(NoArrayPairs::new(), &snapshot);
        assert_eq!(ids(&violations), vec!["arrayPairsViolation"]);
        assert_eq!(violations[0].location.length, "pairs(list)".len());
    }

    #[test]
    fn test_ipairs_over_array_subclass() {
        let snapshot = iterate("ipairs", |fx| {
            let array = fx
                .store
                .object(Some("ReadonlyArray"), ObjectFlavor::Interface, vec![], vec![]);
            fx.store
                .object(Some("Stack"), ObjectFlavor::Class, vec![], vec![array])
        });
        let violations = run(NoArrayPairs::new(), &snapshot);
        assert_eq!(ids(&violations), vec!["arrayIPairsViolation"]);
    }

    #[test]
    fn test_pairs_over_map_is_allowed() {
        let snapshot = iterate("pairs", |fx| {
            let size = fx.store.member("size", vec![]);
            fx.store
                .object(Some("Map"), ObjectFlavor::Interface, vec![size], vec![])
        });
        assert!(run(NoArrayPairs::new(), &snapshot).is_empty());
    }

    #[test]
    fn test_other_callees_are_ignored() {
        let snapshot = iterate("next", |fx| {
            let n = fx.store.number();
            fx.kind(TypeKind::Array { element: n })
        });
        assert!(run(NoArrayPairs::new(), &snapshot).is_empty());
    }
}
