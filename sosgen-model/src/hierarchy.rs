//! Inheritance and namespace resolution.
//!
//! Both walks follow parent links through the [`Compilation`] arenas. The
//! base-type walk keeps a visited set so a malformed, cyclic chain ends
//! instead of spinning forever.

use crate::model::{Compilation, NamespaceId, TypeId};
use std::collections::HashSet;

/// Returns true if a type named `marker` appears anywhere in the chain that
/// starts at `start` and follows base-type links upward.
///
/// `start` is usually the *base* of the candidate type, so a type named
/// `marker` is not considered derived from itself.
#[must_use]
pub fn is_derived_from(compilation: &Compilation, start: Option<TypeId>, marker: &str) -> bool {
    let mut visited = HashSet::new();
    let mut current = start;

    while let Some(id) = current {
        if !visited.insert(id) {
            tracing::debug!(
                type_name = %compilation.full_name(id),
                "base-type chain revisits a type, stopping walk"
            );
            return false;
        }
        let Some(symbol) = compilation.type_symbol(id) else {
            return false;
        };
        if symbol.name == marker {
            return true;
        }
        current = symbol.base;
    }

    false
}

/// Returns the chain of base types of `id`, nearest first.
///
/// The walk stops before the first repeated type.
#[must_use]
pub fn base_chain(compilation: &Compilation, id: TypeId) -> Vec<TypeId> {
    let mut chain = Vec::new();
    let mut visited = HashSet::from([id]);
    let mut current = compilation.type_symbol(id).and_then(|s| s.base);

    while let Some(base) = current {
        if !visited.insert(base) {
            break;
        }
        chain.push(base);
        current = compilation.type_symbol(base).and_then(|s| s.base);
    }

    chain
}

/// Finds a cycle in the base-type chain reachable from `id`.
///
/// Returns the types forming the loop, starting and ending with the type
/// where the loop closes.
#[must_use]
pub fn find_inheritance_cycle(compilation: &Compilation, id: TypeId) -> Option<Vec<TypeId>> {
    let mut path = vec![id];
    let mut current = compilation.type_symbol(id).and_then(|s| s.base);

    while let Some(base) = current {
        if let Some(pos) = path.iter().position(|&seen| seen == base) {
            let mut cycle = path.split_off(pos);
            cycle.push(base);
            return Some(cycle);
        }
        path.push(base);
        current = compilation.type_symbol(base).and_then(|s| s.base);
    }

    None
}

/// Returns the dot-qualified namespace of a type, or an empty string for a
/// type in the global namespace.
#[must_use]
pub fn resolve_namespace(compilation: &Compilation, id: TypeId) -> String {
    compilation
        .type_symbol(id)
        .and_then(|symbol| symbol.namespace)
        .map(|ns| namespace_path(compilation, ns))
        .unwrap_or_default()
}

/// Returns the dot-qualified path of a namespace scope.
///
/// Scopes are prepended innermost first with a leading separator, then one
/// leading separator is stripped. The walk is bounded by the arena size.
#[must_use]
pub fn namespace_path(compilation: &Compilation, id: NamespaceId) -> String {
    let mut path = String::new();
    let mut current = Some(id);
    let mut remaining = compilation.namespace_count();

    while let Some(ns) = current {
        if remaining == 0 {
            break;
        }
        remaining -= 1;
        let Some(symbol) = compilation.namespace_symbol(ns) else {
            break;
        };
        path.insert_str(0, &symbol.name);
        path.insert(0, '.');
        current = symbol.parent;
    }

    match path.strip_prefix('.') {
        Some(stripped) => stripped.to_string(),
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKER: &str = "SingletonScriptableObject";

    fn chain_compilation() -> (Compilation, TypeId, TypeId, TypeId) {
        let mut compilation = Compilation::new();
        let root = compilation.add_external_type("ScriptableObject");
        let marker = compilation.add_type(None, MARKER);
        compilation.declare(marker, false);
        compilation.set_base(marker, Some(root));
        let middle = compilation.add_type(None, "ConfigBase");
        compilation.declare(middle, false);
        compilation.set_base(middle, Some(marker));
        (compilation, root, marker, middle)
    }

    #[test]
    fn test_is_derived_from_direct_base() {
        let (compilation, _, marker, _) = chain_compilation();
        assert!(is_derived_from(&compilation, Some(marker), MARKER));
    }

    #[test]
    fn test_is_derived_from_base_of_base() {
        let (compilation, _, _, middle) = chain_compilation();
        assert!(is_derived_from(&compilation, Some(middle), MARKER));
    }

    #[test]
    fn test_is_derived_from_chain_ends() {
        let (compilation, root, _, _) = chain_compilation();
        assert!(!is_derived_from(&compilation, Some(root), MARKER));
        assert!(!is_derived_from(&compilation, None, MARKER));
    }

    #[test]
    fn test_is_derived_from_self_cycle_terminates() {
        let mut compilation = Compilation::new();
        let looped = compilation.add_type(None, "Looped");
        compilation.set_base(looped, Some(looped));

        assert!(!is_derived_from(&compilation, Some(looped), MARKER));
    }

    #[test]
    fn test_is_derived_from_long_cycle_terminates() {
        let mut compilation = Compilation::new();
        let a = compilation.add_type(None, "A");
        let b = compilation.add_type(None, "B");
        let c = compilation.add_type(None, "C");
        compilation.set_base(a, Some(b));
        compilation.set_base(b, Some(c));
        compilation.set_base(c, Some(a));

        assert!(!is_derived_from(&compilation, Some(a), MARKER));
        assert!(is_derived_from(&compilation, Some(a), "C"));
    }

    #[test]
    fn test_base_chain() {
        let (compilation, root, marker, middle) = chain_compilation();
        assert_eq!(base_chain(&compilation, middle), vec![marker, root]);
        assert!(base_chain(&compilation, root).is_empty());
    }

    #[test]
    fn test_find_inheritance_cycle() {
        let mut compilation = Compilation::new();
        let a = compilation.add_type(None, "A");
        let b = compilation.add_type(None, "B");
        let c = compilation.add_type(None, "C");
        compilation.set_base(a, Some(b));
        compilation.set_base(b, Some(c));
        compilation.set_base(c, Some(b));

        assert_eq!(find_inheritance_cycle(&compilation, a), Some(vec![b, c, b]));

        let (acyclic, _, _, middle) = chain_compilation();
        assert_eq!(find_inheritance_cycle(&acyclic, middle), None);
    }

    #[test]
    fn test_resolve_namespace_nested() {
        let mut compilation = Compilation::new();
        let a = compilation.namespace(None, "A");
        let b = compilation.namespace(Some(a), "B");
        let c = compilation.namespace(Some(b), "C");
        let id = compilation.add_type(Some(c), "Thing");

        assert_eq!(resolve_namespace(&compilation, id), "A.B.C");
        assert_eq!(resolve_namespace(&compilation, id), "A.B.C");
    }

    #[test]
    fn test_resolve_namespace_global() {
        let mut compilation = Compilation::new();
        let id = compilation.add_type(None, "Thing");
        assert_eq!(resolve_namespace(&compilation, id), "");
    }

    #[test]
    fn test_resolve_namespace_strips_one_separator() {
        let mut compilation = Compilation::new();
        let ns = compilation.namespace(None, "");
        let id = compilation.add_type(Some(ns), "Thing");
        assert_eq!(resolve_namespace(&compilation, id), "");

        let inner = compilation.namespace(Some(ns), "Inner");
        let nested = compilation.add_type(Some(inner), "Thing");
        assert_eq!(resolve_namespace(&compilation, nested), ".Inner");
    }
}
