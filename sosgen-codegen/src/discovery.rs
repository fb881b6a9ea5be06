//! Discovery of singleton candidates.
//!
//! A class declaration is eligible when it is `partial`, its type is not
//! abstract, and the marker type appears somewhere above it in the
//! inheritance chain. Ineligible declarations are skipped without an error;
//! [`Eligibility`] records why, for callers that want to know.

use sosgen_model::{ClassDeclaration, Compilation, TypeId, is_derived_from, resolve_namespace};
use std::collections::HashSet;
use std::fmt;

/// Outcome of the eligibility check for one declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eligibility {
    /// The declaration gets a companion unit.
    Eligible,
    /// The declaration lacks the `partial` modifier.
    NotPartial,
    /// The type is declared abstract.
    Abstract,
    /// The marker type is not in the inheritance chain.
    WrongAncestry,
}

impl Eligibility {
    /// Returns true for [`Eligibility::Eligible`].
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible)
    }
}

impl fmt::Display for Eligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::Eligible => "eligible",
            Self::NotPartial => "not declared partial",
            Self::Abstract => "abstract",
            Self::WrongAncestry => "marker type not in inheritance chain",
        };
        f.write_str(reason)
    }
}

/// Identity of one type that gets a companion unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Simple type name.
    pub name: String,
    /// Dot-qualified namespace, empty for the global namespace.
    pub namespace: String,
    /// Lowercase accessibility keyword.
    pub accessibility: String,
}

impl TypeDescriptor {
    /// Builds the descriptor for a type symbol.
    ///
    /// Returns `None` if `id` is not in the compilation.
    #[must_use]
    pub fn from_symbol(compilation: &Compilation, id: TypeId) -> Option<Self> {
        let symbol = compilation.type_symbol(id)?;
        Some(Self {
            name: symbol.name.clone(),
            namespace: resolve_namespace(compilation, id),
            accessibility: symbol.accessibility.keyword().to_string(),
        })
    }

    /// Returns true if the type lives in a named namespace.
    #[must_use]
    pub fn has_namespace(&self) -> bool {
        !self.namespace.is_empty()
    }

    /// Template arguments in placeholder order: name, namespace, accessibility.
    #[must_use]
    pub fn template_args(&self) -> [&str; 3] {
        [
            self.name.as_str(),
            self.namespace.as_str(),
            self.accessibility.as_str(),
        ]
    }
}

/// Checks one declaration against the eligibility rules.
///
/// Rules are applied in order: partial modifier, abstractness, ancestry. The
/// ancestry walk starts at the type's base, so the marker type itself is
/// never eligible.
#[must_use]
pub fn check_eligibility(
    compilation: &Compilation,
    declaration: &ClassDeclaration,
    marker: &str,
) -> Eligibility {
    if !declaration.is_partial {
        return Eligibility::NotPartial;
    }
    let Some(symbol) = compilation.type_symbol(declaration.symbol) else {
        return Eligibility::WrongAncestry;
    };
    if symbol.is_abstract {
        return Eligibility::Abstract;
    }
    if !is_derived_from(compilation, symbol.base, marker) {
        return Eligibility::WrongAncestry;
    }
    Eligibility::Eligible
}

/// Collects the eligible type symbols of a compilation.
///
/// Types are returned in the order of their first eligible declaration. A
/// type declared in several partial parts appears once.
#[must_use]
pub fn discover(compilation: &Compilation, marker: &str) -> Vec<TypeId> {
    let mut seen = HashSet::new();
    let mut eligible = Vec::new();

    for (decl_id, declaration) in compilation.declarations() {
        let outcome = check_eligibility(compilation, declaration, marker);
        if !outcome.is_eligible() {
            tracing::debug!(
                declaration = decl_id.0,
                type_name = %compilation.full_name(declaration.symbol),
                reason = %outcome,
                "skipping declaration"
            );
            continue;
        }
        if seen.insert(declaration.symbol) {
            eligible.push(declaration.symbol);
        }
    }

    eligible
}
