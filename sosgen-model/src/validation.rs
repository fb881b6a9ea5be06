//! Compilation validation utilities.
//!
//! These checks reject inputs a real compiler would never hand over. The
//! resolvers stay safe on such inputs anyway; validation just reports them
//! up front.

use crate::error::ModelError;
use crate::hierarchy::find_inheritance_cycle;
use crate::model::{Compilation, TypeId};
use std::collections::{HashMap, HashSet};

/// Validates a compilation for consistency.
///
/// # Arguments
/// * `compilation` - The compilation to validate
///
/// # Returns
/// Ok(()) if valid, or ModelError describing the first issue found.
///
/// # Errors
/// Returns `ModelError` if validation fails.
pub fn validate_compilation(compilation: &Compilation) -> Result<(), ModelError> {
    validate_names(compilation)?;
    validate_inheritance(compilation)?;
    validate_partial_parts(compilation)?;
    Ok(())
}

/// Rejects empty namespace and type names.
fn validate_names(compilation: &Compilation) -> Result<(), ModelError> {
    if let Some((_, ns)) = compilation.namespaces().find(|(_, ns)| ns.name.is_empty()) {
        let parent = ns
            .parent
            .map(|p| crate::hierarchy::namespace_path(compilation, p))
            .unwrap_or_default();
        return Err(ModelError::Validation {
            message: format!("empty namespace name under '{parent}'"),
        });
    }

    if let Some((id, _)) = compilation.types().find(|(_, t)| t.name.is_empty()) {
        return Err(ModelError::Validation {
            message: format!("empty type name (type #{})", id.0),
        });
    }

    Ok(())
}

/// Rejects base-type chains that loop.
fn validate_inheritance(compilation: &Compilation) -> Result<(), ModelError> {
    let mut cleared = HashSet::new();

    for (id, _) in compilation.types() {
        if cleared.contains(&id) {
            continue;
        }
        if let Some(cycle) = find_inheritance_cycle(compilation, id) {
            let path = cycle
                .iter()
                .map(|&t| compilation.full_name(t))
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(ModelError::CircularInheritance { path });
        }
        cleared.insert(id);
        cleared.extend(crate::hierarchy::base_chain(compilation, id));
    }

    Ok(())
}

/// Rejects types split across declarations where a part is not `partial`.
fn validate_partial_parts(compilation: &Compilation) -> Result<(), ModelError> {
    // (parts, all_partial) per type
    let mut tally: HashMap<TypeId, (usize, bool)> = HashMap::new();
    for (_, decl) in compilation.declarations() {
        let entry = tally.entry(decl.symbol).or_insert((0, true));
        entry.0 += 1;
        entry.1 &= decl.is_partial;
    }

    // report in type order
    for (id, _) in compilation.types() {
        let split_without_partial = tally
            .get(&id)
            .is_some_and(|&(parts, all_partial)| parts > 1 && !all_partial);
        if split_without_partial {
            return Err(ModelError::MissingPartialModifier {
                type_name: compilation.full_name(id),
            });
        }
    }

    Ok(())
}
