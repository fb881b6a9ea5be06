//! Declaration manifest parser.
//!
//! The manifest is a small XML document describing the namespaces and class
//! declarations of one compilation:
//!
//! ```xml
//! <compilation>
//!   <namespace name="App.Config">
//!     <class name="GameSettings" base="SingletonScriptableObject"
//!            partial="true" accessibility="public"/>
//!   </namespace>
//! </compilation>
//! ```
//!
//! Base types are linked once the whole document has been read, so a class
//! may name a base declared further down. Bases that are never declared
//! become external types.

use crate::error::ParseError;
use crate::hierarchy::namespace_path;
use crate::model::{Accessibility, Compilation, NamespaceId, TypeId};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;

/// Open element while walking the document.
#[derive(Debug, Clone, Copy)]
enum Frame {
    Root,
    Namespace(NamespaceId),
    Class,
}

impl Frame {
    const fn element(&self) -> &'static str {
        match self {
            Self::Root => "compilation",
            Self::Namespace(_) => "namespace",
            Self::Class => "class",
        }
    }
}

/// Attributes collected across all parts of a partial class.
#[derive(Debug, Default)]
struct PendingLinks {
    /// Base names in first-seen order.
    bases: Vec<(TypeId, String)>,
    /// Position of each type's entry in `bases`.
    base_slots: HashMap<TypeId, usize>,
    accessibility: HashMap<TypeId, Accessibility>,
}

/// Parses a declaration manifest from a string.
///
/// # Arguments
/// * `xml` - Manifest content
///
/// # Returns
/// The parsed compilation or a parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed, the root element is not
/// `compilation`, an element is unknown in its context, or partial parts of
/// one class disagree on base type or accessibility.
pub fn parse_compilation(xml: &str) -> Result<Compilation, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut compilation = Compilation::new();
    let mut pending = PendingLinks::default();
    let mut stack: Vec<Frame> = Vec::new();
    let mut seen_root = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let frame =
                    open_element(e, &stack, &mut seen_root, &mut compilation, &mut pending)?;
                stack.push(frame);
            }
            Ok(Event::Empty(ref e)) => {
                open_element(e, &stack, &mut seen_root, &mut compilation, &mut pending)?;
            }
            Ok(Event::End(_)) => {
                stack.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    if !seen_root {
        return Err(ParseError::structure("No compilation element found"));
    }

    link(&mut compilation, pending);

    tracing::debug!(
        namespaces = compilation.namespace_count(),
        types = compilation.type_count(),
        declarations = compilation.declaration_count(),
        "parsed declaration manifest"
    );

    Ok(compilation)
}

/// Handles a start or empty element and returns the frame it opens.
fn open_element(
    e: &BytesStart<'_>,
    stack: &[Frame],
    seen_root: &mut bool,
    compilation: &mut Compilation,
    pending: &mut PendingLinks,
) -> Result<Frame, ParseError> {
    let name_bytes = e.name().as_ref().to_vec();
    let name = std::str::from_utf8(&name_bytes)?;

    let Some(parent) = stack.last() else {
        if name != "compilation" {
            return Err(ParseError::structure(format!(
                "expected root element 'compilation', found '{name}'"
            )));
        }
        if *seen_root {
            return Err(ParseError::structure("multiple compilation elements"));
        }
        *seen_root = true;
        return Ok(Frame::Root);
    };

    match (name, parent) {
        ("namespace", Frame::Root | Frame::Namespace(_)) => {
            let ns_name = parse_name(e, "namespace")?;
            let id = compilation.namespace(current_namespace(stack), &ns_name);
            Ok(Frame::Namespace(id))
        }
        ("class", Frame::Root | Frame::Namespace(_)) => {
            parse_class(e, current_namespace(stack), compilation, pending)?;
            Ok(Frame::Class)
        }
        _ => Err(ParseError::unknown_element(name, parent.element())),
    }
}

/// Innermost open namespace, `None` at global scope.
fn current_namespace(stack: &[Frame]) -> Option<NamespaceId> {
    stack.iter().rev().find_map(|frame| match frame {
        Frame::Namespace(id) => Some(*id),
        _ => None,
    })
}

/// Reads the required `name` attribute.
fn parse_name(e: &BytesStart<'_>, element: &str) -> Result<String, ParseError> {
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        if key == "name" {
            return Ok(std::str::from_utf8(&attr.value)?.to_string());
        }
    }
    Err(ParseError::missing_attr(element, "name"))
}

/// Parses a class declaration and merges it into its symbol.
fn parse_class(
    e: &BytesStart<'_>,
    namespace: Option<NamespaceId>,
    compilation: &mut Compilation,
    pending: &mut PendingLinks,
) -> Result<(), ParseError> {
    let mut name = None;
    let mut base = None;
    let mut is_partial = false;
    let mut is_abstract = false;
    let mut accessibility = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "name" => name = Some(value.to_string()),
            "base" => base = Some(value.to_string()),
            "partial" => {
                is_partial = value
                    .parse()
                    .map_err(|_| ParseError::invalid_attr("class", "partial", value))?
            }
            "abstract" => {
                is_abstract = value
                    .parse()
                    .map_err(|_| ParseError::invalid_attr("class", "abstract", value))?
            }
            "accessibility" => {
                accessibility = Some(
                    Accessibility::parse(value)
                        .ok_or_else(|| ParseError::invalid_attr("class", "accessibility", value))?,
                )
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("class", "name"))?;
    let id = compilation.add_type(namespace, &name);

    if let Some(base) = base {
        match pending.base_slots.get(&id) {
            Some(&slot) => {
                let conflicting = pending
                    .bases
                    .get(slot)
                    .filter(|(_, previous)| *previous != base);
                if let Some((_, previous)) = conflicting {
                    return Err(ParseError::structure(format!(
                        "conflicting base types '{previous}' and '{base}' for class '{}'",
                        compilation.full_name(id)
                    )));
                }
            }
            None => {
                pending.base_slots.insert(id, pending.bases.len());
                pending.bases.push((id, base));
            }
        }
    }

    if let Some(accessibility) = accessibility {
        match pending.accessibility.get(&id).copied() {
            Some(previous) if previous != accessibility => {
                return Err(ParseError::structure(format!(
                    "conflicting accessibility '{previous}' and '{accessibility}' for class '{}'",
                    compilation.full_name(id)
                )));
            }
            _ => {
                pending.accessibility.insert(id, accessibility);
            }
        }
    }

    if let Some(symbol) = compilation.type_symbol_mut(id) {
        symbol.is_abstract |= is_abstract;
    }
    compilation.declare(id, is_partial);

    Ok(())
}

/// Resolves pending base names and applies merged accessibility.
fn link(compilation: &mut Compilation, pending: PendingLinks) {
    for (id, accessibility) in pending.accessibility {
        if let Some(symbol) = compilation.type_symbol_mut(id) {
            symbol.accessibility = accessibility;
        }
    }

    // external types added while linking never enter this map
    let declared = compilation.declared_simple_names();
    for (id, base_name) in pending.bases {
        let base = resolve_base(compilation, &declared, id, &base_name);
        compilation.set_base(id, Some(base));
    }
}

/// Looks a base name up from the scope of `from`.
///
/// Enclosing namespaces are tried innermost first, then any declared type
/// with the same simple name. Unknown names become external types.
fn resolve_base(
    compilation: &mut Compilation,
    declared: &HashMap<String, TypeId>,
    from: TypeId,
    base_name: &str,
) -> TypeId {
    let mut scope = compilation
        .type_symbol(from)
        .and_then(|symbol| symbol.namespace);

    while let Some(ns) = scope {
        let candidate = format!("{}.{base_name}", namespace_path(compilation, ns));
        if let Some(id) = compilation.get_type(&candidate) {
            return id;
        }
        scope = compilation.namespace_symbol(ns).and_then(|s| s.parent);
    }

    if let Some(id) = compilation.get_type(base_name) {
        return id;
    }

    match declared.get(base_name) {
        Some(&id) => id,
        None => compilation.add_external_type(base_name),
    }
}
