//! # sosgen Bench
//!
//! Synthetic inputs for the generation benchmarks.

use sosgen_model::{Accessibility, Compilation};

/// Marker base type used by the fixtures.
pub const MARKER: &str = "SingletonScriptableObject";

/// Builds a compilation with `count` classes spread over a few namespaces.
///
/// Every third class is eligible, the rest are split between abstract,
/// non-partial and unrelated classes. Eligible classes reach the marker
/// through `depth` intermediate abstract bases.
#[must_use]
pub fn synthetic_compilation(count: usize, depth: usize) -> Compilation {
    let mut compilation = Compilation::new();
    let core = compilation.namespace(None, "Game.Core");
    let object = compilation.add_external_type("UnityEngine.ScriptableObject");
    let marker = compilation.add_type(Some(core), MARKER);
    compilation.declare(marker, false);
    compilation.set_base(marker, Some(object));
    if let Some(symbol) = compilation.type_symbol_mut(marker) {
        symbol.is_abstract = true;
    }

    let mut base = marker;
    for level in 0..depth {
        let id = compilation.add_type(Some(core), &format!("Layer{level}"));
        compilation.declare(id, false);
        compilation.set_base(id, Some(base));
        if let Some(symbol) = compilation.type_symbol_mut(id) {
            symbol.is_abstract = true;
        }
        base = id;
    }

    for i in 0..count {
        let ns = compilation.namespace(None, &format!("App.Module{}", i % 8));
        let id = compilation.add_type(Some(ns), &format!("Settings{i}"));
        match i % 6 {
            0 | 3 => {
                compilation.declare(id, true);
                compilation.set_base(id, Some(base));
                if let Some(symbol) = compilation.type_symbol_mut(id) {
                    symbol.accessibility = Accessibility::Public;
                }
            }
            1 => {
                compilation.declare(id, true);
                compilation.set_base(id, Some(base));
                if let Some(symbol) = compilation.type_symbol_mut(id) {
                    symbol.is_abstract = true;
                }
            }
            2 => {
                compilation.declare(id, false);
                compilation.set_base(id, Some(base));
            }
            _ => {
                compilation.declare(id, true);
                compilation.set_base(id, Some(object));
            }
        }
    }

    compilation
}

/// Builds the equivalent declaration manifest for [`synthetic_compilation`]
/// with no intermediate layers.
#[must_use]
pub fn synthetic_manifest(count: usize) -> String {
    let mut xml = String::from("<compilation>\n");
    xml.push_str(&format!(
        "  <class name=\"{MARKER}\" base=\"ScriptableObject\" abstract=\"true\"/>\n"
    ));
    for i in 0..count {
        let partial = i % 6 != 2;
        xml.push_str(&format!(
            "  <namespace name=\"App.Module{}\"><class name=\"Settings{i}\" base=\"{MARKER}\" partial=\"{partial}\"/></namespace>\n",
            i % 8
        ));
    }
    xml.push_str("</compilation>\n");
    xml
}
