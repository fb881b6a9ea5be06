//! # sosgen
//!
//! Source generator for singleton `ScriptableObject` types.
//!
//! Classes that are `partial`, not abstract, and derive (at any depth) from
//! `SingletonScriptableObject` get a companion unit providing a lazily loaded
//! `Instance` property and the surrounding lifecycle boilerplate.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sosgen::prelude::*;
//!
//! let xml = std::fs::read_to_string("declarations.xml")?;
//! let compilation = parse_compilation(&xml)?;
//! validate_compilation(&compilation)?;
//!
//! let mut units: Vec<RenderedUnit> = Vec::new();
//! Generator::new(&compilation).emit(&mut units)?;
//! for unit in &units {
//!     println!("{}", unit.file_name("cs"));
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Crates
//!
//! - `sosgen-model`: declaration model, manifest parser, hierarchy resolution
//! - `sosgen-codegen`: discovery, templates and emission

pub mod prelude;

pub use sosgen_codegen as codegen;
pub use sosgen_model as model;

pub use sosgen_codegen::{generate_from_file, generate_from_xml, generate_to_dir};
