//! Prelude module for convenient imports.
//!
//! ```ignore
//! use sosgen::prelude::*;
//! ```

// Model types
pub use sosgen_model::{
    Accessibility, ClassDeclaration, Compilation, ModelError, ParseError, TypeId, TypeSymbol,
    is_derived_from, parse_compilation, resolve_namespace, validate_compilation,
};

// Codegen types
pub use sosgen_codegen::{
    CodegenError, DirectorySink, Eligibility, Generator, GeneratorConfig, OutputSink,
    RenderedUnit, TypeDescriptor, check_eligibility, generate_from_file, generate_from_xml,
    generate_to_dir,
};
