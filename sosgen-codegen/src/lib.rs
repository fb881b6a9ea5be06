//! # sosgen Codegen
//!
//! Singleton companion-source generation.
//!
//! This crate provides:
//! - Discovery of partial, non-abstract classes deriving from a marker type
//! - Positional-placeholder template rendering
//! - One rendered unit per discovered type
//! - Build script integration through directory output

pub mod discovery;
pub mod error;
pub mod generator;
pub mod output;
pub mod template;

pub use discovery::{Eligibility, TypeDescriptor, check_eligibility, discover};
pub use error::CodegenError;
pub use generator::{Generator, GeneratorConfig};
pub use output::{DirectorySink, OutputSink, RenderedUnit};

use std::path::Path;

/// Generates singleton units from a declaration manifest string.
///
/// # Arguments
/// * `xml` - Declaration manifest content
/// * `config` - Generator settings
///
/// # Returns
/// One rendered unit per eligible type.
///
/// # Errors
/// Returns `CodegenError` if parsing or validation fails.
pub fn generate_from_xml(
    xml: &str,
    config: &GeneratorConfig,
) -> Result<Vec<RenderedUnit>, CodegenError> {
    let compilation = sosgen_model::parse_compilation(xml)?;
    sosgen_model::validate_compilation(&compilation)?;
    let generator = Generator::with_config(&compilation, config.clone());
    Ok(generator.generate())
}

/// Generates singleton units from a declaration manifest file.
///
/// # Arguments
/// * `path` - Path to the manifest file
/// * `config` - Generator settings
///
/// # Returns
/// One rendered unit per eligible type.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or validation fails.
pub fn generate_from_file(
    path: &Path,
    config: &GeneratorConfig,
) -> Result<Vec<RenderedUnit>, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml(&xml, config)
}

/// Generates singleton units from a manifest file and writes them to `out_dir`.
///
/// Intended for build scripts.
///
/// # Returns
/// Paths of the written files.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, validation, or writing fails.
pub fn generate_to_dir(
    manifest: &Path,
    out_dir: &Path,
    config: &GeneratorConfig,
) -> Result<Vec<std::path::PathBuf>, CodegenError> {
    let mut sink = DirectorySink::new(out_dir).extension(config.extension());
    for unit in generate_from_file(manifest, config)? {
        sink.add_source(unit)?;
    }
    Ok(sink.written().to_vec())
}
