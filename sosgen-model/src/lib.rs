//! # sosgen Model
//!
//! In-memory declaration model consumed by the singleton generator.
//!
//! This crate provides:
//! - An arena-indexed model of namespaces, type symbols and class declarations
//! - An XML declaration-manifest parser
//! - Inheritance and namespace resolution over the model
//! - Model validation

pub mod error;
pub mod hierarchy;
pub mod model;
pub mod parser;
pub mod validation;

pub use error::{ModelError, ParseError};
pub use hierarchy::{base_chain, find_inheritance_cycle, is_derived_from, resolve_namespace};
pub use model::{
    Accessibility, ClassDeclaration, Compilation, DeclId, NamespaceId, NamespaceSymbol, TypeId,
    TypeSymbol,
};
pub use parser::parse_compilation;
pub use validation::validate_compilation;
