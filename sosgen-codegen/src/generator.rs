//! Emission driver.
//!
//! One [`Generator`] run is one pass: discover eligible types, render a unit
//! per type and hand the units to an [`OutputSink`]. Nothing is cached
//! between runs.

use crate::discovery::{TypeDescriptor, discover};
use crate::error::CodegenError;
use crate::output::{OutputSink, RenderedUnit};
use crate::template::{render, singleton_fragments};
use sosgen_model::Compilation;
use std::collections::HashMap;

/// Marker base type that opts a class into generation.
pub const DEFAULT_MARKER_TYPE: &str = "SingletonScriptableObject";

/// Suffix appended to the type name to form the output key.
pub const DEFAULT_KEY_SUFFIX: &str = "_g";

/// Extension of generated files.
pub const DEFAULT_FILE_EXTENSION: &str = "cs";

/// Generator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    marker_type: String,
    key_suffix: String,
    file_extension: String,
}

impl GeneratorConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            marker_type: DEFAULT_MARKER_TYPE.to_string(),
            key_suffix: DEFAULT_KEY_SUFFIX.to_string(),
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
        }
    }

    /// Sets the marker base type name.
    #[must_use]
    pub fn marker_type(mut self, name: impl Into<String>) -> Self {
        self.marker_type = name.into();
        self
    }

    /// Sets the output key suffix.
    #[must_use]
    pub fn key_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.key_suffix = suffix.into();
        self
    }

    /// Sets the generated file extension (without the dot).
    #[must_use]
    pub fn file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extension = extension.into();
        self
    }

    /// Marker base type name.
    #[must_use]
    pub fn marker(&self) -> &str {
        &self.marker_type
    }

    /// Output key suffix.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.key_suffix
    }

    /// Generated file extension.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.file_extension
    }

    /// Output key for a type name.
    #[must_use]
    pub fn key_for(&self, type_name: &str) -> String {
        format!("{type_name}{}", self.key_suffix)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Generator for singleton companion units.
pub struct Generator<'a> {
    compilation: &'a Compilation,
    config: GeneratorConfig,
}

impl<'a> Generator<'a> {
    /// Creates a generator with default settings.
    #[must_use]
    pub fn new(compilation: &'a Compilation) -> Self {
        Self::with_config(compilation, GeneratorConfig::default())
    }

    /// Creates a generator with the given settings.
    #[must_use]
    pub fn with_config(compilation: &'a Compilation, config: GeneratorConfig) -> Self {
        Self {
            compilation,
            config,
        }
    }

    /// Generator settings.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Returns the descriptors of all eligible types.
    #[must_use]
    pub fn discover(&self) -> Vec<TypeDescriptor> {
        discover(self.compilation, &self.config.marker_type)
            .into_iter()
            .filter_map(|id| TypeDescriptor::from_symbol(self.compilation, id))
            .collect()
    }

    /// Renders the unit for one descriptor.
    ///
    /// The namespace fragments wrap the body only when the namespace is
    /// non-empty. Placeholders are filled as `$0` name, `$1` namespace,
    /// `$2` accessibility.
    #[must_use]
    pub fn render_unit(&self, descriptor: &TypeDescriptor) -> RenderedUnit {
        let fragments = singleton_fragments(descriptor.has_namespace());
        let text = render(&fragments, &descriptor.template_args());
        RenderedUnit::new(self.config.key_for(&descriptor.name), text)
    }

    /// Runs discovery and renders one unit per eligible type.
    ///
    /// Units sharing an output key are all returned; the clash is logged.
    #[must_use]
    pub fn generate(&self) -> Vec<RenderedUnit> {
        let descriptors = self.discover();
        let mut owners: HashMap<String, String> = HashMap::new();
        let mut units = Vec::with_capacity(descriptors.len());

        for descriptor in &descriptors {
            let unit = self.render_unit(descriptor);
            let qualified = qualified_name(descriptor);
            if let Some(previous) = owners.insert(unit.key.clone(), qualified.clone()) {
                tracing::warn!(
                    key = %unit.key,
                    first = %previous,
                    second = %qualified,
                    "output key collision"
                );
            }
            tracing::info!(key = %unit.key, type_name = %qualified, "generated unit");
            units.push(unit);
        }

        tracing::info!(
            declarations = self.compilation.declaration_count(),
            units = units.len(),
            "generation pass complete"
        );

        units
    }

    /// Runs a pass and hands every unit to `sink`.
    ///
    /// # Returns
    /// The number of units emitted.
    ///
    /// # Errors
    /// Returns `CodegenError` if the sink rejects a unit.
    pub fn emit<S: OutputSink + ?Sized>(&self, sink: &mut S) -> Result<usize, CodegenError> {
        let units = self.generate();
        let count = units.len();
        for unit in units {
            sink.add_source(unit)?;
        }
        Ok(count)
    }
}

fn qualified_name(descriptor: &TypeDescriptor) -> String {
    if descriptor.has_namespace() {
        format!("{}.{}", descriptor.namespace, descriptor.name)
    } else {
        descriptor.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{BODY, HEADER, NAMESPACE_CLOSE};
    use sosgen_model::parse_compilation;

    const MANIFEST: &str = r#"<compilation>
    <class name="SingletonScriptableObject" base="ScriptableObject" abstract="true"/>
    <namespace name="App.Config">
        <class name="GameSettings" base="SingletonScriptableObject"
               partial="true" accessibility="public"/>
    </namespace>
    <class name="AudioSettings" base="SingletonScriptableObject" partial="true"/>
    <class name="NotSingleton" base="ScriptableObject" partial="true"/>
</compilation>"#;

    #[test]
    fn test_config_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.marker(), "SingletonScriptableObject");
        assert_eq!(config.suffix(), "_g");
        assert_eq!(config.extension(), "cs");
        assert_eq!(config.key_for("Foo"), "Foo_g");
    }

    #[test]
    fn test_config_builder() {
        let config = GeneratorConfig::new()
            .marker_type("Marker")
            .key_suffix(".generated")
            .file_extension("g.cs");
        assert_eq!(config.marker(), "Marker");
        assert_eq!(config.key_for("Foo"), "Foo.generated");
        assert_eq!(config.extension(), "g.cs");
    }

    #[test]
    fn test_discover_descriptors() {
        let compilation = parse_compilation(MANIFEST).expect("Failed to parse");
        let generator = Generator::new(&compilation);
        let descriptors = generator.discover();

        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].name, "GameSettings");
        assert_eq!(descriptors[0].namespace, "App.Config");
        assert_eq!(descriptors[0].accessibility, "public");
        assert_eq!(descriptors[1].name, "AudioSettings");
        assert_eq!(descriptors[1].namespace, "");
        assert_eq!(descriptors[1].accessibility, "internal");
    }

    #[test]
    fn test_generate_keys() {
        let compilation = parse_compilation(MANIFEST).expect("Failed to parse");
        let units = Generator::new(&compilation).generate();

        let keys: Vec<&str> = units.iter().map(|u| u.key.as_str()).collect();
        assert_eq!(keys, vec!["GameSettings_g", "AudioSettings_g"]);
    }

    #[test]
    fn test_render_with_namespace() {
        let compilation = parse_compilation(MANIFEST).expect("Failed to parse");
        let units = Generator::new(&compilation).generate();
        let text = &units[0].text;

        assert!(text.starts_with(HEADER));
        assert!(text.contains("\nnamespace App.Config {\n"));
        assert!(text.contains("public partial class GameSettings {"));
        assert!(text.contains("Resources.Load<GameSettings>(ResourcesPath)"));
        assert!(text.ends_with(NAMESPACE_CLOSE));
        assert!(!text.contains("$0"));
        assert!(!text.contains("$1"));
        assert!(!text.contains("$2"));
    }

    #[test]
    fn test_render_without_namespace() {
        let compilation = parse_compilation(MANIFEST).expect("Failed to parse");
        let units = Generator::new(&compilation).generate();
        let text = &units[1].text;

        assert!(!text.contains("namespace"));
        assert!(text.contains("internal partial class AudioSettings {"));
        let names = BODY.matches("$0").count();
        let expected_len = HEADER.len() + BODY.len() - "$0".len() * names - "$2".len()
            + "AudioSettings".len() * names
            + "internal".len();
        assert_eq!(text.len(), expected_len);
    }

    #[test]
    fn test_generate_is_repeatable() {
        let compilation = parse_compilation(MANIFEST).expect("Failed to parse");
        let generator = Generator::new(&compilation);
        assert_eq!(generator.generate(), generator.generate());
    }

    #[test]
    fn test_key_collision_preserved() {
        let xml = r#"<compilation>
            <namespace name="A">
                <class name="Settings" base="SingletonScriptableObject" partial="true"/>
            </namespace>
            <namespace name="B">
                <class name="Settings" base="SingletonScriptableObject" partial="true"/>
            </namespace>
        </compilation>"#;
        let compilation = parse_compilation(xml).expect("Failed to parse");
        let units = Generator::new(&compilation).generate();

        assert_eq!(units.len(), 2);
        assert_eq!(units[0].key, "Settings_g");
        assert_eq!(units[1].key, "Settings_g");
        assert!(units[0].text.contains("namespace A {"));
        assert!(units[1].text.contains("namespace B {"));
    }

    #[test]
    fn test_custom_marker() {
        let xml = r#"<compilation>
            <class name="Service" base="ServiceSingleton" partial="true"/>
            <class name="Settings" base="SingletonScriptableObject" partial="true"/>
        </compilation>"#;
        let compilation = parse_compilation(xml).expect("Failed to parse");
        let config = GeneratorConfig::new().marker_type("ServiceSingleton");
        let units = Generator::with_config(&compilation, config).generate();

        assert_eq!(units.len(), 1);
        assert_eq!(units[0].key, "Service_g");
    }

    #[test]
    fn test_emit_into_vec() {
        let compilation = parse_compilation(MANIFEST).expect("Failed to parse");
        let mut sink: Vec<RenderedUnit> = Vec::new();
        let count = Generator::new(&compilation).emit(&mut sink).expect("emit");

        assert_eq!(count, 2);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_emit_empty_compilation() {
        let compilation = Compilation::new();
        let mut sink: Vec<RenderedUnit> = Vec::new();
        assert_eq!(Generator::new(&compilation).emit(&mut sink).unwrap(), 0);
        assert!(sink.is_empty());
    }

    struct RejectingSink;

    impl OutputSink for RejectingSink {
        fn add_source(&mut self, unit: RenderedUnit) -> Result<(), CodegenError> {
            Err(CodegenError::output(unit.key, "rejected"))
        }
    }

    #[test]
    fn test_emit_propagates_sink_error() {
        let compilation = parse_compilation(MANIFEST).expect("Failed to parse");
        let err = Generator::new(&compilation)
            .emit(&mut RejectingSink)
            .unwrap_err();
        assert!(matches!(err, CodegenError::Output { ref key, .. } if key == "GameSettings_g"));
    }
}
