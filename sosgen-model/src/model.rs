//! Declaration model definitions.
//!
//! A [`Compilation`] owns three arenas: namespace scopes, type symbols and the
//! syntactic class declarations that introduce them. Everything else refers
//! to entries by index, so inheritance and namespace chains are plain loops
//! over ids rather than pointer walks.

use std::collections::HashMap;
use std::fmt;

/// Index into the namespace arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespaceId(pub u32);

/// Index into the type-symbol arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

/// Index into the declaration arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(pub u32);

/// Declared visibility of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accessibility {
    /// `public`.
    Public,
    /// `internal`, the default for top-level types.
    #[default]
    Internal,
    /// `protected`.
    Protected,
    /// `private`.
    Private,
    /// `protected internal`.
    ProtectedOrInternal,
    /// `private protected`.
    ProtectedAndInternal,
    /// No accessibility applies.
    NotApplicable,
}

impl Accessibility {
    /// Parses C# modifier text such as `public` or `protected internal`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let words: Vec<&str> = s.split_whitespace().collect();
        match words.as_slice() {
            ["public"] => Some(Self::Public),
            ["internal"] => Some(Self::Internal),
            ["protected"] => Some(Self::Protected),
            ["private"] => Some(Self::Private),
            ["protected", "internal"] | ["internal", "protected"] => {
                Some(Self::ProtectedOrInternal)
            }
            ["private", "protected"] | ["protected", "private"] => {
                Some(Self::ProtectedAndInternal)
            }
            _ => None,
        }
    }

    /// Returns the lowercase name of the accessibility level.
    ///
    /// Composite levels collapse to a single word (`protectedorinternal`),
    /// which is what gets spliced into generated declarations.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::ProtectedOrInternal => "protectedorinternal",
            Self::ProtectedAndInternal => "protectedandinternal",
            Self::NotApplicable => "notapplicable",
        }
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A namespace scope. The global namespace has no symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceSymbol {
    /// Simple name of this scope.
    pub name: String,
    /// Enclosing scope, `None` directly under the global namespace.
    pub parent: Option<NamespaceId>,
}

/// Semantic view of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSymbol {
    /// Simple type name.
    pub name: String,
    /// Enclosing namespace, `None` for the global namespace.
    pub namespace: Option<NamespaceId>,
    /// Immediate base type.
    pub base: Option<TypeId>,
    /// Whether the type is declared abstract.
    pub is_abstract: bool,
    /// Declared accessibility.
    pub accessibility: Accessibility,
    /// Referenced but not declared in this compilation.
    pub is_external: bool,
}

impl TypeSymbol {
    /// Creates a non-abstract internal type with no base.
    #[must_use]
    pub fn new(name: impl Into<String>, namespace: Option<NamespaceId>) -> Self {
        Self {
            name: name.into(),
            namespace,
            base: None,
            is_abstract: false,
            accessibility: Accessibility::default(),
            is_external: false,
        }
    }
}

/// One syntactic class declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassDeclaration {
    /// Symbol this declaration contributes to.
    pub symbol: TypeId,
    /// Whether the declaration carries the `partial` modifier.
    pub is_partial: bool,
}

/// All declarations visible in one compilation pass.
#[derive(Debug, Clone, Default)]
pub struct Compilation {
    namespaces: Vec<NamespaceSymbol>,
    types: Vec<TypeSymbol>,
    declarations: Vec<ClassDeclaration>,
    /// Lookup by `(parent, name)`.
    namespace_map: HashMap<(Option<NamespaceId>, String), NamespaceId>,
    /// Lookup by fully-qualified name.
    type_map: HashMap<String, TypeId>,
}

impl Compilation {
    /// Creates an empty compilation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the namespace `name` under `parent`, creating it if needed.
    ///
    /// A dotted name opens one nested scope per segment, so `A.B` under the
    /// global namespace is `B` inside `A`.
    pub fn namespace(&mut self, parent: Option<NamespaceId>, name: &str) -> NamespaceId {
        let mut current = parent;
        let mut id = None;
        for segment in name.split('.') {
            let key = (current, segment.to_string());
            let next = match self.namespace_map.get(&key) {
                Some(&existing) => existing,
                None => {
                    let new_id = NamespaceId(self.namespaces.len() as u32);
                    self.namespaces.push(NamespaceSymbol {
                        name: segment.to_string(),
                        parent: current,
                    });
                    self.namespace_map.insert(key, new_id);
                    new_id
                }
            };
            current = Some(next);
            id = Some(next);
        }
        // split always yields at least one segment
        id.unwrap_or(NamespaceId(0))
    }

    /// Returns the type `name` in `namespace`, creating it if needed.
    pub fn add_type(&mut self, namespace: Option<NamespaceId>, name: &str) -> TypeId {
        let full_name = self.qualify(namespace, name);
        if let Some(&id) = self.type_map.get(&full_name) {
            return id;
        }
        let id = TypeId(self.types.len() as u32);
        self.types.push(TypeSymbol::new(name, namespace));
        self.type_map.insert(full_name, id);
        id
    }

    /// Registers a type that is referenced but never declared.
    ///
    /// `qualified_name` may be dotted; its namespace prefix is interned. A
    /// type that already exists is returned unchanged.
    pub fn add_external_type(&mut self, qualified_name: &str) -> TypeId {
        let (namespace, name) = match qualified_name.rsplit_once('.') {
            Some((ns, name)) => (Some(self.namespace(None, ns)), name),
            None => (None, qualified_name),
        };
        let known = self.types.len();
        let id = self.add_type(namespace, name);
        // only a type created by this call sits at index `known`
        if let Some(symbol) = self.types.get_mut(known) {
            symbol.is_external = true;
        }
        id
    }

    /// Records a class declaration for `symbol`.
    ///
    /// Returns `None`, recording nothing, if `symbol` is not in this
    /// compilation.
    pub fn declare(&mut self, symbol: TypeId, is_partial: bool) -> Option<DeclId> {
        self.type_symbol_mut(symbol)?.is_external = false;
        let id = DeclId(self.declarations.len() as u32);
        self.declarations.push(ClassDeclaration { symbol, is_partial });
        Some(id)
    }

    /// Sets the immediate base type of `id`. Unknown ids are ignored.
    pub fn set_base(&mut self, id: TypeId, base: Option<TypeId>) {
        if let Some(symbol) = self.type_symbol_mut(id) {
            symbol.base = base;
        }
    }

    /// Gets a namespace symbol by id.
    #[must_use]
    pub fn namespace_symbol(&self, id: NamespaceId) -> Option<&NamespaceSymbol> {
        self.namespaces.get(id.0 as usize)
    }

    /// Gets a type symbol by id.
    #[must_use]
    pub fn type_symbol(&self, id: TypeId) -> Option<&TypeSymbol> {
        self.types.get(id.0 as usize)
    }

    /// Gets a mutable type symbol by id.
    pub fn type_symbol_mut(&mut self, id: TypeId) -> Option<&mut TypeSymbol> {
        self.types.get_mut(id.0 as usize)
    }

    /// Looks up a type by fully-qualified name.
    #[must_use]
    pub fn get_type(&self, full_name: &str) -> Option<TypeId> {
        self.type_map.get(full_name).copied()
    }

    /// Maps each simple name to the first declared type carrying it.
    ///
    /// External types are left out. Built in one pass, for callers that
    /// resolve many names against the same compilation.
    #[must_use]
    pub fn declared_simple_names(&self) -> HashMap<String, TypeId> {
        let mut names = HashMap::new();
        for (id, symbol) in self.types() {
            if !symbol.is_external {
                names.entry(symbol.name.clone()).or_insert(id);
            }
        }
        names
    }

    /// Returns true if a type with the given fully-qualified name exists.
    #[must_use]
    pub fn has_type(&self, full_name: &str) -> bool {
        self.type_map.contains_key(full_name)
    }

    /// Returns the fully-qualified name of a type.
    #[must_use]
    pub fn full_name(&self, id: TypeId) -> String {
        match self.type_symbol(id) {
            Some(symbol) => self.qualify(symbol.namespace, &symbol.name),
            None => String::new(),
        }
    }

    /// Iterates over all class declarations in declaration order.
    pub fn declarations(&self) -> impl Iterator<Item = (DeclId, &ClassDeclaration)> {
        self.declarations
            .iter()
            .enumerate()
            .map(|(idx, decl)| (DeclId(idx as u32), decl))
    }

    /// Iterates over all declarations of one symbol.
    pub fn declarations_of(&self, symbol: TypeId) -> impl Iterator<Item = &ClassDeclaration> {
        self.declarations
            .iter()
            .filter(move |decl| decl.symbol == symbol)
    }

    /// Iterates over all type symbols.
    pub fn types(&self) -> impl Iterator<Item = (TypeId, &TypeSymbol)> {
        self.types
            .iter()
            .enumerate()
            .map(|(idx, symbol)| (TypeId(idx as u32), symbol))
    }

    /// Iterates over all namespace symbols.
    pub fn namespaces(&self) -> impl Iterator<Item = (NamespaceId, &NamespaceSymbol)> {
        self.namespaces
            .iter()
            .enumerate()
            .map(|(idx, symbol)| (NamespaceId(idx as u32), symbol))
    }

    /// Number of namespace scopes.
    #[must_use]
    pub fn namespace_count(&self) -> usize {
        self.namespaces.len()
    }

    /// Number of type symbols.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Number of class declarations.
    #[must_use]
    pub fn declaration_count(&self) -> usize {
        self.declarations.len()
    }

    fn qualify(&self, namespace: Option<NamespaceId>, name: &str) -> String {
        let ns = namespace
            .map(|id| crate::hierarchy::namespace_path(self, id))
            .unwrap_or_default();
        if ns.is_empty() {
            name.to_string()
        } else {
            format!("{ns}.{name}")
        }
    }
}
