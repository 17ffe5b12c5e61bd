//! Declared attribute specifications and registry.
//!
//! A component type declares the attributes it recognises up front. Any key
//! not found in its registry is an "unknown" attribute and gets collected
//! for passthrough instead of stored.

/// Name of the reserved attribute holding an instance-level root tag.
pub const ROOT: &str = "root";

/// Alias accepted for [`ROOT`].
pub const TAG_NAME: &str = "tag_name";

/// Name of the reserved attribute holding instance-level root attributes.
pub const ROOT_ATTRIBUTES: &str = "root_attributes";

/// The kind of value a declared attribute holds.
///
/// Determines how values are coerced when written to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Stored exactly as given
    Any,

    /// Text; numbers and booleans are stringified
    String,

    /// Boolean; accepts `"true"`, `"false"`, `"1"`, `"0"`, `""`, `0` and `1`
    Bool,

    /// Integer; accepts numeric strings and integral floats
    Integer,

    /// Nested attribute map
    Map,

    /// Tag name for the root element
    Root,
}

impl AttributeKind {
    pub fn label(&self) -> &'static str {
        match self {
            AttributeKind::Any => "any",
            AttributeKind::String => "string",
            AttributeKind::Bool => "bool",
            AttributeKind::Integer => "integer",
            AttributeKind::Map => "map",
            AttributeKind::Root => "tag name",
        }
    }
}

/// Specification for a single declared attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSpec {
    /// Canonical name, used for storage and lookups
    pub name: &'static str,

    /// The kind of value this attribute holds
    pub kind: AttributeKind,

    /// Alternative name accepted on assignment and lookup
    pub alias: Option<&'static str>,
}

impl AttributeSpec {
    /// Create a spec with no alias.
    pub const fn new(name: &'static str, kind: AttributeKind) -> Self {
        Self {
            name,
            kind,
            alias: None,
        }
    }

    /// Set the alias.
    pub const fn alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.alias == Some(name)
    }
}

/// Attributes every component declares.
pub const RESERVED_ATTRIBUTES: &[AttributeSpec] = &[
    AttributeSpec::new(ROOT, AttributeKind::Root).alias(TAG_NAME),
    AttributeSpec::new(ROOT_ATTRIBUTES, AttributeKind::Map),
];

/// Registry of the attributes declared by one component type.
///
/// Always contains [`RESERVED_ATTRIBUTES`]. Declaring a name twice keeps
/// the latest spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRegistry {
    specs: Vec<AttributeSpec>,
}

impl Default for AttributeRegistry {
    fn default() -> Self {
        Self {
            specs: RESERVED_ATTRIBUTES.to_vec(),
        }
    }
}

impl AttributeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an attribute.
    pub fn declare(&mut self, spec: AttributeSpec) {
        self.specs.retain(|existing| existing.name != spec.name);
        self.specs.push(spec);
    }

    /// Look up a spec by canonical name or alias.
    pub fn get(&self, name: &str) -> Option<&AttributeSpec> {
        self.specs.iter().find(|spec| spec.answers_to(name))
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeSpec> {
        self.specs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_starts_with_reserved_entries() {
        let registry = AttributeRegistry::new();
        assert_eq!(registry.get(ROOT).unwrap().kind, AttributeKind::Root);
        assert_eq!(registry.get(ROOT_ATTRIBUTES).unwrap().kind, AttributeKind::Map);
    }

    #[test]
    fn alias_resolves_to_canonical_spec() {
        let registry = AttributeRegistry::new();
        let spec = registry.get(TAG_NAME).unwrap();
        assert_eq!(spec.name, ROOT);
    }

    #[test]
    fn unknown_attribute_returns_none() {
        let registry = AttributeRegistry::new();
        assert!(registry.get("mystery").is_none());
        assert!(!registry.is_declared("mystery"));
    }

    #[test]
    fn declare_adds_spec() {
        let mut registry = AttributeRegistry::new();
        registry.declare(AttributeSpec::new("type", AttributeKind::String));
        assert!(registry.is_declared("type"));
        assert_eq!(registry.iter().count(), 3);
    }

    #[test]
    fn redeclaring_replaces_previous_spec() {
        let mut registry = AttributeRegistry::new();
        registry.declare(AttributeSpec::new("size", AttributeKind::String));
        registry.declare(AttributeSpec::new("size", AttributeKind::Integer));
        assert_eq!(registry.get("size").unwrap().kind, AttributeKind::Integer);
        assert_eq!(registry.iter().filter(|s| s.name == "size").count(), 1);
    }
}
