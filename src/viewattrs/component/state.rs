//! Per-instance attribute state and the unknown-attribute collector.

use super::RootSpec;
use crate::attributes::{
    AttrName, AttrValue, AttributeMap, AttributeRegistry, AttributeStore, ROOT,
};
use crate::error::Result;
use once_cell::unsync::OnceCell;

/// Everything a component instance knows about its attributes.
///
/// Owns the declared-attribute store and the map of unknown attributes.
/// Assignment goes through [`assign`](Self::assign): keys the registry
/// declares are coerced into the store, all others are collected as
/// unknown attributes for passthrough to the root element.
#[derive(Debug, Clone)]
pub struct ComponentState {
    registry: &'static AttributeRegistry,
    store: AttributeStore,
    unknown: AttributeMap,
    root_override: Option<RootSpec>,
    resolved_root: OnceCell<RootSpec>,
}

impl ComponentState {
    pub fn new(registry: &'static AttributeRegistry) -> Self {
        Self {
            registry,
            store: AttributeStore::new(),
            unknown: AttributeMap::new(),
            root_override: None,
            resolved_root: OnceCell::new(),
        }
    }

    /// Assign one attribute.
    ///
    /// Unknown keys overwrite any previous unknown value with the same name.
    ///
    /// # Errors
    ///
    /// Propagates coercion failures from the store for declared keys.
    pub fn assign(&mut self, name: impl Into<AttrName>, value: impl Into<AttrValue>) -> Result<()> {
        let name = name.into();
        let value = value.into();
        match self.registry.get(name.as_str()) {
            Some(spec) => self.store.write(spec, value),
            None => {
                tracing::trace!(attribute = %name, "collected unknown attribute");
                self.unknown.insert(name, value);
                Ok(())
            }
        }
    }

    /// Assign every entry of `attributes`, in order. Stops at the first
    /// failure.
    pub fn assign_all(&mut self, attributes: AttributeMap) -> Result<()> {
        for (name, value) in attributes {
            self.assign(name, value)?;
        }
        Ok(())
    }

    /// Read a declared attribute by name or alias.
    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        let spec = self.registry.get(name)?;
        self.store.get(spec.name)
    }

    pub fn unknown_attributes(&self) -> &AttributeMap {
        &self.unknown
    }

    /// Declare the instance root directly, including component roots the
    /// `root` attribute cannot carry. Has no effect once the root has been
    /// resolved for rendering.
    pub fn set_root(&mut self, root: RootSpec) {
        self.root_override = Some(root);
    }

    /// Root declared on this instance, if any.
    pub fn declared_root(&self) -> Option<RootSpec> {
        if let Some(root) = &self.root_override {
            return Some(root.clone());
        }
        self.attribute(ROOT)
            .and_then(AttrValue::as_str)
            .map(RootSpec::tag)
    }

    /// The resolved root, computing it with `resolve` on first use only.
    pub fn resolved_root(&self, resolve: impl FnOnce() -> RootSpec) -> RootSpec {
        self.resolved_root.get_or_init(resolve).clone()
    }
}
