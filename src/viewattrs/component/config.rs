use super::RootSpec;
use crate::attributes::{AttributeMap, AttributeRegistry, AttributeSpec};
use crate::config::MergeOptions;
use crate::merge::MergeEngine;

/// Hook computing root attributes from a live component instance.
///
/// Returns an ordered list of maps, merged lowest priority first into the
/// dynamic tier. An empty list contributes nothing.
pub type DynamicRootAttributes<C> = fn(&C) -> Vec<AttributeMap>;

/// Immutable, per-type component configuration.
///
/// Built once (usually inside a `once_cell::sync::Lazy`) and read-only
/// afterwards.
///
/// ```rust
/// use viewattrs::{attrs, AttributeKind, AttributeSpec, ComponentConfig, RootSpec};
/// # struct Alert;
///
/// let config: ComponentConfig<Alert> = ComponentConfig::builder()
///     .attribute(AttributeSpec::new("type", AttributeKind::String))
///     .root("article")
///     .root_attributes(attrs!({"class": "alert"}))
///     .build();
///
/// assert_eq!(config.default_root(), &RootSpec::tag("article"));
/// ```
pub struct ComponentConfig<C> {
    attributes: AttributeRegistry,
    default_root: RootSpec,
    static_root_attributes: Option<AttributeMap>,
    dynamic_root_attributes: Option<DynamicRootAttributes<C>>,
    merge_engine: MergeEngine,
}

impl<C> ComponentConfig<C> {
    pub fn builder() -> ComponentConfigBuilder<C> {
        ComponentConfigBuilder::default()
    }

    /// Declared attributes, including the reserved ones.
    pub fn attributes(&self) -> &AttributeRegistry {
        &self.attributes
    }

    pub fn default_root(&self) -> &RootSpec {
        &self.default_root
    }

    pub fn static_root_attributes(&self) -> Option<&AttributeMap> {
        self.static_root_attributes.as_ref()
    }

    pub fn dynamic_root_attributes(&self) -> Option<DynamicRootAttributes<C>> {
        self.dynamic_root_attributes
    }

    pub fn merge_engine(&self) -> &MergeEngine {
        &self.merge_engine
    }
}

pub struct ComponentConfigBuilder<C> {
    attributes: AttributeRegistry,
    default_root: RootSpec,
    static_root_attributes: Option<AttributeMap>,
    dynamic_root_attributes: Option<DynamicRootAttributes<C>>,
    merge_options: MergeOptions,
}

impl<C> Default for ComponentConfigBuilder<C> {
    fn default() -> Self {
        Self {
            attributes: AttributeRegistry::new(),
            default_root: RootSpec::default(),
            static_root_attributes: None,
            dynamic_root_attributes: None,
            merge_options: MergeOptions::default(),
        }
    }
}

impl<C> ComponentConfigBuilder<C> {
    /// Declare an attribute.
    pub fn attribute(mut self, spec: AttributeSpec) -> Self {
        self.attributes.declare(spec);
        self
    }

    /// Set the root used when neither the instance nor the render call picks
    /// one. Defaults to `div`.
    pub fn root(mut self, root: impl Into<RootSpec>) -> Self {
        self.default_root = root.into();
        self
    }

    /// Set the static (lowest priority) root attributes.
    pub fn root_attributes(mut self, attributes: AttributeMap) -> Self {
        self.static_root_attributes = Some(attributes);
        self
    }

    /// Register the hook producing the dynamic root attributes tier.
    pub fn dynamic_root_attributes(mut self, hook: DynamicRootAttributes<C>) -> Self {
        self.dynamic_root_attributes = Some(hook);
        self
    }

    pub fn merge_options(mut self, options: MergeOptions) -> Self {
        self.merge_options = options;
        self
    }

    pub fn build(self) -> ComponentConfig<C> {
        ComponentConfig {
            attributes: self.attributes,
            default_root: self.default_root,
            static_root_attributes: self.static_root_attributes,
            dynamic_root_attributes: self.dynamic_root_attributes,
            merge_engine: MergeEngine::new(self.merge_options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeKind;
    use crate::attrs;

    struct Plain;

    #[test]
    fn defaults() {
        let config: ComponentConfig<Plain> = ComponentConfig::builder().build();
        assert_eq!(config.default_root(), &RootSpec::tag("div"));
        assert!(config.static_root_attributes().is_none());
        assert!(config.dynamic_root_attributes().is_none());
        assert!(config.attributes().is_declared("root"));
        assert!(config.attributes().is_declared("root_attributes"));
        assert_eq!(config.merge_engine().options(), &MergeOptions::default());
    }

    #[test]
    fn builder_sets_every_field() {
        fn hook(_: &Plain) -> Vec<AttributeMap> {
            vec![attrs!({"data": {"kind": "plain"}})]
        }

        let config: ComponentConfig<Plain> = ComponentConfig::builder()
            .attribute(AttributeSpec::new("type", AttributeKind::String))
            .root("section")
            .root_attributes(attrs!({"class": "box"}))
            .dynamic_root_attributes(hook)
            .merge_options(MergeOptions::default().class_like("rel"))
            .build();

        assert!(config.attributes().is_declared("type"));
        assert_eq!(config.default_root(), &RootSpec::tag("section"));
        assert_eq!(config.static_root_attributes(), Some(&attrs!({"class": "box"})));
        let computed = config.dynamic_root_attributes().map(|f| f(&Plain));
        assert_eq!(computed, Some(vec![attrs!({"data": {"kind": "plain"}})]));
        assert!(config.merge_engine().options().is_class_like("rel"));
    }
}
