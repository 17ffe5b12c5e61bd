//! # Components
//!
//! A component is any type implementing [`Component`]. Implementors supply
//! three things: their [`ComponentConfig`], a way to wrap a
//! [`ComponentState`], and access to that state. Everything else
//! (construction with context defaults, unknown-attribute capture, root
//! resolution and the five-tier root attribute merge) comes from provided
//! methods, each of which can be overridden.
//!
//! ```rust
//! use once_cell::sync::Lazy;
//! use viewattrs::{attrs, AttributeKind, AttributeSpec, Component, ComponentConfig, ComponentState};
//! use viewattrs::Markup;
//!
//! struct Alert {
//!     state: ComponentState,
//! }
//!
//! impl Component for Alert {
//!     fn config() -> &'static ComponentConfig<Self> {
//!         static CONFIG: Lazy<ComponentConfig<Alert>> = Lazy::new(|| {
//!             ComponentConfig::builder()
//!                 .attribute(AttributeSpec::new("type", AttributeKind::String))
//!                 .root_attributes(attrs!({"class": "alert"}))
//!                 .build()
//!         });
//!         &CONFIG
//!     }
//!
//!     fn from_state(state: ComponentState) -> Self {
//!         Self { state }
//!     }
//!
//!     fn state(&self) -> &ComponentState {
//!         &self.state
//!     }
//! }
//!
//! let alert = Alert::new(attrs!({"type": "info", "id": "a1"})).unwrap();
//! let html = alert.render(Markup::text("Saved")).unwrap();
//! assert_eq!(html.as_str(), r#"<div class="alert" id="a1">Saved</div>"#);
//! ```

mod class;
mod config;
mod state;

pub use class::{ComponentClass, RootSpec};
pub use config::{ComponentConfig, ComponentConfigBuilder, DynamicRootAttributes};
pub use state::ComponentState;

use crate::attributes::{AttrValue, AttributeMap, ROOT_ATTRIBUTES};
use crate::context;
use crate::error::Result;
use crate::root;
use tagwright::Markup;

pub trait Component: Sized + 'static {
    /// Per-type configuration.
    fn config() -> &'static ComponentConfig<Self>;

    /// Wrap freshly assigned state into an instance.
    fn from_state(state: ComponentState) -> Self;

    fn state(&self) -> &ComponentState;

    /// Build an instance from construction attributes.
    ///
    /// `attributes` always go through the merge engine, with any active
    /// context defaults for this type as the lower tier; the result is then
    /// assigned key by key, declared keys into the store and the rest into
    /// the unknown attributes.
    ///
    /// # Errors
    ///
    /// Propagates coercion failures of declared attributes.
    fn new(attributes: AttributeMap) -> Result<Self> {
        let config = Self::config();
        let defaults = context::active_defaults::<Self>();
        let attributes = config
            .merge_engine()
            .merge([defaults.as_ref(), Some(&attributes)]);

        let mut state = ComponentState::new(config.attributes());
        state.assign_all(attributes)?;
        Ok(Self::from_state(state))
    }

    /// Run `block` with `defaults` applied to every instance of this type
    /// constructed inside it. See [`context`](crate::context).
    fn with_attributes<R>(defaults: AttributeMap, block: impl FnOnce() -> R) -> R {
        context::with_attributes::<Self, R, _>(defaults, block)
    }

    /// Declared attribute value by name or alias.
    fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.state().attribute(name)
    }

    fn unknown_attributes(&self) -> &AttributeMap {
        self.state().unknown_attributes()
    }

    /// Pick what to render into. Resolved once per instance: the declared
    /// root, else `explicit_root`, else the configured default.
    fn root_type(&self, explicit_root: Option<RootSpec>) -> RootSpec {
        root::resolve_root_type(self, explicit_root)
    }

    /// Lowest priority tier: configured on the type.
    fn static_root_attributes(&self) -> Option<&AttributeMap> {
        Self::config().static_root_attributes()
    }

    /// Second tier: computed from this instance by the configured hook.
    /// Each map is its own sub-tier, merged in order.
    fn dynamic_root_attributes(&self) -> Vec<AttributeMap> {
        Self::config()
            .dynamic_root_attributes()
            .map(|hook| hook(self))
            .unwrap_or_default()
    }

    /// Highest priority tier: the `root_attributes` construction attribute.
    fn instance_root_attributes(&self) -> Option<&AttributeMap> {
        self.attribute(ROOT_ATTRIBUTES).and_then(AttrValue::as_map)
    }

    /// Attributes for the root element. Override to change tier order.
    fn root_attributes(&self, call_attributes: AttributeMap) -> AttributeMap {
        root::compose_root_attributes(self, call_attributes)
    }

    /// Render the root element or component around `content`.
    fn root(
        &self,
        explicit_root: Option<RootSpec>,
        call_attributes: AttributeMap,
        content: Markup,
    ) -> Result<Markup> {
        root::render_root(self, explicit_root, call_attributes, content)
    }

    /// Render the component. The default wraps `content` in the root.
    fn render(&self, content: Markup) -> Result<Markup> {
        self.root(None, AttributeMap::new(), content)
    }
}
