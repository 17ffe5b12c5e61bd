//! # Viewattrs Architecture
//!
//! Viewattrs is an **attribute composition layer** for server-rendered UI
//! components. It does not render templates itself; it decides *which*
//! attributes a component's single root element ends up with, and what that
//! root is.
//!
//! ## The Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Construction (Component::new)                              │
//! │  - context defaults merged under the caller's attributes    │
//! │  - declared keys coerced into the store, others collected   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Root attributes (Component::root_attributes)               │
//! │  - static, dynamic, call-site, unknown, instance tiers      │
//! │  - combined by the merge engine                             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Root resolution (Component::root)                          │
//! │  - tag: flattened to HTML attributes, emitted by tagwright  │
//! │  - component: instantiated with the merged attributes       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`attributes`]: Value model, declared attribute registry and store
//! - [`merge`]: The tier merge engine
//! - [`context`]: Defaults scoped to the dynamic extent of a closure
//! - [`component`]: The `Component` trait, its configuration and state
//! - [`root`]: Root type resolution and root attribute composition
//! - [`html`]: Flattening merged maps into HTML attributes
//! - [`config`]: Merge options
//! - [`error`]: Error types

pub mod attributes;
pub mod component;
pub mod config;
pub mod context;
pub mod error;
pub mod html;
pub mod merge;
pub mod root;

pub use attributes::{
    AttrName, AttrValue, AttributeKind, AttributeMap, AttributeRegistry, AttributeSpec,
    AttributeStore,
};
pub use component::{
    Component, ComponentClass, ComponentConfig, ComponentConfigBuilder, ComponentState, RootSpec,
};
pub use config::MergeOptions;
pub use error::{AttrError, Result};
pub use merge::{merge_attributes, MergeEngine};
pub use tagwright::Markup;

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}

/// Build an [`AttributeMap`] from a JSON object literal.
///
/// ```rust
/// use viewattrs::{attrs, AttrValue};
///
/// let map = attrs!({"class": "btn", "data": {"controller": "menu"}});
/// assert_eq!(map.get("class"), Some(&AttrValue::from("btn")));
/// ```
///
/// # Panics
///
/// Panics when the literal is not a JSON object.
#[macro_export]
macro_rules! attrs {
    ($($json:tt)+) => {
        match $crate::AttributeMap::from_json($crate::__private::serde_json::json!($($json)+)) {
            ::std::result::Result::Ok(map) => map,
            ::std::result::Result::Err(err) => panic!("attrs! expects an object literal: {}", err),
        }
    };
}
