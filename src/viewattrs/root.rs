//! # Root Resolution
//!
//! Every component renders into exactly one root, either an HTML tag or
//! another component. This module holds the default behaviour behind
//! [`Component::root_type`], [`Component::root_attributes`] and
//! [`Component::root`].
//!
//! ## Root attribute tiers
//!
//! Merged from the most generic to the most specific source:
//!
//! 1. static root attributes (type configuration)
//! 2. dynamic root attributes (configured hook, evaluated on the instance;
//!    each map it returns is merged in order)
//! 3. call-site attributes (arguments of the `root` call)
//! 4. unknown attributes (collected at construction)
//! 5. instance root attributes (the `root_attributes` construction attribute)

use crate::attributes::AttributeMap;
use crate::component::{Component, RootSpec};
use crate::config::MergeOptions;
use crate::error::Result;
use crate::html;
use tagwright::Markup;

/// Default [`Component::root_type`]: the declared root, else the explicit
/// argument, else the configured default. Memoised on the instance.
pub fn resolve_root_type<C: Component>(component: &C, explicit_root: Option<RootSpec>) -> RootSpec {
    let state = component.state();
    state.resolved_root(|| {
        state
            .declared_root()
            .or(explicit_root)
            .unwrap_or_else(|| C::config().default_root().clone())
    })
}

/// Default [`Component::root_attributes`]: the five-tier merge.
pub fn compose_root_attributes<C: Component>(
    component: &C,
    call_attributes: AttributeMap,
) -> AttributeMap {
    let dynamic = component.dynamic_root_attributes();
    let tiers = std::iter::once(component.static_root_attributes())
        .chain(dynamic.iter().map(Some))
        .chain([
            Some(&call_attributes),
            Some(component.unknown_attributes()),
            component.instance_root_attributes(),
        ]);
    C::config().merge_engine().merge(tiers)
}

/// Default [`Component::root`].
pub fn render_root<C: Component>(
    component: &C,
    explicit_root: Option<RootSpec>,
    call_attributes: AttributeMap,
    content: Markup,
) -> Result<Markup> {
    let root = component.root_type(explicit_root);
    let attributes = component.root_attributes(call_attributes);
    tracing::debug!(component = std::any::type_name::<C>(), root = ?root, "rendering root");
    render_spec(&root, attributes, content, C::config().merge_engine().options())
}

/// Render `root` with already-merged attributes.
///
/// Component roots are instantiated with `attributes` as construction
/// attributes and rendered with `content` as their body.
pub fn render_spec(
    root: &RootSpec,
    attributes: AttributeMap,
    content: Markup,
    options: &MergeOptions,
) -> Result<Markup> {
    match root {
        RootSpec::Component(class) => class.render(attributes, content),
        RootSpec::Tag(tag) => html::render_tag(tag, &attributes, content, options),
    }
}
