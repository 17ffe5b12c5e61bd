use super::Component;
use crate::attributes::AttributeMap;
use crate::error::Result;
use std::any::{type_name, TypeId};
use std::fmt;
use tagwright::Markup;

type RenderFn = fn(AttributeMap, Markup) -> Result<Markup>;

/// Copyable handle to a component type.
///
/// Lets a root be "another component" without knowing its concrete type:
/// the handle can build an instance from attributes and render it.
#[derive(Clone, Copy)]
pub struct ComponentClass {
    name: &'static str,
    type_id: fn() -> TypeId,
    render: RenderFn,
}

impl ComponentClass {
    pub fn of<C: Component>() -> Self {
        Self {
            name: type_name::<C>(),
            type_id: TypeId::of::<C>,
            render: instantiate_and_render::<C>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    pub fn is<C: Component>(&self) -> bool {
        self.type_id() == TypeId::of::<C>()
    }

    /// Construct an instance with `attributes` and render it around `content`.
    pub fn render(&self, attributes: AttributeMap, content: Markup) -> Result<Markup> {
        (self.render)(attributes, content)
    }
}

fn instantiate_and_render<C: Component>(attributes: AttributeMap, content: Markup) -> Result<Markup> {
    C::new(attributes)?.render(content)
}

impl PartialEq for ComponentClass {
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id()
    }
}

impl Eq for ComponentClass {}

impl fmt::Debug for ComponentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComponentClass").field(&self.name).finish()
    }
}

/// What a component renders into: an HTML tag or another component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootSpec {
    Tag(String),
    Component(ComponentClass),
}

impl RootSpec {
    pub fn tag(name: impl Into<String>) -> Self {
        RootSpec::Tag(name.into())
    }

    pub fn component<C: Component>() -> Self {
        RootSpec::Component(ComponentClass::of::<C>())
    }
}

impl Default for RootSpec {
    fn default() -> Self {
        RootSpec::tag("div")
    }
}

impl From<&str> for RootSpec {
    fn from(tag: &str) -> Self {
        RootSpec::tag(tag)
    }
}

impl From<String> for RootSpec {
    fn from(tag: String) -> Self {
        RootSpec::Tag(tag)
    }
}

impl From<ComponentClass> for RootSpec {
    fn from(class: ComponentClass) -> Self {
        RootSpec::Component(class)
    }
}
