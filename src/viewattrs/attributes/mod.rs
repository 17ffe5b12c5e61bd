//! # Attribute System
//!
//! The value model shared by every stage of the pipeline, plus the typed
//! storage for attributes a component declares.
//!
//! - **Values**: [`AttrValue`] and the ordered [`AttributeMap`] exchanged
//!   between merge tiers
//! - **Specifications**: [`AttributeSpec`] entries in an [`AttributeRegistry`]
//!   tell declared attributes apart from unknown ones
//! - **Storage**: [`AttributeStore`] coerces declared values by kind
//!
//! ## Attribute Kinds
//!
//! | Kind | Accepts |
//! |------|---------|
//! | `Any` | anything |
//! | `String` | text, numbers and booleans (stringified) |
//! | `Bool` | booleans, `"true"`/`"false"`/`"1"`/`"0"`, `0`/`1` |
//! | `Integer` | integers, numeric strings, integral floats |
//! | `Map` | nested attribute maps |
//! | `Root` | tag names |
//!
//! `Null` is accepted by every kind and reads back as absent.

mod spec;
mod store;
mod value;

pub use spec::{
    AttributeKind, AttributeRegistry, AttributeSpec, RESERVED_ATTRIBUTES, ROOT, ROOT_ATTRIBUTES,
    TAG_NAME,
};
pub use store::AttributeStore;
pub use value::{AttrName, AttrValue, AttributeMap};
