//! Typed storage for declared attributes.

use super::spec::{AttributeKind, AttributeSpec};
use super::value::AttrValue;
use crate::error::{AttrError, Result};
use indexmap::IndexMap;

/// Values of the declared attributes of one component instance, keyed by
/// canonical name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeStore {
    values: IndexMap<&'static str, AttrValue>,
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Coerce `value` according to `spec` and store it.
    ///
    /// # Errors
    ///
    /// Returns [`AttrError::Coercion`] when the value cannot be represented
    /// as the declared kind; the store is left unchanged.
    pub fn write(&mut self, spec: &AttributeSpec, value: AttrValue) -> Result<()> {
        let value = coerce(spec, value)?;
        self.values.insert(spec.name, value);
        Ok(())
    }

    /// Read a declared value by canonical name. `Null` reads as absent.
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.values.get(name).filter(|value| !value.is_null())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn coerce(spec: &AttributeSpec, value: AttrValue) -> Result<AttrValue> {
    let rejected = |value: &AttrValue| AttrError::Coercion {
        name: spec.name.to_string(),
        expected: spec.kind.label(),
        found: value.type_name().to_string(),
    };

    if value.is_null() {
        return Ok(value);
    }

    match spec.kind {
        AttributeKind::Any => Ok(value),
        AttributeKind::String => match value {
            AttrValue::Str(_) => Ok(value),
            AttrValue::Bool(_) | AttrValue::Int(_) | AttrValue::Float(_) => {
                Ok(AttrValue::Str(value.to_text().unwrap_or_default()))
            }
            other => Err(rejected(&other)),
        },
        AttributeKind::Bool => match value {
            AttrValue::Bool(_) => Ok(value),
            AttrValue::Int(0) => Ok(AttrValue::Bool(false)),
            AttrValue::Int(1) => Ok(AttrValue::Bool(true)),
            AttrValue::Str(ref s) => match s.trim() {
                "true" | "1" => Ok(AttrValue::Bool(true)),
                "false" | "0" => Ok(AttrValue::Bool(false)),
                "" => Ok(AttrValue::Null),
                _ => Err(rejected(&value)),
            },
            other => Err(rejected(&other)),
        },
        AttributeKind::Integer => match value {
            AttrValue::Int(_) => Ok(value),
            AttrValue::Float(f) if f.fract() == 0.0 && f.is_finite() => {
                Ok(AttrValue::Int(f as i64))
            }
            AttrValue::Str(ref s) => s
                .trim()
                .parse::<i64>()
                .map(AttrValue::Int)
                .map_err(|_| rejected(&value)),
            other => Err(rejected(&other)),
        },
        AttributeKind::Map => match value {
            AttrValue::Map(_) => Ok(value),
            other => Err(rejected(&other)),
        },
        AttributeKind::Root => match value {
            AttrValue::Str(_) => Ok(value),
            other => Err(rejected(&other)),
        },
    }
}
