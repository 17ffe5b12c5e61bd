//! # Tagwright - HTML Tag Emission
//!
//! A small, dependency-light helper for turning a tag name, a list of
//! attributes and some already-rendered content into serialized HTML.
//!
//! ## The Problem
//!
//! Component libraries need to emit a single element around their content, but:
//! - Attribute values and text must be escaped, markup from children must not
//! - Void elements (`br`, `img`, `input`, ...) have no closing tag
//! - A misconfigured tag name should fail loudly instead of producing `<>`
//!
//! ## The Solution
//!
//! Tagwright separates *trusted* output from *untrusted* input:
//! - [`Markup`] wraps HTML that is already safe to embed
//! - [`Markup::text`] escapes arbitrary text into markup
//! - [`Element`] assembles one tag and validates names before rendering
//!
//! ## Quick Example
//!
//! ```rust
//! use tagwright::{Element, Markup};
//!
//! let html = Element::new("div")
//!     .attr("class", "alert alert-info")
//!     .attr("data-controller", "alert")
//!     .flag("hidden")
//!     .content(Markup::text("Fish & chips"))
//!     .render()
//!     .unwrap();
//!
//! assert_eq!(
//!     html.as_str(),
//!     r#"<div class="alert alert-info" data-controller="alert" hidden>Fish &amp; chips</div>"#
//! );
//! ```

use std::fmt;
use thiserror::Error;

/// Elements that never have content or a closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error("Invalid tag name: {0:?}")]
    InvalidTagName(String),

    #[error("Invalid attribute name {name:?} on <{tag}>")]
    InvalidAttributeName { tag: String, name: String },

    #[error("Void element <{0}> cannot have content")]
    VoidContent(String),
}

/// HTML that is safe to embed as-is.
///
/// Anything built with [`Markup::raw`] is trusted by the caller; use
/// [`Markup::text`] for untrusted strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Markup(String);

impl Markup {
    /// Creates an empty fragment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps already-serialized HTML without escaping it.
    pub fn raw(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Escapes text so it renders literally inside an element.
    pub fn text(text: &str) -> Self {
        Self(escape_text(text))
    }

    /// Appends another fragment.
    pub fn push(&mut self, other: Markup) {
        self.0.push_str(&other.0);
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromIterator<Markup> for Markup {
    fn from_iter<I: IntoIterator<Item = Markup>>(iter: I) -> Self {
        let mut out = Markup::new();
        for part in iter {
            out.push(part);
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Attribute {
    name: String,
    // `None` renders as a bare (boolean) attribute
    value: Option<String>,
}

/// A single HTML element waiting to be rendered.
///
/// Attributes are emitted in insertion order. Adding the same name twice
/// emits it twice; deduplication is the caller's business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<Attribute>,
    content: Option<Markup>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            content: None,
        }
    }

    /// Adds `name="value"`. The value is escaped at render time.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute {
            name: name.into(),
            value: Some(value.into()),
        });
        self
    }

    /// Adds a bare boolean attribute such as `disabled`.
    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(Attribute {
            name: name.into(),
            value: None,
        });
        self
    }

    /// Sets the element body. Replaces any previous content.
    pub fn content(mut self, content: Markup) -> Self {
        self.content = Some(content);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Serializes the element.
    ///
    /// # Errors
    ///
    /// Fails when the tag name or an attribute name cannot be serialized,
    /// or when a void element is given non-empty content.
    pub fn render(&self) -> Result<Markup, TagError> {
        if !is_valid_tag_name(&self.name) {
            return Err(TagError::InvalidTagName(self.name.clone()));
        }

        let mut out = String::with_capacity(self.name.len() * 2 + 5);
        out.push('<');
        out.push_str(&self.name);

        for attribute in &self.attributes {
            if !is_valid_attribute_name(&attribute.name) {
                return Err(TagError::InvalidAttributeName {
                    tag: self.name.clone(),
                    name: attribute.name.clone(),
                });
            }
            out.push(' ');
            out.push_str(&attribute.name);
            if let Some(value) = &attribute.value {
                out.push_str("=\"");
                out.push_str(&escape_attribute_value(value));
                out.push('"');
            }
        }
        out.push('>');

        if is_void(&self.name) {
            if self.content.as_ref().is_some_and(|c| !c.is_empty()) {
                return Err(TagError::VoidContent(self.name.clone()));
            }
            return Ok(Markup(out));
        }

        if let Some(content) = &self.content {
            out.push_str(content.as_str());
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
        Ok(Markup(out))
    }
}

/// Returns true for elements rendered without a closing tag.
pub fn is_void(name: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(name))
}

fn is_valid_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
        }
        _ => false,
    }
}

fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| {
            c.is_whitespace()
                || c.is_control()
                || matches!(c, '"' | '\'' | '>' | '/' | '=' | '<' | '&')
        })
}

/// Escapes special characters in element text.
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escapes special characters in double-quoted attribute values.
pub fn escape_attribute_value(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
