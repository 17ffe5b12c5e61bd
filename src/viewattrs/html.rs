//! Flattening merged attribute maps into HTML attributes.
//!
//! | Value | Rendered as |
//! |-------|-------------|
//! | string / number | `name="value"` |
//! | `true` | bare `name` (`name="true"` inside a nested map) |
//! | `false` / null | omitted |
//! | class-like value | space-joined tokens, omitted when empty |
//! | list | space-joined items (JSON inside a nested map) |
//! | nested map | one `name-key` attribute per entry, `_` in keys becomes `-` |

use crate::attributes::{AttrValue, AttributeMap};
use crate::config::MergeOptions;
use crate::error::{AttrError, Result};
use crate::merge::class_tokens;
use tagwright::{Element, Markup};

/// A single flattened HTML attribute; `None` renders as a bare attribute.
pub type HtmlAttribute = (String, Option<String>);

/// Flatten `attributes` in order.
pub fn html_attributes(
    attributes: &AttributeMap,
    options: &MergeOptions,
) -> Result<Vec<HtmlAttribute>> {
    let mut out = Vec::with_capacity(attributes.len());
    flatten(None, attributes, options, &mut out)?;
    Ok(out)
}

/// Emit `tag` with the flattened `attributes` around `content`.
///
/// # Errors
///
/// Tag emission errors (an empty or malformed tag name, an attribute name
/// that cannot be serialized) are returned as [`AttrError::Tag`].
pub fn render_tag(
    tag: &str,
    attributes: &AttributeMap,
    content: Markup,
    options: &MergeOptions,
) -> Result<Markup> {
    let element = html_attributes(attributes, options)?
        .into_iter()
        .fold(Element::new(tag), |element, (name, value)| match value {
            Some(value) => element.attr(name, value),
            None => element.flag(name),
        });
    Ok(element.content(content).render()?)
}

fn flatten(
    prefix: Option<&str>,
    attributes: &AttributeMap,
    options: &MergeOptions,
    out: &mut Vec<HtmlAttribute>,
) -> Result<()> {
    for (name, value) in attributes {
        let full_name = match prefix {
            None => name.to_string(),
            Some(prefix) => format!("{}-{}", prefix, name.as_str().replace('_', "-")),
        };

        if options.is_class_like(name.as_str()) {
            let tokens = class_tokens(value);
            if !tokens.is_empty() {
                out.push((full_name, Some(tokens.join(" "))));
            }
            continue;
        }

        match value {
            AttrValue::Null | AttrValue::Bool(false) => {}
            AttrValue::Bool(true) if prefix.is_none() => out.push((full_name, None)),
            AttrValue::Map(nested) => flatten(Some(full_name.as_str()), nested, options, out)?,
            AttrValue::List(_) if prefix.is_some() => out.push((full_name, Some(to_json(value)?))),
            AttrValue::List(items) => {
                let mut parts = Vec::with_capacity(items.len());
                for item in items {
                    match item.to_text() {
                        Some(text) => parts.push(text),
                        None if item.is_null() => {}
                        None => parts.push(to_json(item)?),
                    }
                }
                out.push((full_name, Some(parts.join(" "))));
            }
            scalar => out.push((full_name, scalar.to_text())),
        }
    }
    Ok(())
}

fn to_json(value: &AttrValue) -> Result<String> {
    serde_json::to_string(value).map_err(|e| AttrError::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;
    use tagwright::TagError;

    fn flat(attributes: AttributeMap) -> Vec<HtmlAttribute> {
        html_attributes(&attributes, &MergeOptions::default()).unwrap()
    }

    fn pair(name: &str, value: &str) -> HtmlAttribute {
        (name.to_string(), Some(value.to_string()))
    }

    #[test]
    fn scalars_render_as_text() {
        assert_eq!(
            flat(attrs!({"id": "x", "tabindex": 0, "ratio": 1.5})),
            vec![pair("id", "x"), pair("tabindex", "0"), pair("ratio", "1.5")]
        );
    }

    #[test]
    fn booleans_are_bare_or_omitted() {
        assert_eq!(
            flat(attrs!({"hidden": true, "disabled": false, "title": null})),
            vec![("hidden".to_string(), None)]
        );
    }

    #[test]
    fn class_maps_resolve_to_tokens() {
        assert_eq!(
            flat(attrs!({"class": {"a": true, "b": false, "c": true}})),
            vec![pair("class", "a c")]
        );
    }

    #[test]
    fn empty_class_is_omitted() {
        assert!(flat(attrs!({"class": {"a": false}})).is_empty());
        assert!(flat(attrs!({"class": ""})).is_empty());
    }

    #[test]
    fn nested_maps_expand_with_dashes() {
        assert_eq!(
            flat(attrs!({"data": {"controller": "alert", "alert_target": "box", "open": true}})),
            vec![
                pair("data-controller", "alert"),
                pair("data-alert-target", "box"),
                pair("data-open", "true"),
            ]
        );
    }

    #[test]
    fn deeper_maps_keep_expanding() {
        assert_eq!(
            flat(attrs!({"data": {"action": {"click": "go"}}})),
            vec![pair("data-action-click", "go")]
        );
    }

    #[test]
    fn lists_join_at_top_level_and_serialize_when_nested() {
        assert_eq!(
            flat(attrs!({"rel": ["noopener", "noreferrer"], "data": {"ids": [1, 2]}})),
            vec![pair("rel", "noopener noreferrer"), pair("data-ids", "[1,2]")]
        );
    }

    #[test]
    fn render_tag_emits_element() {
        let html = render_tag(
            "article",
            &attrs!({"class": "card", "data": {"id": 3}}),
            Markup::text("hi"),
            &MergeOptions::default(),
        )
        .unwrap();
        assert_eq!(html.as_str(), r#"<article class="card" data-id="3">hi</article>"#);
    }

    #[test]
    fn empty_tag_is_a_configuration_error() {
        let err = render_tag("", &attrs!({}), Markup::new(), &MergeOptions::default()).unwrap_err();
        assert_eq!(err, AttrError::Tag(TagError::InvalidTagName(String::new())));
    }
}
