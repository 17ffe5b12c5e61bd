//! # Attribute Merge Engine
//!
//! Combines an ordered list of attribute maps ("tiers", lowest priority
//! first) into one map. The combination rule depends on the key:
//!
//! | Key / values | Rule |
//! |--------------|------|
//! | class-like key (`class` by default) | token lists concatenated in tier order |
//! | nested maps in every tier so far | merged recursively |
//! | anything else | last tier wins |
//!
//! Class values are normalised before concatenation: strings split on
//! whitespace, maps contribute their truthy keys, lists are treated as
//! pre-tokenised. Duplicate tokens are kept. Merging never fails; type
//! mismatches fall back to override.
//!
//! ```rust
//! use viewattrs::{attrs, merge_attributes};
//!
//! let merged = merge_attributes([
//!     Some(&attrs!({"class": "a", "data": {"x": 1}})),
//!     None,
//!     Some(&attrs!({"class": {"b": true, "c": false}, "data": {"y": 2}})),
//! ]);
//!
//! assert_eq!(merged, attrs!({"class": "a b", "data": {"x": 1, "y": 2}}));
//! ```

use crate::attributes::{AttrValue, AttributeMap};
use crate::config::MergeOptions;

/// Merges attribute tiers according to a set of [`MergeOptions`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeEngine {
    options: MergeOptions,
}

impl MergeEngine {
    pub fn new(options: MergeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// Merge `tiers`, lowest priority first. `None` tiers are skipped.
    ///
    /// The result's key set is the union of every tier's keys, in order of
    /// first appearance.
    pub fn merge<'a, I>(&self, tiers: I) -> AttributeMap
    where
        I: IntoIterator<Item = Option<&'a AttributeMap>>,
    {
        let mut merged = AttributeMap::new();
        let mut contributing = 0usize;
        for tier in tiers.into_iter().flatten() {
            contributing += 1;
            self.merge_into(&mut merged, tier);
        }
        tracing::trace!(tiers = contributing, keys = merged.len(), "merged attribute tiers");
        merged
    }

    fn merge_into(&self, target: &mut AttributeMap, tier: &AttributeMap) {
        for (name, incoming) in tier {
            let class_like = self.options.is_class_like(name.as_str());
            match target.get_mut(name.as_str()) {
                Some(existing) => self.combine(class_like, existing, incoming),
                None => {
                    target.insert(name, self.normalize(class_like, incoming));
                }
            }
        }
    }

    fn combine(&self, class_like: bool, existing: &mut AttrValue, incoming: &AttrValue) {
        if class_like {
            let mut tokens = class_tokens(existing);
            tokens.extend(class_tokens(incoming));
            *existing = AttrValue::Str(tokens.join(" "));
            return;
        }

        match (existing, incoming) {
            (AttrValue::Map(existing), AttrValue::Map(incoming)) => {
                self.merge_into(existing, incoming)
            }
            (existing, incoming) => *existing = self.normalize(false, incoming),
        }
    }

    // Values entering the result for the first time still go through the
    // class rule so class-like keys always come out as a single string.
    fn normalize(&self, class_like: bool, value: &AttrValue) -> AttrValue {
        if class_like {
            return AttrValue::Str(class_tokens(value).join(" "));
        }
        match value {
            AttrValue::Map(map) => {
                let mut normalized = AttributeMap::new();
                self.merge_into(&mut normalized, map);
                AttrValue::Map(normalized)
            }
            other => other.clone(),
        }
    }
}

/// Merge tiers with the default options (`class` is the only class-like key).
pub fn merge_attributes<'a, I>(tiers: I) -> AttributeMap
where
    I: IntoIterator<Item = Option<&'a AttributeMap>>,
{
    MergeEngine::default().merge(tiers)
}

/// Tokens contributed by a class value.
pub fn class_tokens(value: &AttrValue) -> Vec<String> {
    let mut tokens = Vec::new();
    push_class_tokens(value, &mut tokens);
    tokens
}

fn push_class_tokens(value: &AttrValue, tokens: &mut Vec<String>) {
    match value {
        AttrValue::Str(s) => tokens.extend(s.split_whitespace().map(str::to_string)),
        AttrValue::Map(map) => tokens.extend(
            map.iter()
                .filter(|(_, enabled)| enabled.is_truthy())
                .map(|(token, _)| token.to_string()),
        ),
        AttrValue::List(items) => {
            for item in items {
                push_class_tokens(item, tokens);
            }
        }
        AttrValue::Int(_) | AttrValue::Float(_) => tokens.extend(value.to_text()),
        AttrValue::Null | AttrValue::Bool(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;

    #[test]
    fn key_set_is_union_of_tiers() {
        let a = attrs!({"id": "x", "class": "a"});
        let b = attrs!({"title": "t"});
        let c = attrs!({"data": {"k": 1}, "id": "y"});
        let merged = merge_attributes([Some(&a), Some(&b), Some(&c)]);

        let keys: Vec<_> = merged.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["id", "class", "title", "data"]);
    }

    #[test]
    fn class_tokens_concatenate_in_tier_order() {
        let merged = merge_attributes([
            Some(&attrs!({"class": "a"})),
            Some(&attrs!({"class": {"b": true, "c": false}})),
            Some(&attrs!({"class": "d"})),
        ]);
        assert_eq!(merged, attrs!({"class": "a b d"}));
    }

    #[test]
    fn class_duplicates_are_preserved() {
        let merged = merge_attributes([
            Some(&attrs!({"class": "a b"})),
            Some(&attrs!({"class": "b"})),
        ]);
        assert_eq!(merged, attrs!({"class": "a b b"}));
    }

    #[test]
    fn class_lists_are_pre_tokenized() {
        let merged = merge_attributes([
            Some(&attrs!({"class": ["a", "b c"]})),
            Some(&attrs!({"class": "d"})),
        ]);
        assert_eq!(merged, attrs!({"class": "a b c d"}));
    }

    #[test]
    fn single_class_map_is_normalized() {
        let merged = merge_attributes([Some(&attrs!({"class": {"on": true, "off": false}}))]);
        assert_eq!(merged, attrs!({"class": "on"}));
    }

    #[test]
    fn class_whitespace_is_collapsed() {
        let merged = merge_attributes([Some(&attrs!({"class": "  a \n b  "}))]);
        assert_eq!(merged, attrs!({"class": "a b"}));
    }

    #[test]
    fn nested_maps_merge_without_losing_siblings() {
        let merged = merge_attributes([
            Some(&attrs!({"data": {"a": 1}})),
            Some(&attrs!({"data": {"b": 2}})),
        ]);
        assert_eq!(merged, attrs!({"data": {"a": 1, "b": 2}}));
    }

    #[test]
    fn nested_conflict_later_tier_wins() {
        let merged = merge_attributes([
            Some(&attrs!({"data": {"a": 1}})),
            Some(&attrs!({"data": {"a": 2}})),
        ]);
        assert_eq!(merged, attrs!({"data": {"a": 2}}));
    }

    #[test]
    fn deeply_nested_maps_merge_recursively() {
        let merged = merge_attributes([
            Some(&attrs!({"data": {"x": {"a": 1}}})),
            Some(&attrs!({"data": {"x": {"b": 2}}})),
        ]);
        assert_eq!(merged, attrs!({"data": {"x": {"a": 1, "b": 2}}}));
    }

    #[test]
    fn class_like_keys_inside_nested_maps_concatenate() {
        let merged = merge_attributes([
            Some(&attrs!({"aria": {"class": "a"}})),
            Some(&attrs!({"aria": {"class": "b"}})),
        ]);
        assert_eq!(merged, attrs!({"aria": {"class": "a b"}}));
    }

    #[test]
    fn scalar_last_tier_wins() {
        let merged = merge_attributes([Some(&attrs!({"id": "x"})), Some(&attrs!({"id": "y"}))]);
        assert_eq!(merged, attrs!({"id": "y"}));
    }

    #[test]
    fn type_mismatch_degrades_to_override() {
        let merged = merge_attributes([
            Some(&attrs!({"data": {"a": 1}, "rel": "x"})),
            Some(&attrs!({"data": "flat", "rel": ["a", "b"]})),
        ]);
        assert_eq!(merged, attrs!({"data": "flat", "rel": ["a", "b"]}));
    }

    #[test]
    fn null_overrides_like_any_scalar() {
        let merged = merge_attributes([Some(&attrs!({"id": "x"})), Some(&attrs!({"id": null}))]);
        assert_eq!(merged, attrs!({"id": null}));
    }

    #[test]
    fn none_tiers_are_skipped() {
        let merged = merge_attributes([None, Some(&attrs!({"id": "x"})), None]);
        assert_eq!(merged, attrs!({"id": "x"}));
        assert!(merge_attributes([None, None]).is_empty());
    }

    #[test]
    fn custom_class_like_keys() {
        let engine = MergeEngine::new(MergeOptions::default().class_like("rel"));
        let merged = engine.merge([
            Some(&attrs!({"rel": "noopener"})),
            Some(&attrs!({"rel": "noreferrer"})),
        ]);
        assert_eq!(merged, attrs!({"rel": "noopener noreferrer"}));
    }

    #[test]
    fn inputs_are_not_modified() {
        let first = attrs!({"data": {"a": 1}});
        let second = attrs!({"data": {"b": 2}});
        let _ = merge_attributes([Some(&first), Some(&second)]);
        assert_eq!(first, attrs!({"data": {"a": 1}}));
    }

    #[test]
    fn class_tokens_of_scalars() {
        assert_eq!(class_tokens(&AttrValue::Int(3)), vec!["3".to_string()]);
        assert!(class_tokens(&AttrValue::Bool(true)).is_empty());
        assert!(class_tokens(&AttrValue::Null).is_empty());
    }
}
