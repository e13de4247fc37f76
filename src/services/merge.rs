use std::collections::HashSet;
use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use crate::model::document::LOC_STRING_VALUES;
use crate::services::pairs::TranslationMap;

#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    /// Same length and key order as the baseline sequence.
    pub values: Vec<Value>,
    /// Keys whose value was replaced, in baseline order.
    pub replaced_keys: Vec<String>,
    /// Translation keys that never appear in the baseline.
    pub unmatched_translation_keys: usize,
}

impl MergeOutcome {
    pub fn replaced(&self) -> usize {
        self.replaced_keys.len()
    }
}

/// Overwrites baseline values whose key exists in `translation`.
///
/// The baseline slice is never touched; the result is a fresh copy. Pairs with a
/// non-string key can never match and are copied as is. Only keys are logged,
/// never the replacement text.
pub fn merge(translation: &TranslationMap, baseline: &[Value], path: &Path) -> MergeOutcome {
    if baseline.len() % 2 != 0 {
        warn!(
            path = %path.display(),
            len = baseline.len(),
            "odd-length baseline {LOC_STRING_VALUES}, trailing element kept as is"
        );
    }

    let mut values = baseline.to_vec();
    let mut replaced_keys = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for i in (0..baseline.len().saturating_sub(1)).step_by(2) {
        let Some(key) = baseline[i].as_str() else {
            continue;
        };

        if let Some(new_value) = translation.get(key) {
            values[i + 1] = new_value.clone();
            replaced_keys.push(key.to_string());
            seen.insert(key);
            info!(key, "replaced");
        }
    }

    let unmatched_translation_keys = translation
        .keys()
        .filter(|k| !seen.contains(k.as_str()))
        .count();

    MergeOutcome {
        values,
        replaced_keys,
        unmatched_translation_keys,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::pairs::build_translation_map;
    use serde_json::json;

    fn p() -> &'static Path {
        Path::new("en-us.json")
    }

    fn map(pairs: &[(&str, &str)]) -> TranslationMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), json!(v)))
            .collect()
    }

    fn seq(items: &[&str]) -> Vec<Value> {
        items.iter().map(|s| json!(s)).collect()
    }

    #[test]
    fn replaces_only_shared_keys() {
        let t = map(&[("greeting", "你好"), ("farewell", "再见"), ("extra", "多余")]);
        let b = seq(&["greeting", "Hello", "farewell", "Goodbye", "untouched", "Stays"]);

        let out = merge(&t, &b, p());

        assert_eq!(
            out.values,
            seq(&["greeting", "你好", "farewell", "再见", "untouched", "Stays"])
        );
        assert_eq!(out.replaced(), 2);
        assert_eq!(out.replaced_keys, vec!["greeting", "farewell"]);
        assert_eq!(out.unmatched_translation_keys, 1);
    }

    #[test]
    fn empty_translation_is_identity() {
        let b = seq(&["a", "1", "b", "2"]);
        let out = merge(&TranslationMap::new(), &b, p());

        assert_eq!(out.values, b);
        assert_eq!(out.replaced(), 0);
        assert_eq!(out.unmatched_translation_keys, 0);
    }

    #[test]
    fn length_and_keys_are_preserved() {
        let t = map(&[("b", "B"), ("d", "D")]);
        let b = seq(&["a", "1", "b", "2", "c", "3", "d", "4"]);

        let out = merge(&t, &b, p());

        assert_eq!(out.values.len(), b.len());
        for i in (0..b.len()).step_by(2) {
            assert_eq!(out.values[i], b[i]);
            let key = b[i].as_str().unwrap();
            match t.get(key) {
                Some(v) => assert_eq!(&out.values[i + 1], v),
                None => assert_eq!(out.values[i + 1], b[i + 1]),
            }
        }
    }

    #[test]
    fn repeated_baseline_key_is_replaced_each_time() {
        let t = map(&[("k", "new")]);
        let b = seq(&["k", "old1", "k", "old2"]);

        let out = merge(&t, &b, p());

        assert_eq!(out.values, seq(&["k", "new", "k", "new"]));
        assert_eq!(out.replaced(), 2);
    }

    #[test]
    fn odd_baseline_keeps_trailing_element() {
        let t = map(&[("a", "A"), ("tail", "T")]);
        let b = seq(&["a", "1", "tail"]);

        let out = merge(&t, &b, p());

        assert_eq!(out.values, seq(&["a", "A", "tail"]));
        assert_eq!(out.replaced(), 1);
    }

    #[test]
    fn duplicate_translation_keys_feed_last_value() {
        let t = build_translation_map(&seq(&["x", "v1", "x", "v2"]), p());
        let out = merge(&t, &seq(&["x", "orig"]), p());

        assert_eq!(out.values, seq(&["x", "v2"]));
    }

    #[test]
    fn non_string_baseline_keys_pass_through() {
        let t = map(&[("a", "A"), ("7", "seven")]);
        let b = vec![json!("a"), json!("1"), json!(7), json!("2"), json!(null), json!("3")];

        let out = merge(&t, &b, p());

        assert_eq!(
            out.values,
            vec![json!("a"), json!("A"), json!(7), json!("2"), json!(null), json!("3")]
        );
        assert_eq!(out.replaced_keys, vec!["a"]);
        assert_eq!(out.unmatched_translation_keys, 1);
    }
}
