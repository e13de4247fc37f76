use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use tracing::warn;

use crate::model::document::LOC_STRING_VALUES;

/// Key -> replacement value, built from one translation source.
pub type TranslationMap = HashMap<String, Value>;

/// Builds the translation map from `[k0, v0, k1, v1, ...]`.
///
/// A repeated key keeps its last value. A trailing unpaired element is ignored,
/// and so is a pair whose key is not a string.
pub fn build_translation_map(values: &[Value], path: &Path) -> TranslationMap {
    if values.len() % 2 != 0 {
        warn!(
            path = %path.display(),
            len = values.len(),
            "odd-length {LOC_STRING_VALUES}, ignoring trailing element"
        );
    }

    let mut map = TranslationMap::with_capacity(values.len() / 2);

    for i in (0..values.len().saturating_sub(1)).step_by(2) {
        match values[i].as_str() {
            Some(key) => {
                map.insert(key.to_string(), values[i + 1].clone());
            }
            None => warn!(
                path = %path.display(),
                index = i,
                "non-string key in {LOC_STRING_VALUES}, pair skipped"
            ),
        }
    }

    map
}
