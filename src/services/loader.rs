use std::fs;
use std::io;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{MergeError, Result};
use crate::services::encoding::{self, InputEncoding};

/// Reads and parses one string table document. All or nothing.
pub fn load_document(path: &Path, input_encoding: InputEncoding) -> Result<Value> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => MergeError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => MergeError::Read {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let decoded = encoding::decode(&bytes, input_encoding).map_err(|message| MergeError::ParseError {
        path: path.to_path_buf(),
        message,
    })?;

    match decoded.encoding.as_str() {
        "utf-8" => {}
        "utf-8-sig" => debug!(path = %path.display(), "stripped utf-8 BOM"),
        other => warn!(path = %path.display(), encoding = other, "input is not utf-8, decoded with detected encoding"),
    }

    let doc: Value = serde_json::from_str(&decoded.text).map_err(|e| MergeError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    debug!(path = %path.display(), bytes = bytes.len(), "document loaded");
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = load_document(&path, InputEncoding::Utf8).unwrap_err();
        assert!(matches!(err, MergeError::FileNotFound { path: p } if p == path));
    }

    #[test]
    fn malformed_json_keeps_decoder_message() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{\"objects\": [").unwrap();

        let expected = serde_json::from_str::<Value>("{\"objects\": [")
            .unwrap_err()
            .to_string();

        match load_document(&path, InputEncoding::Utf8).unwrap_err() {
            MergeError::ParseError { message, .. } => assert_eq!(message, expected),
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn stray_byte_in_utf8_table_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("zh.json");
        let mut bytes =
            "{\"objects\":[{\"objdata\":{\"LocStringValues\":[\"greeting\",\"你好\"]}}]}"
                .as_bytes()
                .to_vec();
        let at = bytes.len() - 6;
        bytes.insert(at, 0xFF);
        fs::write(&path, &bytes).unwrap();

        match load_document(&path, InputEncoding::Utf8).unwrap_err() {
            MergeError::ParseError { message, .. } => {
                assert!(message.starts_with("invalid utf-8: "), "{message}")
            }
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn legacy_bytes_load_only_when_detection_is_enabled() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fr.json");
        let source = "[\"Élément déjà créé, à côté du château où l'été est très agréable\"]";
        let (bytes, _, _) = encoding_rs::WINDOWS_1252.encode(source);
        fs::write(&path, &bytes).unwrap();

        assert!(matches!(
            load_document(&path, InputEncoding::Utf8),
            Err(MergeError::ParseError { .. })
        ));
        assert_eq!(
            load_document(&path, InputEncoding::Detect).unwrap(),
            serde_json::from_str::<Value>(source).unwrap()
        );
    }

    #[test]
    fn loads_bom_prefixed_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bom.json");
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("{\"objects\":[{\"objdata\":{\"LocStringValues\":[\"k\",\"值\"]}}]}".as_bytes());
        fs::write(&path, bytes).unwrap();

        let doc = load_document(&path, InputEncoding::Utf8).unwrap();
        assert_eq!(
            doc,
            json!({"objects": [{"objdata": {"LocStringValues": ["k", "值"]}}]})
        );
    }
}
