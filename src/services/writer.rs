use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;
use tracing::debug;

use crate::error::{MergeError, Result};

const INDENT: &[u8] = b"    ";

/// Pretty JSON with 4-space indent. Non-ASCII is kept literal, key order as stored.
pub fn to_pretty_bytes(doc: &Value) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
    doc.serialize(&mut ser)?;
    Ok(out)
}

/// Serializes `doc` and replaces `path` with it.
///
/// The bytes go to a sibling `.tmp` file first, which is renamed over `path`
/// only once fully written and synced.
pub fn write_document(path: &Path, doc: &Value) -> Result<()> {
    let to_write_error = |source: io::Error| MergeError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    let bytes = to_pretty_bytes(doc).map_err(to_write_error)?;
    write_atomic(path, &bytes).map_err(to_write_error)?;

    debug!(path = %path.display(), bytes = bytes.len(), "document written");
    Ok(())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp = tmp_path(path);

    if let Some(parent) = tmp.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let written = (|| -> io::Result<()> {
        let mut file = File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()
    })();

    if let Err(e) = written.and_then(|_| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }

    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut p = path.to_path_buf();
    let file_name = match path.file_name().and_then(|s| s.to_str()) {
        Some(n) => n.to_string(),
        None => "output".to_string(),
    };
    p.set_file_name(format!("{file_name}.tmp"));
    p
}
