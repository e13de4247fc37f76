use std::path::{Path, PathBuf};

use tracing::warn;

use crate::console::Charset;
use crate::services::encoding::InputEncoding;

pub const ENV_TRANSLATION: &str = "LOCMERGE_TRANSLATION";
pub const ENV_BASELINE: &str = "LOCMERGE_BASELINE";
pub const ENV_OUTPUT: &str = "LOCMERGE_OUTPUT";
pub const ENV_CONSOLE_CHARSET: &str = "LOCMERGE_CONSOLE_CHARSET";
pub const ENV_INPUT_ENCODING: &str = "LOCMERGE_INPUT_ENCODING";

const TABLE_DIR: &str = "zh";
const TRANSLATION_FILE: &str = "LawnStrings-en-cn.json";
const BASELINE_FILE: &str = "LawnStrings-en-us.json";
const OUTPUT_FILE: &str = "LawnStrings-en-us-hans.json";

/// Paths for one merge run.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeConfig {
    /// Table supplying replacement values.
    pub translation_path: PathBuf,
    /// Table whose values get overwritten.
    pub baseline_path: PathBuf,
    pub output_path: PathBuf,
    pub charset: Charset,
    /// Strict UTF-8 unless detection is asked for.
    pub input_encoding: InputEncoding,
}

impl MergeConfig {
    /// Default layout under `base_dir`.
    pub fn from_base_dir(base_dir: &Path) -> Self {
        let tables = base_dir.join(TABLE_DIR);
        MergeConfig {
            translation_path: tables.join(TRANSLATION_FILE),
            baseline_path: tables.join(BASELINE_FILE),
            output_path: tables.join(OUTPUT_FILE),
            charset: Charset::Utf8,
            input_encoding: InputEncoding::Utf8,
        }
    }

    /// Defaults next to the running executable, then `LOCMERGE_*` overrides.
    pub fn from_env() -> Self {
        Self::from_lookup(&program_dir(), |name| std::env::var(name).ok())
    }

    pub fn from_lookup(base_dir: &Path, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::from_base_dir(base_dir);
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(p) = non_empty(ENV_TRANSLATION) {
            cfg.translation_path = PathBuf::from(p);
        }
        if let Some(p) = non_empty(ENV_BASELINE) {
            cfg.baseline_path = PathBuf::from(p);
        }
        if let Some(p) = non_empty(ENV_OUTPUT) {
            cfg.output_path = PathBuf::from(p);
        }

        if let Some(label) = non_empty(ENV_INPUT_ENCODING) {
            match InputEncoding::from_label(&label) {
                Some(mode) => cfg.input_encoding = mode,
                None => warn!(label = %label, "unknown input encoding mode, keeping utf-8"),
            }
        }

        cfg.charset = match non_empty(ENV_CONSOLE_CHARSET) {
            Some(label) => Charset::from_label(&label).unwrap_or_else(|| {
                warn!(label = %label, "unknown console charset, falling back to ascii");
                Charset::Ascii
            }),
            None => charset_from_locale(&lookup),
        };

        cfg
    }
}

fn program_dir() -> PathBuf {
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        return dir;
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn charset_from_locale(lookup: &impl Fn(&str) -> Option<String>) -> Charset {
    let locale = lookup("LC_ALL")
        .filter(|v| !v.is_empty())
        .or_else(|| lookup("LANG"))
        .unwrap_or_default();

    match locale.as_str() {
        "C" | "POSIX" => Charset::Ascii,
        _ => Charset::Utf8,
    }
}
