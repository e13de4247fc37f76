use std::borrow::Cow;

use chardetng::EncodingDetector;
use encoding_rs::{EncoderResult, Encoding, UTF_8};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// How input bytes that are not UTF-8 are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputEncoding {
    /// UTF-8 only, a BOM is allowed. Anything else is rejected.
    #[default]
    Utf8,
    /// Falls back to chardetng when the bytes are not UTF-8.
    Detect,
}

impl InputEncoding {
    pub fn from_label(label: &str) -> Option<InputEncoding> {
        match label.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Some(InputEncoding::Utf8),
            "detect" | "auto" => Some(InputEncoding::Detect),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct DecodedText<'a> {
    pub text: Cow<'a, str>,
    /// Lowercased `encoding_rs` name, `utf-8-sig` when a BOM was stripped.
    pub encoding: String,
}

/// Decodes raw document bytes.
///
/// A UTF-8 BOM is stripped. Invalid UTF-8 is an error unless `mode` is
/// [`InputEncoding::Detect`], which hands the bytes to chardetng instead.
pub fn decode(bytes: &[u8], mode: InputEncoding) -> Result<DecodedText<'_>, String> {
    // BOM UTF-8 (EF BB BF)
    if let Some(rest) = bytes.strip_prefix(&UTF8_BOM) {
        return match std::str::from_utf8(rest) {
            Ok(s) => Ok(DecodedText {
                text: Cow::Borrowed(s),
                encoding: "utf-8-sig".into(),
            }),
            Err(e) => Err(format!("invalid utf-8 after BOM: {e}")),
        };
    }

    let utf8_err = match std::str::from_utf8(bytes) {
        Ok(s) => {
            return Ok(DecodedText {
                text: Cow::Borrowed(s),
                encoding: "utf-8".into(),
            })
        }
        Err(e) => e,
    };

    if mode == InputEncoding::Utf8 {
        return Err(format!("invalid utf-8: {utf8_err}"));
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let name = encoding.name().to_lowercase();

    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(format!("content is not valid {name}"));
    }

    Ok(DecodedText {
        text,
        encoding: name,
    })
}

/// Encodes `text` into `encoding`, silently dropping every char it cannot represent.
pub fn encode_lossy(text: &str, encoding: &'static Encoding) -> Vec<u8> {
    let encoding = encoding.output_encoding();
    if encoding == UTF_8 {
        return text.as_bytes().to_vec();
    }

    let mut encoder = encoding.new_encoder();
    let mut out = Vec::with_capacity(text.len());
    let mut buf = [0u8; 256];
    let mut src = text;

    loop {
        let (result, read, written) =
            encoder.encode_from_utf8_without_replacement(src, &mut buf, true);
        out.extend_from_slice(&buf[..written]);
        src = &src[read..];

        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => continue,
            // unmappable char was consumed, skip it
            EncoderResult::Unmappable(_) => continue,
        }
    }

    out
}

/// Keeps only ASCII chars.
pub fn ascii_lossy(text: &str) -> Cow<'_, str> {
    if text.is_ascii() {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(char::is_ascii).collect())
    }
}
