use std::io::{self, Write};

use encoding_rs::Encoding;

use crate::services::encoding;

/// Where user-facing status lines go.
pub trait StatusSink {
    fn line(&mut self, text: &str);
}

/// What the terminal can render. Anything it cannot is dropped, never an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Charset {
    Utf8,
    Ascii,
    Legacy(&'static Encoding),
}

impl Charset {
    /// `utf-8`, `ascii`, or any WHATWG encoding label (`gbk`, `windows-1252`, ...).
    pub fn from_label(label: &str) -> Option<Charset> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("ascii") || label.eq_ignore_ascii_case("us-ascii") {
            return Some(Charset::Ascii);
        }

        let encoding = Encoding::for_label(label.as_bytes())?.output_encoding();
        if encoding == encoding_rs::UTF_8 {
            Some(Charset::Utf8)
        } else {
            Some(Charset::Legacy(encoding))
        }
    }

    pub fn render(&self, text: &str) -> Vec<u8> {
        match self {
            Charset::Utf8 => text.as_bytes().to_vec(),
            Charset::Ascii => encoding::ascii_lossy(text).into_owned().into_bytes(),
            Charset::Legacy(enc) => encoding::encode_lossy(text, *enc),
        }
    }
}

pub struct Console<W: Write> {
    out: W,
    charset: Charset,
}

impl Console<io::Stdout> {
    pub fn stdout(charset: Charset) -> Self {
        Console::new(io::stdout(), charset)
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W, charset: Charset) -> Self {
        Console { out, charset }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> StatusSink for Console<W> {
    fn line(&mut self, text: &str) {
        let mut bytes = self.charset.render(text);
        bytes.push(b'\n');

        // a broken status channel must not abort the merge
        if self.out.write_all(&bytes).is_err() {
            return;
        }
        let _ = self.out.flush();
    }
}

/// Keeps every line in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub lines: Vec<String>,
}

impl StatusSink for MemorySink {
    fn line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}
