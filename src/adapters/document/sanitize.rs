//! Text sanitizing for export encodings.
//!
//! The built-in PDF fonts only cover Windows-1252. Characters outside it are
//! transliterated where a close ASCII/1252 spelling exists and dropped
//! otherwise. DOCX and embedded-font PDF keep Unicode and only lose control
//! characters XML (or the PDF text operator) cannot carry.
//!
//! Every loss is counted so it can be reported as a warning.

use crate::ports::{ExportFormat, ExportWarning};

/// Characters of Windows-1252 in the 0x80..=0x9F block.
const WINANSI_EXTRAS: [char; 27] = [
    '€', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', 'Ž', '‘', '’', '“', '”', '•',
    '–', '—', '˜', '™', 'š', '›', 'œ', 'ž', 'Ÿ',
];

/// Target repertoire of a sanitizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    /// Windows-1252 (PDF built-in fonts).
    WinAnsi,
    /// Any Unicode scalar except disallowed control characters.
    Unicode,
}

/// Loss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    pub dropped: usize,
    pub substituted: usize,
}

impl SanitizeReport {
    pub fn is_lossless(&self) -> bool {
        self.dropped == 0 && self.substituted == 0
    }

    /// Converts the counters into a warning, logging it when there was loss.
    pub fn into_warning(self, format: ExportFormat) -> Option<ExportWarning> {
        if self.is_lossless() {
            return None;
        }

        tracing::warn!(
            format = %format,
            dropped = self.dropped,
            substituted = self.substituted,
            "Export lost characters the output encoding cannot represent"
        );

        Some(ExportWarning::EncodingLossy {
            format,
            dropped: self.dropped,
            substituted: self.substituted,
        })
    }
}

/// Cleans strings for one export, accumulating a loss report.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    charset: Charset,
    report: SanitizeReport,
}

impl Sanitizer {
    pub fn new(charset: Charset) -> Self {
        Self {
            charset,
            report: SanitizeReport::default(),
        }
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn report(&self) -> SanitizeReport {
        self.report
    }

    /// Returns `text` restricted to the target repertoire.
    ///
    /// Newlines are kept, tabs become spaces and carriage returns are
    /// removed without counting as loss.
    pub fn clean(&mut self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());

        for c in text.chars() {
            match c {
                '\n' => out.push('\n'),
                '\r' => {}
                '\t' => out.push(' '),
                c if c.is_control() => self.report.dropped += 1,
                c => match self.charset {
                    Charset::Unicode => out.push(c),
                    Charset::WinAnsi if is_winansi(c) => out.push(c),
                    Charset::WinAnsi => match transliterate(c) {
                        Some(replacement) => {
                            self.report.substituted += 1;
                            out.push_str(replacement);
                        }
                        None => self.report.dropped += 1,
                    },
                },
            }
        }

        out
    }
}

/// True if `c` has a Windows-1252 code point.
pub fn is_winansi(c: char) -> bool {
    matches!(c as u32, 0x20..=0x7E | 0xA0..=0xFF) || WINANSI_EXTRAS.contains(&c)
}

fn transliterate(c: char) -> Option<&'static str> {
    let replacement = match c {
        '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2212}' => "-",
        '\u{2015}' => "—",
        '\u{2002}'..='\u{200A}' | '\u{202F}' | '\u{205F}' | '\u{3000}' => " ",
        '\u{2032}' => "'",
        '\u{2033}' => "\"",
        '\u{2190}' => "<-",
        '\u{2192}' => "->",
        '\u{2194}' => "<->",
        '\u{21D2}' => "=>",
        '\u{2264}' => "<=",
        '\u{2265}' => ">=",
        '\u{2260}' => "!=",
        '\u{2248}' => "~",
        '\u{2023}' | '\u{2043}' | '\u{25AA}' | '\u{25CF}' | '\u{25E6}' => "•",
        '\u{2153}' => "1/3",
        '\u{2154}' => "2/3",
        '\u{FB01}' => "fi",
        '\u{FB02}' => "fl",
        _ => return None,
    };
    Some(replacement)
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
