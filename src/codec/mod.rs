//! Base64 text codec
//!
//! This module converts between Unicode text and its Base64 representation,
//! going through an intermediate UTF-8 byte stream in both directions. It is
//! what builds the `Basic` authorization credential attached to API requests,
//! and it reproduces the behavior of the encoder shipped in the original
//! browser client: the decoder strips anything outside the Base64 alphabet
//! before grouping and drops a trailing incomplete group instead of
//! rejecting it.
//!
//! Both operations are pure, stateless, single-pass transformations sharing
//! only the fixed symbol table, so they are safe to call from any number of
//! tasks concurrently.

mod utf8;

use crate::error::Result;

/// The 64 Base64 symbols followed by the `=` padding sentinel at index 64.
const ALPHABET: &[u8; 65] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/=";

/// Index of the `=` padding sentinel in [`ALPHABET`].
const PAD: u8 = 64;

/// Encode a Unicode string as Base64 text.
///
/// The input is expanded to a UTF-8 byte stream, then every group of three
/// bytes becomes four Base64 symbols; a final partial group is padded with
/// one or two `=`. The function is total: any string encodes.
pub fn encode(input: &str) -> String {
    let bytes = utf8::expand(input);
    let mut out = String::with_capacity((bytes.len() + 2) / 3 * 4);
    for group in bytes.chunks(3) {
        let n = group[0];
        let r = group.get(1).copied();
        let i = group.get(2).copied();

        let mut symbols = [n >> 2, ((n & 3) << 4) | (r.unwrap_or(0) >> 4), PAD, PAD];
        if let Some(r) = r {
            symbols[2] = ((r & 15) << 2) | (i.unwrap_or(0) >> 6);
        }
        if let Some(i) = i {
            symbols[3] = i & 63;
        }
        for symbol in symbols {
            out.push(ALPHABET[symbol as usize] as char);
        }
    }
    out
}

/// Decode Base64 text back into a Unicode string.
///
/// Characters outside `[A-Za-z0-9+/=]` are stripped before grouping, so
/// Base64 text with embedded whitespace or newlines decodes fine. A trailing
/// group of fewer than four symbols is dropped rather than rejected, and
/// otherwise malformed input decodes to garbled output instead of failing.
///
/// # Errors
///
/// Returns [`Error::DecodeError`](crate::Error::DecodeError) when the
/// decoded byte stream ends in the middle of a multi-byte UTF-8 sequence or
/// collapses to a value that is not a valid Unicode scalar.
pub fn decode(input: &str) -> Result<String> {
    let symbols: Vec<u8> = input
        .bytes()
        .filter(|b| is_symbol(*b))
        .map(symbol_index)
        .collect();

    let mut bytes = Vec::with_capacity(symbols.len() / 4 * 3);
    for group in symbols.chunks_exact(4) {
        let (s, o, u, a) = (group[0], group[1], group[2], group[3]);
        bytes.push(((u16::from(s) << 2) | u16::from(o >> 4)) as u8);
        if u != PAD {
            bytes.push(((o & 15) << 4) | (u >> 2));
        }
        if a != PAD {
            bytes.push(((u & 3) << 6) | a);
        }
    }
    utf8::collapse(&bytes)
}

/// Collapse every literal `rn` two-character sequence to `n`.
///
/// The browser client this SDK replaces ran this substitution before every
/// encode, apparently a line-ending normalization that matched the letters
/// `r` and `n` instead of `\r\n`. [`encode`] no longer applies it; callers
/// that need byte-compatible output for credentials minted through the old
/// client can run it over their input first.
pub fn collapse_legacy_line_endings(input: &str) -> String {
    input.replace("rn", "n")
}

fn is_symbol(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'+' | b'/' | b'=')
}

fn symbol_index(symbol: u8) -> u8 {
    match symbol {
        b'A'..=b'Z' => symbol - b'A',
        b'a'..=b'z' => symbol - b'a' + 26,
        b'0'..=b'9' => symbol - b'0' + 52,
        b'+' => 62,
        b'/' => 63,
        // '=' is the only symbol left after stripping
        _ => PAD,
    }
}
