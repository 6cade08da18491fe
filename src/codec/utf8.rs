//! UTF-8 expansion and collapse for the Base64 text codec
//!
//! Base64 works on bytes, so text passes through a byte-oriented
//! intermediate form: code points expand to one to four bytes on the way in
//! and collapse back on the way out. The collapse keeps the permissive shape
//! of the decoder it replaces (continuation-byte high bits are not checked,
//! overlong forms pass), but running out of bytes mid-sequence is reported
//! as an error rather than read past the end of the stream.

use crate::error::{Error, Result};

/// Expand a string into its UTF-8 byte stream.
pub(crate) fn expand(input: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(input.len());
    for ch in input.chars() {
        let r = ch as u32;
        if r < 0x80 {
            bytes.push(r as u8);
        } else if r < 0x800 {
            bytes.push(0xC0 | (r >> 6) as u8);
            bytes.push(0x80 | (r & 0x3F) as u8);
        } else if r < 0x10000 {
            bytes.push(0xE0 | (r >> 12) as u8);
            bytes.push(0x80 | ((r >> 6) & 0x3F) as u8);
            bytes.push(0x80 | (r & 0x3F) as u8);
        } else {
            bytes.push(0xF0 | (r >> 18) as u8);
            bytes.push(0x80 | ((r >> 12) & 0x3F) as u8);
            bytes.push(0x80 | ((r >> 6) & 0x3F) as u8);
            bytes.push(0x80 | (r & 0x3F) as u8);
        }
    }
    bytes
}

/// Collapse a UTF-8 byte stream back into a string.
pub(crate) fn collapse(bytes: &[u8]) -> Result<String> {
    let mut out = String::with_capacity(bytes.len());
    let mut pos = 0;
    while pos < bytes.len() {
        let lead = bytes[pos];
        let (value, width) = if lead < 0x80 {
            (u32::from(lead), 1)
        } else if (0xC0..0xE0).contains(&lead) {
            let c2 = continuation(bytes, pos + 1)?;
            ((u32::from(lead & 0x1F) << 6) | u32::from(c2 & 0x3F), 2)
        } else if lead >= 0xF0 {
            let c2 = continuation(bytes, pos + 1)?;
            let c3 = continuation(bytes, pos + 2)?;
            let c4 = continuation(bytes, pos + 3)?;
            (
                (u32::from(lead & 0x07) << 18)
                    | (u32::from(c2 & 0x3F) << 12)
                    | (u32::from(c3 & 0x3F) << 6)
                    | u32::from(c4 & 0x3F),
                4,
            )
        } else {
            // 0xE0..=0xEF leads, plus any stray continuation byte
            let c2 = continuation(bytes, pos + 1)?;
            let c3 = continuation(bytes, pos + 2)?;
            (
                (u32::from(lead & 0x0F) << 12)
                    | (u32::from(c2 & 0x3F) << 6)
                    | u32::from(c3 & 0x3F),
                3,
            )
        };
        let ch = char::from_u32(value).ok_or_else(|| {
            Error::DecodeError(format!(
                "byte stream collapses to invalid code point {:#X}",
                value
            ))
        })?;
        out.push(ch);
        pos += width;
    }
    Ok(out)
}

fn continuation(bytes: &[u8], pos: usize) -> Result<u8> {
    bytes.get(pos).copied().ok_or_else(|| {
        Error::DecodeError("byte stream ends inside a multi-byte sequence".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_matches_utf8_bytes() {
        for input in ["", "plain ascii", "é", "中文", "🚀"] {
            assert_eq!(expand(input), input.as_bytes());
        }
    }

    #[test]
    fn test_collapse_single_and_multi_byte() {
        assert_eq!(collapse(b"abc").unwrap(), "abc");
        assert_eq!(collapse(&[0xC3, 0xA9]).unwrap(), "é");
        assert_eq!(collapse(&[0xE4, 0xB8, 0xAD]).unwrap(), "中");
        assert_eq!(collapse(&[0xF0, 0x9F, 0x9A, 0x80]).unwrap(), "🚀");
    }

    #[test]
    fn test_collapse_truncated_sequences() {
        assert!(collapse(&[0xC3]).is_err());
        assert!(collapse(&[0xE4, 0xB8]).is_err());
        assert!(collapse(&[0xF0, 0x9F, 0x9A]).is_err());
    }

    #[test]
    fn test_collapse_stray_continuation_bytes() {
        // a stray continuation byte takes the three-byte branch, exactly
        // as the decoder this replaces did
        assert_eq!(collapse(&[0x80, 0x80, 0x80]).unwrap(), "\u{0}");
    }
}
