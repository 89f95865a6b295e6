// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! This module contains HTTP syntax semantics, valid across all representations
//! of HTTP: textual HTTP/1.x, binary HTTP/2 and HTTP/3.
//!
//! # References
//! * [RFC 9110](https://www.rfc-editor.org/rfc/rfc9110.html)
//! * [RFC 8187](https://www.rfc-editor.org/rfc/rfc8187.html)

use crate::{
    abnf,
    FieldValueError,
};

/// Validate a field character. Note that in HTTP, UTF-8 is optional (US-ASCII),
/// and isn't used before validating the content.
///
/// ```text
/// field-vchar    = VCHAR / obs-text
/// ```
#[inline]
pub fn is_field_value_character(byte: u8) -> bool {
    abnf::is_visible_character(byte) || abnf::is_obs_text(byte)
}

/// Is the given character a character that can occur (anywhere) in the string?
///
/// ```text
/// tchar          = "!" / "#" / "$" / "%" / "&" / "'" / "*"
///                / "+" / "-" / "." / "^" / "_" / "`" / "|" / "~"
///                / DIGIT / ALPHA
///                ; any VCHAR, except delimiters
/// ```
#[inline]
pub fn is_token_character(byte: u8) -> bool {
    validate_token_character(byte).is_ok()
}

/// Returns whether or not the character is whitespace according to the HTTP
/// specification. This is in effect just `U+0020 SPACE` and `U+0009 CHARACTER
/// TABULATION`.
///
/// This isn't an actual definition, but used in the `OWS` (optional whitespace),
/// `RWS` (required whitespace) and `BWS` (bad whitespace).
///
/// # Definition
/// ```text
/// OWS            = *( SP / HTAB )
///                ; optional whitespace
/// RWS            = 1*( SP / HTAB )
///                ; required whitespace
/// BWS            = OWS
///                ; "bad" whitespace
/// ```
///
/// # References
/// * [RFC 9110 Section 5.6.3](https://www.rfc-editor.org/rfc/rfc9110.html#name-whitespace)
#[inline]
pub fn is_whitespace_character(character: char) -> bool {
    character == ' ' || character == '\t'
}

/// Characters that can occur unescaped inside a `quoted-string`.
///
/// ```text
/// qdtext         = HTAB / SP / %x21 / %x23-5B / %x5D-7E / obs-text
/// ```
#[inline]
pub fn is_qdtext(byte: u8) -> bool {
    matches!(byte, b'\t' | b' ' | 0x21 | 0x23..=0x5B | 0x5D..=0x7E) || abnf::is_obs_text(byte)
}

/// Characters that can follow the backslash of a `quoted-pair`.
///
/// ```text
/// quoted-pair    = "\" ( HTAB / SP / VCHAR / obs-text )
/// ```
#[inline]
pub fn is_quoted_pair_character(byte: u8) -> bool {
    byte == b'\t' || byte == b' ' || is_field_value_character(byte)
}

/// ```text
/// etagc          = %x21 / %x23-7E / obs-text
///                ; VCHAR except double quotes, plus obs-text
/// ```
#[inline]
pub fn is_etag_character(byte: u8) -> bool {
    matches!(byte, 0x21 | 0x23..=0x7E) || abnf::is_obs_text(byte)
}

/// ```text
/// attr-char     = ALPHA / DIGIT
///               / "!" / "#" / "$" / "&" / "+" / "-" / "."
///               / "^" / "_" / "`" / "|" / "~"
///               ; token except ( "*" / "'" / "%" )
/// ```
///
/// # References
/// * [RFC 8187 Section 3.2.1](https://www.rfc-editor.org/rfc/rfc8187.html#section-3.2.1)
#[inline]
pub fn is_attr_character(byte: u8) -> bool {
    is_token_character(byte) && !matches!(byte, b'*' | b'\'' | b'%')
}

/// Returns the length of the longest `token` at the start of the input.
pub fn token_length(input: &str) -> usize {
    input.bytes()
        .take_while(|byte| is_token_character(*byte))
        .count()
}

#[inline]
pub fn is_token(value: &str) -> bool {
    validate_token(value).is_ok()
}

pub fn validate_token(value: &str) -> Result<(), FieldValueError> {
    if value.is_empty() {
        return Err(FieldValueError::TokenEmpty);
    }

    for character in value.bytes() {
        validate_token_character(character)?;
    }

    Ok(())
}

/// Validate a token character.
///
/// ```text
/// tchar          = "!" / "#" / "$" / "%" / "&" / "'" / "*"
///                / "+" / "-" / "." / "^" / "_" / "`" / "|" / "~"
///                / DIGIT / ALPHA
///                ; any VCHAR, except delimiters
/// ```
fn validate_token_character(character: u8) -> Result<(), FieldValueError> {
    match character {
        b' ' | b'\t' => Err(FieldValueError::TokenContainsWhitespace),

        b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' |
        b'^' | b'_' | b'`' | b'|' | b'~' => Ok(()),

        b'0'..=b'9' => Ok(()),
        b'A'..=b'Z' => Ok(()),
        b'a'..=b'z' => Ok(()),

        b'"' | b'(' | b')' | b',' | b'/' | b':' | b';' | b'<' | b'=' | b'>' |
        b'?' | b'@' | b'[' | b'\\' | b']' | b'{' | b'}' => Err(FieldValueError::TokenContainsDelimiter),

        _ => Err(FieldValueError::TokenContainsNonVisibleAscii),
    }
}
