// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! Values that are sent either as a `token`, or as a `quoted-string` when
//! they contain characters a token can't.
//!
//! ```text
//! quoted-string  = DQUOTE *( qdtext / quoted-pair ) DQUOTE
//! qdtext         = HTAB / SP / %x21 / %x23-5B / %x5D-7E / obs-text
//! quoted-pair    = "\" ( HTAB / SP / VCHAR / obs-text )
//! ```
//!
//! # References
//! * [RFC 9110 Section 5.6.4](https://www.rfc-editor.org/rfc/rfc9110.html#name-quoted-strings)

use std::borrow::Cow;

use crate::{
    syntax::{
        is_field_value_character,
        is_qdtext,
        is_quoted_pair_character,
        is_token,
    },
    FieldValueError,
};

/// Encodes the value as a `token` if possible, or as a `quoted-string`
/// otherwise. Only `"` and `\` are escaped.
pub fn encode(value: &str) -> Result<Cow<'_, str>, FieldValueError> {
    if is_token(value) {
        return Ok(Cow::Borrowed(value));
    }

    quote(value).map(Cow::Owned)
}

/// Encodes the value as a `quoted-string`, even if it is a valid token.
pub fn quote(value: &str) -> Result<String, FieldValueError> {
    let mut result = String::with_capacity(value.len() + 2);
    result.push('"');

    for character in value.chars() {
        if matches!(character, '"' | '\\') {
            result.push('\\');
        } else if character.is_ascii() && !is_qdtext(character as u8) {
            return Err(FieldValueError::InvalidQuotedString);
        }

        result.push(character);
    }

    result.push('"');
    Ok(result)
}

/// Decodes a `token` or a `quoted-string`. Tokens are returned as-is.
pub fn decode(text: &str) -> Result<Cow<'_, str>, FieldValueError> {
    if text.starts_with('"') {
        return match parse_quoted_string(text) {
            Some((value, length)) if length == text.len() => Ok(Cow::Owned(value)),
            _ => Err(FieldValueError::InvalidQuotedString),
        };
    }

    if text.bytes().all(is_field_value_character) {
        Ok(Cow::Borrowed(text))
    } else {
        Err(FieldValueError::InvalidQuotedString)
    }
}

/// Returns the length of the `quoted-string` at the start of the input.
pub fn quoted_string_length(input: &str) -> Option<usize> {
    parse_quoted_string(input).map(|(_, length)| length)
}

/// Parses the `quoted-string` at the start of the input, returning the
/// unescaped value and the number of bytes consumed.
fn parse_quoted_string(input: &str) -> Option<(String, usize)> {
    let mut characters = input.char_indices();
    if characters.next()?.1 != '"' {
        return None;
    }

    let mut value = String::new();
    while let Some((index, character)) = characters.next() {
        match character {
            '"' => return Some((value, index + 1)),
            '\\' => {
                let (_, escaped) = characters.next()?;
                if escaped.is_ascii() && !is_quoted_pair_character(escaped as u8) {
                    return None;
                }
                value.push(escaped);
            }
            _ => {
                if character.is_ascii() && !is_qdtext(character as u8) {
                    return None;
                }
                value.push(character);
            }
        }
    }

    None
}
