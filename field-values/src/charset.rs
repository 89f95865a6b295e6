// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! Character sets and language tags of extended parameters.
//!
//! # References
//! * [RFC 8187 Section 3.2.1](https://www.rfc-editor.org/rfc/rfc8187.html#section-3.2.1)

use std::{fmt, str::FromStr};

use phf::phf_map;
use unicase::UniCase;

use crate::{abnf, FieldValueError};

/// The character sets a recipient of an `ext-value` must support, plus
/// US-ASCII which is the common subset of both.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Charset {
    Utf8,
    Iso8859_1,
    UsAscii,
}

static CHARSET_NAMES: phf::Map<UniCase<&'static str>, Charset> = phf_map!(
    UniCase::ascii("utf-8") => Charset::Utf8,
    UniCase::ascii("utf8") => Charset::Utf8,

    UniCase::ascii("iso-8859-1") => Charset::Iso8859_1,
    UniCase::ascii("iso8859-1") => Charset::Iso8859_1,
    UniCase::ascii("iso_8859-1") => Charset::Iso8859_1,
    UniCase::ascii("latin1") => Charset::Iso8859_1,
    UniCase::ascii("l1") => Charset::Iso8859_1,

    UniCase::ascii("us-ascii") => Charset::UsAscii,
    UniCase::ascii("ascii") => Charset::UsAscii,
    UniCase::ascii("ansi_x3.4-1968") => Charset::UsAscii,
);

impl Charset {
    pub fn from_name(name: &str) -> Result<Self, FieldValueError> {
        CHARSET_NAMES.get(&UniCase::ascii(name))
            .copied()
            .ok_or(FieldValueError::UnsupportedCharset)
    }

    /// The preferred MIME name, as it is serialized.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Iso8859_1 => "ISO-8859-1",
            Self::UsAscii => "US-ASCII",
        }
    }

    /// Returns `None` when the text contains a character that this charset
    /// can't represent.
    pub fn encode(&self, text: &str) -> Option<Vec<u8>> {
        match self {
            Self::Utf8 => Some(text.as_bytes().to_vec()),
            Self::Iso8859_1 => text.chars()
                .map(|character| u8::try_from(character).ok())
                .collect(),
            Self::UsAscii => text.is_ascii().then(|| text.as_bytes().to_vec()),
        }
    }

    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => String::from_utf8(bytes.to_vec()).ok(),
            Self::Iso8859_1 => Some(bytes.iter().copied().map(char::from).collect()),
            Self::UsAscii => bytes.is_ascii().then(|| bytes.iter().copied().map(char::from).collect()),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Charset {
    type Err = FieldValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Validates the basic shape of a language tag. Extension and private-use
/// subtags share the generic subtag grammar.
///
/// ```text
/// language = 1*8ALPHA *( "-" 1*8alphanum )
/// ```
pub fn validate_language(tag: &str) -> Result<(), FieldValueError> {
    let mut subtags = tag.split('-');

    let primary = subtags.next().unwrap_or_default();
    if !is_subtag(primary, abnf::is_alpha) {
        return Err(FieldValueError::UnsupportedLanguage);
    }

    if !subtags.all(|subtag| is_subtag(subtag, |byte| byte.is_ascii_alphanumeric())) {
        return Err(FieldValueError::UnsupportedLanguage);
    }

    Ok(())
}

fn is_subtag(subtag: &str, predicate: fn(u8) -> bool) -> bool {
    (1..=8).contains(&subtag.len()) && subtag.bytes().all(predicate)
}
