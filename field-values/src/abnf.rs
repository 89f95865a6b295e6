// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! Various Augmented BNF (ABNF) tools and utilities.
//!
//! # Ranges
//! Ranges are inclusive:
//! ```text
//! DIGIT       =  %x30-39
//! ```
//! is equivalent to:
//! ```text
//! DIGIT       =  "0" / "1" / "2" / "3" / "4" / "5" / "6" /
//!                "7" / "8" / "9"
//! ```
//!
//! # References
//! * [RFC 5234 Augmented BNF for Syntax Specifications: ABNF](https://www.rfc-editor.org/rfc/rfc5234.html)

/// Is the character a visible (printing) character.
///
/// ```text
/// VCHAR          =  %x21-7E
/// ```
#[inline]
pub fn is_visible_character(byte: u8) -> bool {
    matches!(byte, 0x21..=0x7E)
}

/// ```text
/// DIGIT          =  %x30-39
/// ```
#[inline]
pub fn is_digit(byte: u8) -> bool {
    byte.is_ascii_digit()
}

/// ```text
/// ALPHA          =  %x41-5A / %x61-7A
/// ```
#[inline]
pub fn is_alpha(byte: u8) -> bool {
    byte.is_ascii_alphabetic()
}

/// Bytes that are opaque to HTTP but allowed in field values for historical
/// reasons. In UTF-8 input every byte of a non-ASCII scalar value is
/// `obs-text`.
///
/// ```text
/// obs-text       = %x80-FF
/// ```
#[inline]
pub fn is_obs_text(byte: u8) -> bool {
    matches!(byte, 0x80..=0xFF)
}

/// Returns whether the input is a non-empty sequence of `DIGIT`s.
pub fn is_digits(input: &str) -> bool {
    !input.is_empty() && input.bytes().all(is_digit)
}

/// Parses a `1*DIGIT` sequence, failing on anything else, including a sign.
/// `str::parse` alone accepts a leading `+`.
pub fn parse_digits(input: &str) -> Option<u64> {
    if !is_digits(input) {
        return None;
    }

    input.parse().ok()
}
