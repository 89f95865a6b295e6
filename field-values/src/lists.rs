// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! This module provides support for the HTTP Lists `#rule` ABNF extension.
//!
//! # Definition for Recipients
//! ```text
//! #element => [ element ] *( OWS "," OWS [ element ] )
//! ```
//!
//! A recipient accepts empty list elements, but whitespace is only allowed
//! next to a comma: ` foo` and `foo ` aren't lists, `foo , ,bar` is.
//!
//! # References
//! * [RFC 9110 Section 5.6.1](https://www.rfc-editor.org/rfc/rfc9110.html#section-5.6.1)

use crate::{
    syntax::{is_whitespace_character, token_length},
    FieldValueError,
};

/// Recognizes a single list element at the start of the input, returning the
/// length in bytes of the longest element found there.
pub type ElementMatcher = fn(&str) -> Option<usize>;

/// A `<n>#<m>element` list grammar.
#[derive(Copy, Clone)]
pub struct ListGrammar {
    element: ElementMatcher,
    min: usize,
    max: Option<usize>,
}

impl ListGrammar {
    /// Creates the grammar for a list of `min` up to `max` elements, where
    /// `None` means unbounded.
    pub const fn new(element: ElementMatcher, min: usize, max: Option<usize>) -> Self {
        Self { element, min, max }
    }

    /// Splits the input into the elements of the list. Empty elements are
    /// valid, but not returned.
    pub fn split<'a>(&self, input: &'a str) -> Result<Vec<&'a str>, FieldValueError> {
        let mut elements = Vec::new();
        let mut rest = input;

        loop {
            if let Some(length) = (self.element)(rest).filter(|length| *length != 0) {
                let element = rest.get(..length).ok_or(FieldValueError::InvalidListSyntax)?;
                elements.push(element);
                rest = &rest[length..];
            }

            if rest.is_empty() {
                break;
            }

            rest = skip_separator(rest).ok_or(FieldValueError::InvalidListSyntax)?;
        }

        if elements.len() < self.min {
            return Err(FieldValueError::TooFewListElements);
        }

        if let Some(max) = self.max {
            if elements.len() > max {
                return Err(FieldValueError::TooManyListElements);
            }
        }

        // A list that can't hold any element is made of commas only.
        if self.max == Some(0) && !input.contains(',') {
            return Err(FieldValueError::InvalidListSyntax);
        }

        Ok(elements)
    }

    /// Returns whether the input is a valid list for this grammar.
    pub fn is_match(&self, input: &str) -> bool {
        self.split(input).is_ok()
    }
}

impl std::fmt::Debug for ListGrammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListGrammar")
            .field("min", &self.min)
            .field("max", &self.max)
            .finish_non_exhaustive()
    }
}

/// Element matcher for lists of `token`s, such as `#field-name`.
pub fn token_element(input: &str) -> Option<usize> {
    match token_length(input) {
        0 => None,
        length => Some(length),
    }
}

/// ```text
/// OWS "," OWS
/// ```
fn skip_separator(input: &str) -> Option<&str> {
    let input = input.trim_start_matches(is_whitespace_character);
    let input = input.strip_prefix(',')?;
    Some(input.trim_start_matches(is_whitespace_character))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn foobar(input: &str) -> Option<usize> {
        input.starts_with("foobar").then_some("foobar".len())
    }

    const FOOBAR_LIST: ListGrammar = ListGrammar::new(foobar, 0, None);

    #[rstest]
    #[case("")]
    #[case("foobar")]
    #[case("foobar, foobar, foobar")]
    #[case(",,foobar,,")]
    #[case(",")]
    #[case(", ,")]
    #[case("foobar ,\tfoobar")]
    #[case("foobar,")]
    #[case("foobar, ")]
    fn test_accepts(#[case] input: &str) {
        assert!(FOOBAR_LIST.is_match(input), "should accept: {input:?}");
    }

    #[rstest]
    #[case(" foobar")]
    #[case("foobar\t ")]
    #[case("foobar ")]
    #[case(" ")]
    #[case("foobar foobar")]
    #[case("foobarfoobar")]
    #[case("foo")]
    #[case("foobar;foobar")]
    fn test_rejects(#[case] input: &str) {
        assert_eq!(FOOBAR_LIST.split(input), Err(FieldValueError::InvalidListSyntax), "should reject: {input:?}");
    }

    #[test]
    fn test_split_skips_empty_elements() {
        assert_eq!(FOOBAR_LIST.split(",,foobar,,"), Ok(vec!["foobar"]));
        assert_eq!(FOOBAR_LIST.split("foobar, foobar"), Ok(vec!["foobar", "foobar"]));
    }

    #[rstest]
    #[case(1, None, "", Err(FieldValueError::TooFewListElements))]
    #[case(1, None, ",,", Err(FieldValueError::TooFewListElements))]
    #[case(1, None, "foobar", Ok(1))]
    #[case(2, Some(3), "foobar", Err(FieldValueError::TooFewListElements))]
    #[case(2, Some(3), "foobar,foobar", Ok(2))]
    #[case(2, Some(3), "foobar,foobar,,foobar", Ok(3))]
    #[case(2, Some(3), "foobar,foobar,foobar,foobar", Err(FieldValueError::TooManyListElements))]
    #[case(0, Some(0), ",", Ok(0))]
    #[case(0, Some(0), ",,,", Ok(0))]
    #[case(0, Some(0), "foobar", Err(FieldValueError::TooManyListElements))]
    #[case(0, Some(0), "", Err(FieldValueError::InvalidListSyntax))]
    #[case(0, Some(0), ", ,", Ok(0))]
    fn test_bounds(#[case] min: usize, #[case] max: Option<usize>, #[case] input: &str,
            #[case] expected: Result<usize, FieldValueError>) {
        let grammar = ListGrammar::new(foobar, min, max);
        assert_eq!(grammar.split(input).map(|elements| elements.len()), expected);
    }

    #[rstest]
    #[case("en-US", &["en-US"])]
    #[case("foo,bar", &["foo", "bar"])]
    #[case("foo , bar,", &["foo", "bar"])]
    #[case("foo , ,bar,charlie", &["foo", "bar", "charlie"])]
    #[case("", &[])]
    #[case(",", &[])]
    #[case(",     ,", &[])]
    #[case(",     ,  ", &[])]
    #[case("gzip, br, deflate", &["gzip", "br", "deflate"])]
    fn test_token_list(#[case] input: &str, #[case] expected: &[&str]) {
        let grammar = ListGrammar::new(token_element, 0, None);
        assert_eq!(grammar.split(input), Ok(expected.to_vec()));
    }
}
