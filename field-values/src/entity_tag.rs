// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! Entity tags, the opaque validators of the `ETag`, `If-Match`,
//! `If-None-Match` and `If-Range` fields.
//!
//! # Definition
//! ```text
//! entity-tag = [ weak ] opaque-tag
//! weak       = %s"W/"
//! opaque-tag = DQUOTE *etagc DQUOTE
//! etagc      = %x21 / %x23-7E / obs-text
//! ```
//!
//! # References
//! * [RFC 9110 Section 8.8.3](https://www.rfc-editor.org/rfc/rfc9110.html#name-etag)

use std::{fmt, str::FromStr};

use indexmap::IndexMap;

use crate::{
    lists::ListGrammar,
    syntax::is_etag_character,
    FieldValueError,
};

const WEAK_PREFIX: &str = "W/";

static ENTITY_TAG_LIST: ListGrammar = ListGrammar::new(entity_tag_length, 1, None);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntityTag {
    value: String,
    weak: bool,
}

impl EntityTag {
    /// Creates an entity tag from its opaque value, without the quotes.
    pub fn new(value: impl Into<String>, weak: bool) -> Result<Self, FieldValueError> {
        let value = value.into();
        if !value.bytes().all(is_etag_character) {
            return Err(FieldValueError::InvalidEntityTag);
        }

        Ok(Self { value, weak })
    }

    /// Shorthand for a strong [`EntityTag::new`].
    pub fn strong(value: impl Into<String>) -> Result<Self, FieldValueError> {
        Self::new(value, false)
    }

    /// Shorthand for a weak [`EntityTag::new`].
    pub fn weak(value: impl Into<String>) -> Result<Self, FieldValueError> {
        Self::new(value, true)
    }

    /// Parses an `entity-tag`, e.g. `"xyzzy"` or `W/"xyzzy"`.
    ///
    /// ```text
    /// entity-tag = [ weak ] opaque-tag
    /// weak       = %s"W/"
    /// opaque-tag = DQUOTE *etagc DQUOTE
    /// ```
    pub fn parse(input: &str) -> Result<Self, FieldValueError> {
        let (weak, opaque_tag) = match input.strip_prefix(WEAK_PREFIX) {
            Some(rest) => (true, rest),
            None => (false, input),
        };

        let value = opaque_tag.strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .ok_or(FieldValueError::InvalidEntityTag)?;

        Self::new(value, weak)
    }

    /// The opaque value, without the quotes.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_weak(&self) -> bool {
        self.weak
    }

    pub fn set_weak(&mut self, weak: bool) {
        self.weak = weak;
    }

    /// Two entity tags are equivalent if both are not weak and their opaque
    /// tags match character-by-character.
    ///
    /// # References
    /// * [RFC 9110 Section 8.8.3.2](https://www.rfc-editor.org/rfc/rfc9110.html#name-comparison)
    pub fn compare_strongly(&self, other: &EntityTag) -> bool {
        !self.weak && !other.weak && self.value == other.value
    }

    /// Two entity tags are equivalent if their opaque tags match
    /// character-by-character, regardless of either or both being tagged as
    /// weak.
    pub fn compare_weakly(&self, other: &EntityTag) -> bool {
        self.value == other.value
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.weak {
            f.write_str(WEAK_PREFIX)?;
        }
        write!(f, "\"{}\"", self.value)
    }
}

impl FromStr for EntityTag {
    type Err = FieldValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Returns the length of the `entity-tag` at the start of the input.
pub fn entity_tag_length(input: &str) -> Option<usize> {
    let prefix_length = if input.starts_with(WEAK_PREFIX) { WEAK_PREFIX.len() } else { 0 };
    let opaque_tag = input[prefix_length..].strip_prefix('"')?;

    let value_length = opaque_tag.bytes()
        .take_while(|byte| is_etag_character(*byte))
        .count();

    if opaque_tag.as_bytes().get(value_length) != Some(&b'"') {
        return None;
    }

    Some(prefix_length + 1 + value_length + 1)
}

/// The entity tags of an `If-Match` or `If-None-Match` field. The empty set
/// is the wildcard (`*`), which matches any entity tag, and the absence of
/// one.
///
/// ```text
/// If-Match = "*" / #entity-tag
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityTagSet {
    tags: IndexMap<String, EntityTag>,
}

impl EntityTagSet {
    /// Creates the wildcard set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tags(tags: impl IntoIterator<Item = EntityTag>) -> Self {
        let mut set = Self::new();
        for tag in tags {
            set.add(tag);
        }
        set
    }

    /// Parses `"*"` as the wildcard, and anything else as `1#entity-tag`.
    pub fn parse(input: &str) -> Result<Self, FieldValueError> {
        if input == "*" {
            return Ok(Self::new());
        }

        let result = ENTITY_TAG_LIST.split(input)
            .and_then(|elements| {
                elements.into_iter()
                    .map(EntityTag::parse)
                    .collect::<Result<Vec<_>, _>>()
            })
            .map(Self::from_tags);

        if let Err(error) = &result {
            tracing::trace!(input, ?error, "rejected entity-tag list");
        }

        result
    }

    /// Adds the entity tag, replacing the weakness of a tag with the same
    /// value if one is already present.
    pub fn add(&mut self, tag: EntityTag) {
        self.tags.insert(tag.value.clone(), tag);
    }

    /// Removes the entity tag with the given opaque value.
    pub fn remove(&mut self, value: &str) -> bool {
        self.tags.shift_remove(value).is_some()
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn contains(&self, value: &str) -> bool {
        self.tags.contains_key(value)
    }

    pub fn get(&self, value: &str) -> Option<&EntityTag> {
        self.tags.get(value)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_wildcard(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityTag> {
        self.tags.values()
    }

    /// The wildcard matches anything, a concrete set never matches an absent
    /// entity tag.
    pub fn compare_strongly(&self, candidate: Option<&EntityTag>) -> bool {
        self.compare(candidate, EntityTag::compare_strongly)
    }

    pub fn compare_weakly(&self, candidate: Option<&EntityTag>) -> bool {
        self.compare(candidate, EntityTag::compare_weakly)
    }

    fn compare(&self, candidate: Option<&EntityTag>, comparison: fn(&EntityTag, &EntityTag) -> bool) -> bool {
        if self.is_wildcard() {
            return true;
        }

        let Some(candidate) = candidate else {
            return false;
        };

        self.iter().any(|tag| comparison(tag, candidate))
    }
}

impl fmt::Display for EntityTagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_wildcard() {
            return f.write_str("*");
        }

        for (index, tag) in self.iter().enumerate() {
            if index != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{tag}")?;
        }

        Ok(())
    }
}

impl FromStr for EntityTagSet {
    type Err = FieldValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_weak() {
        let tag = EntityTag::parse("W/\"bar\"").unwrap();
        assert!(tag.is_weak());
        assert_eq!(tag.value(), "bar");
        assert_eq!(tag.to_string(), "W/\"bar\"");
    }

    #[rstest]
    #[case("\"xyzzy\"", "xyzzy", false)]
    #[case("\"\"", "", false)]
    #[case("W/\"\"", "", true)]
    #[case("\"W/\"", "W/", false)]
    #[case("\"caf\u{e9}\"", "caf\u{e9}", false)]
    fn test_parse(#[case] input: &str, #[case] value: &str, #[case] weak: bool) {
        assert_eq!(EntityTag::parse(input), Ok(EntityTag { value: value.into(), weak }));
    }

    #[rstest]
    #[case("xyzzy")]
    #[case("\"xyzzy")]
    #[case("w/\"xyzzy\"")]
    #[case(" \"xyzzy\"")]
    #[case("\"xy zzy\"")]
    #[case("\"xy\"zzy\"")]
    #[case("W/xyzzy")]
    fn test_parse_invalid(#[case] input: &str) {
        assert_eq!(EntityTag::parse(input), Err(FieldValueError::InvalidEntityTag));
    }

    #[test]
    fn test_new_rejects_quotes() {
        assert_eq!(EntityTag::strong("a\"b"), Err(FieldValueError::InvalidEntityTag));
    }

    /// Weak and strong comparison, from RFC 9110 Section 8.8.3.2.
    #[rstest]
    #[case("W/\"1\"", "W/\"1\"", false, true)]
    #[case("W/\"1\"", "W/\"2\"", false, false)]
    #[case("W/\"1\"", "\"1\"", false, true)]
    #[case("\"1\"", "\"1\"", true, true)]
    fn test_comparison(#[case] a: &str, #[case] b: &str, #[case] strong: bool, #[case] weak: bool) {
        let a = EntityTag::parse(a).unwrap();
        let b = EntityTag::parse(b).unwrap();
        assert_eq!(a.compare_strongly(&b), strong);
        assert_eq!(a.compare_weakly(&b), weak);
    }

    #[rstest]
    #[case("\"xyzzy\"", Some(7))]
    #[case("W/\"xyzzy\", \"a\"", Some(9))]
    #[case("\"\"", Some(2))]
    #[case("W/", None)]
    #[case("\"xyzzy", None)]
    #[case("xyzzy", None)]
    fn test_entity_tag_length(#[case] input: &str, #[case] expected: Option<usize>) {
        assert_eq!(entity_tag_length(input), expected);
    }

    #[test]
    fn test_set_parse() {
        let set = EntityTagSet::parse("\"xyzzy\", W/\"r2d2xxxx\",, \"c3piozzzz\"").unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.get("r2d2xxxx").unwrap().is_weak());
        assert_eq!(set.to_string(), "\"xyzzy\", W/\"r2d2xxxx\", \"c3piozzzz\"");
    }

    #[rstest]
    #[case("")]
    #[case(",")]
    #[case("\"a\" \"b\"")]
    #[case("\"a\",*")]
    #[case("**")]
    fn test_set_parse_invalid(#[case] input: &str) {
        assert!(EntityTagSet::parse(input).is_err());
    }

    #[test]
    fn test_set_wildcard() {
        let set = EntityTagSet::parse("*").unwrap();
        assert!(set.is_wildcard());
        assert_eq!(set.to_string(), "*");
        assert!(set.compare_strongly(None));
        assert!(set.compare_weakly(None));
        assert!(set.compare_strongly(Some(&EntityTag::weak("a").unwrap())));
    }

    #[test]
    fn test_set_add_overwrites_weakness() {
        let mut set = EntityTagSet::new();
        set.add(EntityTag::strong("a").unwrap());
        set.add(EntityTag::strong("b").unwrap());
        set.add(EntityTag::weak("a").unwrap());

        assert_eq!(set.len(), 2);
        assert!(set.get("a").unwrap().is_weak());
        assert_eq!(set.to_string(), "W/\"a\", \"b\"");

        assert!(set.remove("a"));
        assert!(!set.remove("a"));
        assert_eq!(set.to_string(), "\"b\"");

        set.clear();
        assert!(set.is_wildcard());
    }

    #[test]
    fn test_set_compare() {
        let set = EntityTagSet::parse("W/\"a\", \"b\"").unwrap();
        let strong_a = EntityTag::strong("a").unwrap();
        let strong_b = EntityTag::strong("b").unwrap();
        let weak_b = EntityTag::weak("b").unwrap();

        assert!(!set.compare_strongly(Some(&strong_a)));
        assert!(set.compare_weakly(Some(&strong_a)));
        assert!(set.compare_strongly(Some(&strong_b)));
        assert!(!set.compare_strongly(Some(&weak_b)));
        assert!(set.compare_weakly(Some(&weak_b)));
        assert!(!set.compare_strongly(None));
        assert!(!set.compare_weakly(None));
    }
}
