// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! Range requests: the `Range` and `Content-Range` fields.
//!
//! # Definition
//! ```text
//! Range                  = ranges-specifier
//! ranges-specifier       = range-unit "=" range-set
//! range-set              = 1#range-spec
//! range-spec             = int-range / suffix-range / other-range
//!
//! byte-ranges-specifier  = bytes-unit "=" byte-range-set
//! byte-range-spec        = first-byte-pos "-" [ last-byte-pos ]
//! suffix-byte-range-spec = "-" suffix-length
//! other-range-set        = 1*VCHAR
//! ```
//!
//! # References
//! * [RFC 9110 Section 14](https://www.rfc-editor.org/rfc/rfc9110.html#name-range-requests)

use std::{fmt, str::FromStr};

use crate::{
    abnf,
    lists::ListGrammar,
    syntax::validate_token,
    FieldValueError,
};

const BYTES_UNIT: &str = "bytes";

static BYTE_RANGE_LIST: ListGrammar = ListGrammar::new(byte_range_spec_length, 1, None);

/// A single range of a `bytes` range set. Without a first position, `last`
/// is the length of a suffix instead of an offset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ByteRange {
    first: Option<u64>,
    last: Option<u64>,
}

impl ByteRange {
    pub fn new(first: Option<u64>, last: Option<u64>) -> Result<Self, FieldValueError> {
        match (first, last) {
            (None, None) => Err(FieldValueError::InvalidByteRange),
            (Some(first), Some(last)) if last < first => Err(FieldValueError::InvalidByteRange),
            _ => Ok(Self { first, last }),
        }
    }

    /// ```text
    /// byte-range-spec / suffix-byte-range-spec
    /// ```
    pub fn parse(input: &str) -> Result<Self, FieldValueError> {
        let (first, last) = input.split_once('-').ok_or(FieldValueError::InvalidByteRange)?;
        let first = parse_position(first)?;
        let last = parse_position(last)?;
        Self::new(first, last)
    }

    pub fn first(&self) -> Option<u64> {
        self.first
    }

    pub fn last(&self) -> Option<u64> {
        self.last
    }

    pub fn is_suffix(&self) -> bool {
        self.first.is_none()
    }

    /// A suffix range is satisfiable if it is non-zero, regardless of the
    /// size. An offset range is satisfiable if it starts before the end of
    /// the representation, or if the size is unknown.
    pub fn is_satisfiable(&self, size: Option<u64>) -> bool {
        match (self.first, size) {
            (None, _) => self.last.is_some_and(|suffix_length| suffix_length > 0),
            (Some(_), None) => true,
            (Some(first), Some(size)) => first < size,
        }
    }

    /// Resolves the range into inclusive offsets within a representation of
    /// `size` bytes.
    pub fn to_offsets(&self, size: u64) -> Option<(u64, u64)> {
        if size == 0 || !self.is_satisfiable(Some(size)) {
            return None;
        }

        match self.first {
            None => {
                let suffix_length = self.last?.min(size);
                Some((size - suffix_length, size - 1))
            }
            Some(first) => {
                let last = self.last.map_or(size - 1, |last| last.min(size - 1));
                Some((first, last))
            }
        }
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.first {
            write!(f, "{first}")?;
        }
        f.write_str("-")?;
        if let Some(last) = self.last {
            write!(f, "{last}")?;
        }
        Ok(())
    }
}

impl FromStr for ByteRange {
    type Err = FieldValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_position(input: &str) -> Result<Option<u64>, FieldValueError> {
    if input.is_empty() {
        return Ok(None);
    }

    abnf::parse_digits(input)
        .map(Some)
        .ok_or(FieldValueError::InvalidByteRange)
}

fn byte_range_spec_length(input: &str) -> Option<usize> {
    let first_length = input.bytes().take_while(|byte| byte.is_ascii_digit()).count();
    if input.as_bytes().get(first_length) != Some(&b'-') {
        return None;
    }

    let last_length = input[first_length + 1..].bytes().take_while(|byte| byte.is_ascii_digit()).count();
    if first_length == 0 && last_length == 0 {
        return None;
    }

    Some(first_length + 1 + last_length)
}

/// The ranges of a `bytes` range request, in the order they were given.
/// Overlapping and duplicate ranges are kept as-is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ByteRangeSet {
    ranges: Vec<ByteRange>,
}

impl ByteRangeSet {
    pub fn new(ranges: Vec<ByteRange>) -> Result<Self, FieldValueError> {
        if ranges.is_empty() {
            return Err(FieldValueError::EmptyByteRangeSet);
        }

        Ok(Self { ranges })
    }

    pub fn parse(input: &str) -> Result<Self, FieldValueError> {
        let (unit, range_set) = input.split_once('=').ok_or(FieldValueError::InvalidRangeSet)?;
        if !unit.eq_ignore_ascii_case(BYTES_UNIT) {
            return Err(FieldValueError::InvalidRangeSet);
        }

        let ranges = BYTE_RANGE_LIST.split(range_set)?
            .into_iter()
            .map(ByteRange::parse)
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(ranges)
    }

    pub fn add(&mut self, range: ByteRange) {
        self.ranges.push(range);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ByteRange> {
        self.ranges.iter()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns the first and only range if there is only one range.
    /// Otherwise, when there are more than one, returns `None`.
    #[must_use]
    pub fn first_and_only(&self) -> Option<ByteRange> {
        if self.ranges.len() == 1 {
            Some(self.ranges[0])
        } else {
            None
        }
    }

    pub fn is_satisfiable(&self, size: Option<u64>) -> bool {
        self.ranges.iter().any(|range| range.is_satisfiable(size))
    }
}

impl fmt::Display for ByteRangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{BYTES_UNIT}=")?;
        for (index, range) in self.ranges.iter().enumerate() {
            if index != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{range}")?;
        }
        Ok(())
    }
}

impl FromStr for ByteRangeSet {
    type Err = FieldValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A range set of a unit other than `bytes`, kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OtherRangeSet {
    unit: String,
    value: String,
}

impl OtherRangeSet {
    pub fn new(unit: impl Into<String>, value: impl Into<String>) -> Result<Self, FieldValueError> {
        let unit = unit.into();
        let value = value.into();

        validate_token(&unit)?;
        if unit.eq_ignore_ascii_case(BYTES_UNIT) {
            return Err(FieldValueError::InvalidRangeSet);
        }

        if value.is_empty() || !value.bytes().all(abnf::is_visible_character) {
            return Err(FieldValueError::InvalidRangeSet);
        }

        Ok(Self { unit, value })
    }

    pub fn parse(input: &str) -> Result<Self, FieldValueError> {
        let (unit, value) = input.split_once('=').ok_or(FieldValueError::InvalidRangeSet)?;
        Self::new(unit, value)
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for OtherRangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.unit, self.value)
    }
}

/// The value of a `Range` field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RangeSet {
    Bytes(ByteRangeSet),
    Other(OtherRangeSet),
}

impl RangeSet {
    pub fn parse(input: &str) -> Result<Self, FieldValueError> {
        let result = match input.split_once('=') {
            Some((unit, _)) if unit.eq_ignore_ascii_case(BYTES_UNIT) => ByteRangeSet::parse(input).map(Self::Bytes),
            Some(_) => OtherRangeSet::parse(input).map(Self::Other),
            None => Err(FieldValueError::InvalidRangeSet),
        };

        if let Err(error) = &result {
            tracing::trace!(input, ?error, "rejected range set");
        }

        result
    }

    pub fn unit(&self) -> &str {
        match self {
            Self::Bytes(_) => BYTES_UNIT,
            Self::Other(other) => other.unit(),
        }
    }
}

impl fmt::Display for RangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(bytes) => fmt::Display::fmt(bytes, f),
            Self::Other(other) => fmt::Display::fmt(other, f),
        }
    }
}

impl FromStr for RangeSet {
    type Err = FieldValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The `Content-Range` header field indicates where in a full body a partial
/// message belongs.
///
/// ```text
/// Content-Range       = range-unit SP ( range-resp / unsatisfied-range )
/// range-resp          = incl-range "/" ( complete-length / "*" )
/// unsatisfied-range   = "*/" complete-length
/// ```
///
/// ### References
/// * [RFC 9110](https://httpwg.org/specs/rfc9110.html#field.content-range)
/// * [MDN `Content-Range` header](https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Content-Range)
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContentRange {
    Range {
        /// The start of the range, inclusive.
        first: u64,

        /// The end of the range, inclusive.
        last: u64,

        /// Complete length of the **resource**, not the body.
        complete_length: Option<u64>,
    },

    /// Used for 416 Range Not Satisfiable.
    ///
    /// ### RFC 9110, section 14.4:
    /// > A server generating a 416 (Range Not Satisfiable) response to a
    /// byte-range request SHOULD send a Content-Range header field with an
    /// unsatisfied-range value, as in the following example:
    /// > ```text
    /// > Content-Range: bytes */1234`
    /// > ```
    /// > The complete-length in a 416 response indicates the current length of
    /// > the selected representation.
    Unsatisfied {
        /// The complete length of the resource.
        complete_length: u64,
    },
}

impl ContentRange {
    pub fn range(first: u64, last: u64, complete_length: Option<u64>) -> Result<Self, FieldValueError> {
        if last < first || complete_length.is_some_and(|complete_length| last >= complete_length) {
            return Err(FieldValueError::InvalidContentRange);
        }

        Ok(Self::Range { first, last, complete_length })
    }

    pub fn parse(input: &str) -> Result<Self, FieldValueError> {
        let (unit, rest) = input.split_once(' ').ok_or(FieldValueError::InvalidContentRange)?;
        if !unit.eq_ignore_ascii_case(BYTES_UNIT) {
            return Err(FieldValueError::InvalidContentRange);
        }

        let (range, complete_length) = rest.split_once('/').ok_or(FieldValueError::InvalidContentRange)?;
        let complete_length = match complete_length {
            "*" => None,
            digits => Some(abnf::parse_digits(digits).ok_or(FieldValueError::InvalidContentRange)?),
        };

        if range == "*" {
            return complete_length
                .map(|complete_length| Self::Unsatisfied { complete_length })
                .ok_or(FieldValueError::InvalidContentRange);
        }

        let (first, last) = range.split_once('-').ok_or(FieldValueError::InvalidContentRange)?;
        let first = abnf::parse_digits(first).ok_or(FieldValueError::InvalidContentRange)?;
        let last = abnf::parse_digits(last).ok_or(FieldValueError::InvalidContentRange)?;
        Self::range(first, last, complete_length)
    }
}

impl fmt::Display for ContentRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range { first, last, complete_length: Some(complete_length) } => {
                write!(f, "{BYTES_UNIT} {first}-{last}/{complete_length}")
            }
            Self::Range { first, last, complete_length: None } => write!(f, "{BYTES_UNIT} {first}-{last}/*"),
            Self::Unsatisfied { complete_length } => write!(f, "{BYTES_UNIT} */{complete_length}"),
        }
    }
}

impl FromStr for ContentRange {
    type Err = FieldValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
