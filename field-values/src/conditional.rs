// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! Evaluation of conditional requests using the validators of the selected
//! representation.
//!
//! # References
//! * [RFC 9110 Section 13](https://www.rfc-editor.org/rfc/rfc9110.html#name-conditional-requests)

use std::{fmt, time::SystemTime};

use crate::{EntityTag, EntityTagSet, FieldValueError, HttpDate};

/// The `If-Range` field value.
///
/// ```text
/// If-Range = entity-tag / HTTP-date
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IfRange {
    EntityTag(EntityTag),
    Date(HttpDate),
}

impl IfRange {
    pub fn parse(input: &str, now: SystemTime) -> Result<Self, FieldValueError> {
        if input.starts_with('"') || input.starts_with("W/") {
            EntityTag::parse(input).map(Self::EntityTag)
        } else {
            HttpDate::parse(input, now).map(Self::Date)
        }
    }

    /// Whether the representation is unchanged, in which case the range
    /// request can be honored.
    ///
    /// # References
    /// * [RFC 9110 Section 13.1.5](https://www.rfc-editor.org/rfc/rfc9110.html#section-13.1.5)
    pub fn is_fresh(&self, current_etag: Option<&EntityTag>, last_modified: Option<&HttpDate>) -> bool {
        match self {
            Self::EntityTag(etag) => current_etag.is_some_and(|current| etag.compare_strongly(current)),
            Self::Date(date) => last_modified.is_some_and(|last_modified| {
                !last_modified.is_weak() && last_modified.is_eq(date)
            }),
        }
    }
}

impl fmt::Display for IfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EntityTag(etag) => fmt::Display::fmt(etag, f),
            Self::Date(date) => fmt::Display::fmt(date, f),
        }
    }
}

/// The validators of the selected representation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceState {
    pub etag: Option<EntityTag>,
    pub last_modified: Option<HttpDate>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Evaluation {
    Proceed,
    NotModified,
    PreconditionFailed,
}

/// The precondition fields of a request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Preconditions {
    pub if_match: Option<EntityTagSet>,
    pub if_none_match: Option<EntityTagSet>,
    pub if_modified_since: Option<HttpDate>,
    pub if_unmodified_since: Option<HttpDate>,
}

impl Preconditions {
    pub fn is_empty(&self) -> bool {
        self.if_match.is_none()
            && self.if_none_match.is_none()
            && self.if_modified_since.is_none()
            && self.if_unmodified_since.is_none()
    }

    /// Evaluates the preconditions in the order of RFC 9110 Section 13.2.2.
    /// A date precondition is ignored when the resource has no
    /// `Last-Modified` date, or when the entity-tag precondition it pairs
    /// with is present.
    pub fn evaluate(&self, resource: &ResourceState, is_get_or_head: bool) -> Evaluation {
        let current_etag = resource.etag.as_ref();

        if let Some(if_match) = &self.if_match {
            if !if_match.compare_strongly(current_etag) {
                return Evaluation::PreconditionFailed;
            }
        } else if let (Some(since), Some(last_modified)) = (&self.if_unmodified_since, &resource.last_modified) {
            if last_modified.is_gt(since) {
                return Evaluation::PreconditionFailed;
            }
        }

        if let Some(if_none_match) = &self.if_none_match {
            if if_none_match.compare_weakly(current_etag) {
                return if is_get_or_head {
                    Evaluation::NotModified
                } else {
                    Evaluation::PreconditionFailed
                };
            }
        } else if let (true, Some(since), Some(last_modified)) = (is_get_or_head, &self.if_modified_since, &resource.last_modified) {
            if last_modified.is_lte(since) {
                return Evaluation::NotModified;
            }
        }

        Evaluation::Proceed
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use rstest::rstest;

    fn now() -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000_000)
    }

    fn date(timestamp: i64) -> HttpDate {
        HttpDate::from_unix_timestamp(timestamp).unwrap()
    }

    fn strong_date(timestamp: i64) -> HttpDate {
        let mut date = date(timestamp);
        date.set_weak(false);
        date
    }

    fn resource() -> ResourceState {
        ResourceState {
            etag: Some(EntityTag::strong("v2").unwrap()),
            last_modified: Some(date(1_000)),
        }
    }

    #[test]
    fn test_if_range_parse() {
        assert_eq!(
            IfRange::parse("\"v2\"", now()),
            Ok(IfRange::EntityTag(EntityTag::strong("v2").unwrap()))
        );
        assert_eq!(
            IfRange::parse("W/\"v2\"", now()),
            Ok(IfRange::EntityTag(EntityTag::weak("v2").unwrap()))
        );
        assert_eq!(
            IfRange::parse("Thu, 01 Jan 1970 00:16:40 GMT", now()),
            Ok(IfRange::Date(date(1_000)))
        );
        assert_eq!(IfRange::parse("\"v2", now()), Err(FieldValueError::InvalidEntityTag));
        assert_eq!(IfRange::parse("yesterday", now()), Err(FieldValueError::InvalidDate));
    }

    #[test]
    fn test_if_range_entity_tag_compares_strongly() {
        let current = EntityTag::strong("v2").unwrap();

        assert!(IfRange::EntityTag(EntityTag::strong("v2").unwrap()).is_fresh(Some(&current), None));
        assert!(!IfRange::EntityTag(EntityTag::weak("v2").unwrap()).is_fresh(Some(&current), None));
        assert!(!IfRange::EntityTag(EntityTag::strong("v1").unwrap()).is_fresh(Some(&current), None));
        assert!(!IfRange::EntityTag(EntityTag::strong("v2").unwrap()).is_fresh(None, None));
    }

    #[test]
    fn test_if_range_date_requires_strong_last_modified() {
        let if_range = IfRange::Date(date(1_000));

        assert!(if_range.is_fresh(None, Some(&strong_date(1_000))));
        assert!(!if_range.is_fresh(None, Some(&date(1_000))));
        assert!(!if_range.is_fresh(None, Some(&strong_date(1_001))));
        assert!(!if_range.is_fresh(None, None));
    }

    #[rstest]
    #[case(Preconditions::default(), true, Evaluation::Proceed)]
    #[case(Preconditions { if_match: Some(EntityTagSet::new()), ..Default::default() }, false, Evaluation::Proceed)]
    #[case(Preconditions { if_match: Some(EntityTagSet::parse("\"v1\", \"v2\"").unwrap()), ..Default::default() }, false, Evaluation::Proceed)]
    #[case(Preconditions { if_match: Some(EntityTagSet::parse("W/\"v2\"").unwrap()), ..Default::default() }, false, Evaluation::PreconditionFailed)]
    #[case(Preconditions { if_match: Some(EntityTagSet::parse("\"v1\"").unwrap()), ..Default::default() }, true, Evaluation::PreconditionFailed)]
    #[case(Preconditions { if_unmodified_since: Some(date(999)), ..Default::default() }, false, Evaluation::PreconditionFailed)]
    #[case(Preconditions { if_unmodified_since: Some(date(1_000)), ..Default::default() }, false, Evaluation::Proceed)]
    #[case(Preconditions { if_match: Some(EntityTagSet::parse("\"v2\"").unwrap()), if_unmodified_since: Some(date(999)), ..Default::default() }, false, Evaluation::Proceed)]
    #[case(Preconditions { if_none_match: Some(EntityTagSet::parse("W/\"v2\"").unwrap()), ..Default::default() }, true, Evaluation::NotModified)]
    #[case(Preconditions { if_none_match: Some(EntityTagSet::parse("\"v2\"").unwrap()), ..Default::default() }, false, Evaluation::PreconditionFailed)]
    #[case(Preconditions { if_none_match: Some(EntityTagSet::new()), ..Default::default() }, false, Evaluation::PreconditionFailed)]
    #[case(Preconditions { if_none_match: Some(EntityTagSet::parse("\"v1\"").unwrap()), ..Default::default() }, true, Evaluation::Proceed)]
    #[case(Preconditions { if_modified_since: Some(date(1_000)), ..Default::default() }, true, Evaluation::NotModified)]
    #[case(Preconditions { if_modified_since: Some(date(999)), ..Default::default() }, true, Evaluation::Proceed)]
    #[case(Preconditions { if_modified_since: Some(date(1_000)), ..Default::default() }, false, Evaluation::Proceed)]
    #[case(Preconditions { if_none_match: Some(EntityTagSet::parse("\"v1\"").unwrap()), if_modified_since: Some(date(1_000)), ..Default::default() }, true, Evaluation::Proceed)]
    fn test_evaluate(#[case] preconditions: Preconditions, #[case] is_get_or_head: bool, #[case] expected: Evaluation) {
        assert_eq!(preconditions.evaluate(&resource(), is_get_or_head), expected);
    }

    #[test]
    fn test_evaluate_without_validators() {
        let resource = ResourceState::default();

        let preconditions = Preconditions {
            if_match: Some(EntityTagSet::parse("\"v1\"").unwrap()),
            ..Default::default()
        };
        assert_eq!(preconditions.evaluate(&resource, true), Evaluation::PreconditionFailed);

        let preconditions = Preconditions {
            if_unmodified_since: Some(date(0)),
            if_modified_since: Some(date(0)),
            ..Default::default()
        };
        assert!(!preconditions.is_empty());
        assert_eq!(preconditions.evaluate(&resource, true), Evaluation::Proceed);
    }
}
