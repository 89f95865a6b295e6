// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use strum_macros::AsRefStr;

/// The coarse classes of [`FieldValueError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKind {
    /// The input doesn't match the grammar, or violates a semantic
    /// constraint of the value.
    InvalidValue,

    /// A keyed lookup (directive, parameter) for a name that isn't present.
    NotFound,

    /// A declared character set or language tag that isn't recognized.
    Unsupported,
}

/// An error that can occur while parsing, constructing or serializing a field
/// value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, thiserror::Error)]
pub enum FieldValueError {
    #[error("token is empty")]
    TokenEmpty,

    #[error("token contains a delimiter")]
    TokenContainsDelimiter,

    #[error("token contains a non-visible character")]
    TokenContainsNonVisibleAscii,

    #[error("token contains whitespace")]
    TokenContainsWhitespace,

    /// The separators or whitespace of a `#rule` list are malformed.
    ///
    /// ## Example:
    /// ```text
    /// foo bar
    ///  foo, bar
    /// ```
    #[error("malformed list syntax")]
    InvalidListSyntax,

    #[error("list contains too few elements")]
    TooFewListElements,

    #[error("list contains too many elements")]
    TooManyListElements,

    /// The value contains a character that can't occur inside a
    /// `quoted-string`, such as a control character.
    #[error("value can't be represented as a quoted-string")]
    InvalidQuotedString,

    #[error("malformed entity-tag")]
    InvalidEntityTag,

    #[error("malformed HTTP-date")]
    InvalidDate,

    /// ## Examples:
    /// ```text
    /// bytes=10-5
    /// bytes=-
    /// ```
    #[error("malformed byte range")]
    InvalidByteRange,

    #[error("byte range set contains no ranges")]
    EmptyByteRangeSet,

    #[error("malformed range set")]
    InvalidRangeSet,

    #[error("malformed Content-Range")]
    InvalidContentRange,

    #[error("malformed cache directive")]
    InvalidDirective,

    /// A directive that is defined without an argument was given one.
    ///
    /// ## Example:
    /// ```text
    /// no-store=1
    /// ```
    #[error("directive doesn't take a value")]
    DirectiveValueNotAllowed,

    #[error("directive requires a value")]
    DirectiveValueRequired,

    #[error("directive value isn't a delta-seconds")]
    InvalidDeltaSeconds,

    /// The name belongs to another kind of directive, for example when
    /// creating a general directive named `max-age`.
    #[error("directive name is reserved by another kind of directive")]
    ReservedDirectiveName,

    #[error("Cache-Control contains no directives")]
    EmptyCacheControl,

    #[error("malformed disposition-type")]
    InvalidDispositionType,

    #[error("malformed disposition parameter")]
    InvalidParameter,

    #[error("parameter value contains non-ASCII characters")]
    NonAsciiParameterValue,

    #[error("extended parameter name doesn't end with '*'")]
    ExtendedParameterNameWithoutAsterisk,

    #[error("malformed ext-value")]
    InvalidExtendedValue,

    #[error("value can't be represented in the declared charset")]
    UnrepresentableInCharset,

    #[error("no such directive")]
    DirectiveNotFound,

    #[error("no such parameter")]
    ParameterNotFound,

    #[error("unsupported charset")]
    UnsupportedCharset,

    #[error("unsupported language tag")]
    UnsupportedLanguage,
}

impl FieldValueError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DirectiveNotFound | Self::ParameterNotFound => ErrorKind::NotFound,
            Self::UnsupportedCharset | Self::UnsupportedLanguage => ErrorKind::Unsupported,
            _ => ErrorKind::InvalidValue,
        }
    }
}
