// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! The `Content-Disposition` field value and its parameters.
//!
//! # Definition
//! ```text
//! content-disposition = "Content-Disposition" ":"
//!                        disposition-type *( ";" disposition-parm )
//! disposition-type    = "inline" | "attachment" | disp-ext-type
//! disposition-parm    = filename-parm | disp-ext-parm
//! disp-ext-parm       = token "=" value
//!                     | ext-token "=" ext-value
//! ext-token           = <the characters in token, followed by "*">
//!
//! ext-value     = charset  "'" [ language ] "'" value-chars
//! value-chars   = *( pct-encoded / attr-char )
//! pct-encoded   = "%" HEXDIG HEXDIG
//! ```
//!
//! # References
//! * [RFC 6266](https://www.rfc-editor.org/rfc/rfc6266.html)
//! * [RFC 8187](https://www.rfc-editor.org/rfc/rfc8187.html)

use std::{borrow::Cow, fmt, str::FromStr};

use indexmap::IndexMap;

use crate::{
    charset::{validate_language, Charset},
    quoting,
    syntax::{is_attr_character, is_whitespace_character, token_length, validate_token},
    transliterate::{LatinFolding, Transliterate},
    FieldValueError,
};

/// Replaces the characters of a filename that have no ASCII form.
const FILENAME_PLACEHOLDER: char = '?';

/// A `token "=" value` parameter. The value is restricted to ASCII and is
/// sent as a token when possible, and as a quoted-string otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegularParameter {
    name: String,
    value: String,
}

impl RegularParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self, FieldValueError> {
        let name = name.into();
        let value = value.into();

        validate_token(&name)?;
        validate_regular_value(&value)?;

        Ok(Self { name, value })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), FieldValueError> {
        let name = name.into();
        validate_token(&name)?;
        self.name = name;
        Ok(())
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) -> Result<(), FieldValueError> {
        let value = value.into();
        validate_regular_value(&value)?;
        self.value = value;
        Ok(())
    }
}

fn validate_regular_value(value: &str) -> Result<(), FieldValueError> {
    if !value.is_ascii() {
        return Err(FieldValueError::NonAsciiParameterValue);
    }

    quoting::encode(value).map(|_| ())
}

/// An `ext-token "=" ext-value` parameter, carrying text in a declared
/// charset and an optional language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedParameter {
    name: String,
    value: String,
    charset: Charset,
    language: Option<String>,
}

impl ExtendedParameter {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        charset: Charset,
        language: Option<String>,
    ) -> Result<Self, FieldValueError> {
        let name = name.into();
        let value = value.into();

        validate_extended_name(&name)?;
        if charset.encode(&value).is_none() {
            return Err(FieldValueError::UnrepresentableInCharset);
        }
        if let Some(language) = &language {
            validate_language(language)?;
        }

        Ok(Self { name, value, charset, language })
    }

    /// Decodes the parts of an `ext-value`.
    fn decode(name: &str, charset: &str, language: &str, value_chars: &str) -> Result<Self, FieldValueError> {
        let charset = Charset::from_name(charset)?;
        let language = match language {
            "" => None,
            language => Some(language.to_owned()),
        };

        let bytes = urlencoding::decode_binary(value_chars.as_bytes());
        let value = charset.decode(&bytes).ok_or(FieldValueError::InvalidExtendedValue)?;

        Self::new(name, value, charset, language)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), FieldValueError> {
        let name = name.into();
        validate_extended_name(&name)?;
        self.name = name;
        Ok(())
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) -> Result<(), FieldValueError> {
        let value = value.into();
        if self.charset.encode(&value).is_none() {
            return Err(FieldValueError::UnrepresentableInCharset);
        }
        self.value = value;
        Ok(())
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn set_charset(&mut self, charset: Charset) -> Result<(), FieldValueError> {
        if charset.encode(&self.value).is_none() {
            return Err(FieldValueError::UnrepresentableInCharset);
        }
        self.charset = charset;
        Ok(())
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn set_language(&mut self, language: Option<String>) -> Result<(), FieldValueError> {
        if let Some(language) = &language {
            validate_language(language)?;
        }
        self.language = language;
        Ok(())
    }
}

fn validate_extended_name(name: &str) -> Result<(), FieldValueError> {
    validate_token(name)?;
    if !name.ends_with('*') {
        return Err(FieldValueError::ExtendedParameterNameWithoutAsterisk);
    }
    Ok(())
}

impl fmt::Display for ExtendedParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.charset.encode(&self.value).ok_or(fmt::Error)?;

        write!(f, "{}={}'{}'", self.name, self.charset, self.language().unwrap_or_default())?;
        for byte in bytes {
            if is_attr_character(byte) {
                fmt::Write::write_char(f, char::from(byte))?;
            } else {
                write!(f, "%{byte:02X}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for RegularParameter {
    /// A name ending in `*` always gets a quoted-string, so the value can't be
    /// mistaken for an `ext-value`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = if self.name.ends_with('*') {
            quoting::quote(&self.value).map(Cow::Owned)
        } else {
            quoting::encode(&self.value)
        };

        write!(f, "{}={}", self.name, value.map_err(|_| fmt::Error)?)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Parameter {
    Regular(RegularParameter),
    Extended(ExtendedParameter),
}

impl Parameter {
    /// Parses a single `disposition-parm`. Only a parameter shaped like an
    /// `ext-value` under an `ext-token` name is extended.
    pub fn parse(input: &str) -> Result<Self, FieldValueError> {
        let (name, value) = input.split_once('=').ok_or(FieldValueError::InvalidParameter)?;
        validate_token(name).map_err(|_| FieldValueError::InvalidParameter)?;

        if name.ends_with('*') {
            if let Some((charset, language, value_chars)) = split_ext_value(value) {
                return ExtendedParameter::decode(name, charset, language, value_chars)
                    .map(Self::Extended);
            }
        }

        let value = if value.starts_with('"') {
            quoting::decode(value)?
        } else {
            validate_token(value).map_err(|_| FieldValueError::InvalidParameter)?;
            value.into()
        };

        RegularParameter::new(name, value).map(Self::Regular)
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Regular(parameter) => parameter.name(),
            Self::Extended(parameter) => parameter.name(),
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Regular(parameter) => parameter.value(),
            Self::Extended(parameter) => parameter.value(),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regular(parameter) => fmt::Display::fmt(parameter, f),
            Self::Extended(parameter) => fmt::Display::fmt(parameter, f),
        }
    }
}

impl FromStr for Parameter {
    type Err = FieldValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<RegularParameter> for Parameter {
    fn from(parameter: RegularParameter) -> Self {
        Self::Regular(parameter)
    }
}

impl From<ExtendedParameter> for Parameter {
    fn from(parameter: ExtendedParameter) -> Self {
        Self::Extended(parameter)
    }
}

/// Splits an `ext-value` into its charset, language and value-chars, or
/// returns `None` if the input doesn't have that shape.
fn split_ext_value(input: &str) -> Option<(&str, &str, &str)> {
    let (charset, rest) = input.split_once('\'')?;
    let (language, value_chars) = rest.split_once('\'')?;

    if charset.is_empty() || !charset.bytes().all(is_mime_charset_character) {
        return None;
    }

    if !language.bytes().all(|byte| byte.is_ascii_alphanumeric() || byte == b'-') {
        return None;
    }

    let mut bytes = value_chars.bytes();
    while let Some(byte) = bytes.next() {
        if byte == b'%' {
            let high = bytes.next()?;
            let low = bytes.next()?;
            if !high.is_ascii_hexdigit() || !low.is_ascii_hexdigit() {
                return None;
            }
        } else if !is_attr_character(byte) {
            return None;
        }
    }

    Some((charset, language, value_chars))
}

/// ```text
/// mime-charsetc = ALPHA / DIGIT
///               / "!" / "#" / "$" / "%" / "&"
///               / "+" / "-" / "^" / "_" / "`"
///               / "{" / "}" / "~"
/// ```
fn is_mime_charset_character(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || b"!#$%&+-^_`{}~".contains(&byte)
}

fn disposition_parameter_length(input: &str) -> Option<usize> {
    let name_length = token_length(input);
    if name_length == 0 {
        return None;
    }

    let value = input[name_length..].strip_prefix('=')?;
    let value_length = if value.starts_with('"') {
        quoting::quoted_string_length(value)?
    } else {
        token_length(value)
    };

    if value_length == 0 {
        return None;
    }

    Some(name_length + 1 + value_length)
}

/// A `Content-Disposition` value: the disposition type and its parameters,
/// keyed case-insensitively by name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentDisposition {
    disposition_type: String,
    parameters: IndexMap<String, Parameter>,
}

impl ContentDisposition {
    pub fn new(disposition_type: impl Into<String>) -> Result<Self, FieldValueError> {
        let disposition_type = disposition_type.into();
        validate_token(&disposition_type).map_err(|_| FieldValueError::InvalidDispositionType)?;

        Ok(Self {
            disposition_type,
            parameters: IndexMap::new(),
        })
    }

    pub fn parse(input: &str) -> Result<Self, FieldValueError> {
        let result = Self::parse_parameters(input);

        match &result {
            Ok(_content_disposition) => {
                #[cfg(feature = "debugging")]
                tracing::debug!(input, parameters = _content_disposition.parameters.len(), "parsed Content-Disposition");
            }
            Err(error) => tracing::trace!(input, ?error, "rejected Content-Disposition"),
        }

        result
    }

    fn parse_parameters(input: &str) -> Result<Self, FieldValueError> {
        let type_length = token_length(input);
        let mut content_disposition = Self::new(&input[..type_length])?;

        let mut rest = &input[type_length..];
        if !rest.is_empty() && !rest.trim_start_matches(is_whitespace_character).starts_with(';') {
            return Err(FieldValueError::InvalidDispositionType);
        }

        while !rest.is_empty() {
            rest = rest.trim_start_matches(is_whitespace_character)
                .strip_prefix(';')
                .ok_or(FieldValueError::InvalidParameter)?
                .trim_start_matches(is_whitespace_character);

            let length = disposition_parameter_length(rest).ok_or(FieldValueError::InvalidParameter)?;
            content_disposition.set_parameter(Parameter::parse(&rest[..length])?);
            rest = &rest[length..];
        }

        Ok(content_disposition)
    }

    pub fn disposition_type(&self) -> &str {
        &self.disposition_type
    }

    pub fn set_disposition_type(&mut self, disposition_type: impl Into<String>) -> Result<(), FieldValueError> {
        let disposition_type = disposition_type.into();
        validate_token(&disposition_type).map_err(|_| FieldValueError::InvalidDispositionType)?;
        self.disposition_type = disposition_type;
        Ok(())
    }

    pub fn is_attachment(&self) -> bool {
        self.disposition_type.eq_ignore_ascii_case("attachment")
    }

    pub fn is_inline(&self) -> bool {
        self.disposition_type.eq_ignore_ascii_case("inline")
    }

    pub fn parameter(&self, name: &str) -> Result<&Parameter, FieldValueError> {
        self.parameters.get(&name.to_ascii_lowercase())
            .ok_or(FieldValueError::ParameterNotFound)
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.contains_key(&name.to_ascii_lowercase())
    }

    /// Sets the parameter, replacing the one with the same name.
    pub fn set_parameter(&mut self, parameter: impl Into<Parameter>) {
        let parameter = parameter.into();
        self.parameters.insert(parameter.name().to_ascii_lowercase(), parameter);
    }

    pub fn unset_parameter(&mut self, name: &str) -> bool {
        self.parameters.shift_remove(&name.to_ascii_lowercase()).is_some()
    }

    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.values()
    }

    /// Sets the `filename` parameter, and the `filename*` parameter when the
    /// name isn't ASCII. See [`ContentDisposition::set_filename_with`].
    pub fn set_filename(&mut self, name: &str) -> Result<(), FieldValueError> {
        self.set_filename_with(name, &LatinFolding)
    }

    /// Replaces the filename parameters. An ASCII name is only sent as
    /// `filename`. Otherwise `filename*` carries the name in UTF-8, and
    /// `filename` an ASCII fallback: the transliterated name with every run
    /// of remaining non-ASCII characters replaced by a single `?`.
    pub fn set_filename_with(&mut self, name: &str, transliterator: &impl Transliterate) -> Result<(), FieldValueError> {
        let (regular, extended) = if name.is_ascii() {
            (RegularParameter::new("filename", name)?, None)
        } else {
            let fallback = ascii_fallback(&transliterator.transliterate(name));
            (
                RegularParameter::new("filename", fallback)?,
                Some(ExtendedParameter::new("filename*", name, Charset::Utf8, None)?),
            )
        };

        self.unset_parameter("filename");
        self.unset_parameter("filename*");

        self.set_parameter(regular);
        if let Some(extended) = extended {
            self.set_parameter(extended);
        }

        Ok(())
    }

    /// The filename, preferring the extended form.
    pub fn filename(&self) -> Option<&str> {
        if let Ok(Parameter::Extended(parameter)) = self.parameter("filename*") {
            return Some(parameter.value());
        }

        self.parameter("filename")
            .ok()
            .map(Parameter::value)
    }
}

fn ascii_fallback(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for character in text.chars() {
        let character = if character.is_ascii() { character } else { FILENAME_PLACEHOLDER };
        if character == FILENAME_PLACEHOLDER && result.ends_with(FILENAME_PLACEHOLDER) {
            continue;
        }
        result.push(character);
    }

    result
}

impl fmt::Display for ContentDisposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.disposition_type)?;
        for parameter in self.parameters.values() {
            write!(f, "; {parameter}")?;
        }
        Ok(())
    }
}

impl FromStr for ContentDisposition {
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
    fn test_set_filename_non_ascii() {
        let mut content_disposition = ContentDisposition::new("attachment").unwrap();
        content_disposition.set_filename("\u{20ac} rate.txt").unwrap();

        assert_eq!(
            content_disposition.parameter("filename"),
            Ok(&Parameter::Regular(RegularParameter::new("filename", "? rate.txt").unwrap()))
        );
        assert_eq!(
            content_disposition.to_string(),
            "attachment; filename=\"? rate.txt\"; filename*=UTF-8''%E2%82%AC%20rate.txt"
        );
        assert_eq!(content_disposition.filename(), Some("\u{20ac} rate.txt"));
    }

    #[test]
    fn test_set_filename_ascii_replaces_extended() {
        let mut content_disposition = ContentDisposition::parse("attachment; filename*=UTF-8''%C3%A9.txt; size=5").unwrap();
        content_disposition.set_filename("plain.txt").unwrap();

        assert!(!content_disposition.has_parameter("filename*"));
        assert_eq!(content_disposition.to_string(), "attachment; size=5; filename=plain.txt");
    }

    #[rstest]
    #[case("r\u{e9}sum\u{e9}.pdf", "resume.pdf")]
    #[case("\u{65e5}\u{672c}\u{8a9e}.txt", "?.txt")]
    #[case("\u{20ac}\u{e9}\u{20ac}.txt", "?e?.txt")]
    #[case("a?\u{20ac}b", "a?b")]
    fn test_set_filename_fallback(#[case] name: &str, #[case] expected: &str) {
        let mut content_disposition = ContentDisposition::new("attachment").unwrap();
        content_disposition.set_filename(name).unwrap();

        assert_eq!(content_disposition.parameter("filename").map(Parameter::value), Ok(expected));
        assert_eq!(content_disposition.parameter("filename*").map(Parameter::value), Ok(name));
    }

    struct Uppercase;

    impl Transliterate for Uppercase {
        fn transliterate<'a>(&self, input: &'a str) -> Cow<'a, str> {
            Cow::Owned(input.to_uppercase())
        }
    }

    #[test]
    fn test_set_filename_with_transliterator() {
        let mut content_disposition = ContentDisposition::new("inline").unwrap();
        content_disposition.set_filename_with("\u{e9}t\u{e9}.txt", &Uppercase).unwrap();
        assert_eq!(content_disposition.parameter("filename").map(Parameter::value), Ok("?T?.TXT"));
    }

    #[test]
    fn test_set_filename_invalid_keeps_parameters() {
        let mut content_disposition = ContentDisposition::parse("attachment; filename=old.txt").unwrap();
        assert_eq!(content_disposition.set_filename("a\nb"), Err(FieldValueError::InvalidQuotedString));
        assert_eq!(content_disposition.filename(), Some("old.txt"));
    }

    #[rstest]
    #[case("inline", "inline")]
    #[case("attachment; filename=foo.html", "attachment; filename=foo.html")]
    #[case("INLINE; FILENAME=\"an example.html\"", "INLINE; FILENAME=\"an example.html\"")]
    #[case("attachment;filename=\"foo.html\"", "attachment; filename=foo.html")]
    #[case("attachment ; filename = x", "")]
    #[case("attachment; filename*=UTF-8'en'%e2%82%ac%20rates", "attachment; filename*=UTF-8'en'%E2%82%AC%20rates")]
    #[case("attachment; filename*=iso-8859-1''%A3%20rates", "attachment; filename*=ISO-8859-1''%A3%20rates")]
    #[case("attachment; foo*=bar", "attachment; foo*=\"bar\"")]
    #[case("attachment; a=1; b=2; A=3", "attachment; A=3; b=2")]
    fn test_parse_canonical_form(#[case] input: &str, #[case] expected: &str) {
        match ContentDisposition::parse(input) {
            Ok(content_disposition) => assert_eq!(content_disposition.to_string(), expected),
            Err(error) => assert!(expected.is_empty(), "should parse: {input:?}, got {error:?}"),
        }
    }

    #[rstest]
    #[case("", FieldValueError::InvalidDispositionType)]
    #[case("; filename=a", FieldValueError::InvalidDispositionType)]
    #[case("attachment;", FieldValueError::InvalidParameter)]
    #[case("attachment; filename", FieldValueError::InvalidParameter)]
    #[case("attachment; filename=a b", FieldValueError::InvalidParameter)]
    #[case("attachment filename=a", FieldValueError::InvalidDispositionType)]
    #[case("attach/ment", FieldValueError::InvalidDispositionType)]
    #[case("inline\"x", FieldValueError::InvalidDispositionType)]
    #[case("inline ", FieldValueError::InvalidDispositionType)]
    #[case("attachment; filename=\"a", FieldValueError::InvalidParameter)]
    #[case("attachment; filename=\"caf\u{e9}\"", FieldValueError::NonAsciiParameterValue)]
    #[case("attachment; filename*=koi8-r''abc", FieldValueError::UnsupportedCharset)]
    #[case("attachment; filename*=UTF-8'toolonglanguage'abc", FieldValueError::UnsupportedLanguage)]
    #[case("attachment; filename*=UTF-8''%FF", FieldValueError::InvalidExtendedValue)]
    #[case("attachment; filename*=US-ASCII''%E9", FieldValueError::InvalidExtendedValue)]
    fn test_parse_invalid(#[case] input: &str, #[case] expected: FieldValueError) {
        assert_eq!(ContentDisposition::parse(input), Err(expected));
    }

    #[test]
    fn test_parse_extended() {
        let parameter = Parameter::parse("title*=ISO-8859-1'en'%A3%20rates").unwrap();
        let Parameter::Extended(parameter) = parameter else {
            panic!("expected an extended parameter");
        };

        assert_eq!(parameter.name(), "title*");
        assert_eq!(parameter.value(), "\u{a3} rates");
        assert_eq!(parameter.charset(), Charset::Iso8859_1);
        assert_eq!(parameter.language(), Some("en"));
    }

    #[test]
    fn test_regular_name_may_end_with_asterisk() {
        assert_eq!(
            Parameter::parse("foo*=\"bar\""),
            Ok(Parameter::Regular(RegularParameter::new("foo*", "bar").unwrap()))
        );
    }

    #[rstest]
    #[case("title*", "UTF-8''abc", "attachment; title*=\"UTF-8''abc\"")]
    #[case("foo*", "a'b'c", "attachment; foo*=\"a'b'c\"")]
    fn test_regular_parameter_with_asterisk_round_trips(#[case] name: &str, #[case] value: &str, #[case] serialized: &str) {
        let mut content_disposition = ContentDisposition::new("attachment").unwrap();
        content_disposition.set_parameter(RegularParameter::new(name, value).unwrap());
        assert_eq!(content_disposition.to_string(), serialized);

        let reparsed = ContentDisposition::parse(serialized).unwrap();
        assert_eq!(reparsed, content_disposition);
        assert!(matches!(reparsed.parameter(name), Ok(Parameter::Regular(_))));
    }

    #[test]
    fn test_extended_parameter_constraints() {
        assert_eq!(
            ExtendedParameter::new("filename", "a", Charset::Utf8, None),
            Err(FieldValueError::ExtendedParameterNameWithoutAsterisk)
        );
        assert_eq!(
            ExtendedParameter::new("filename*", "\u{20ac}", Charset::Iso8859_1, None),
            Err(FieldValueError::UnrepresentableInCharset)
        );
        assert_eq!(
            ExtendedParameter::new("filename*", "a", Charset::Utf8, Some("en_US".into())),
            Err(FieldValueError::UnsupportedLanguage)
        );

        let mut parameter = ExtendedParameter::new("filename*", "\u{e9}", Charset::Utf8, None).unwrap();
        assert_eq!(parameter.set_charset(Charset::UsAscii), Err(FieldValueError::UnrepresentableInCharset));
        assert_eq!(parameter.set_charset(Charset::Iso8859_1), Ok(()));
        assert_eq!(parameter.set_value("\u{20ac}"), Err(FieldValueError::UnrepresentableInCharset));
        assert_eq!(parameter.set_language(Some("fr".into())), Ok(()));
        assert_eq!(parameter.to_string(), "filename*=ISO-8859-1'fr'%E9");
    }

    #[test]
    fn test_regular_parameter_constraints() {
        assert_eq!(RegularParameter::new("", "a"), Err(FieldValueError::TokenEmpty));
        assert_eq!(RegularParameter::new("name", "\u{e9}"), Err(FieldValueError::NonAsciiParameterValue));
        assert_eq!(RegularParameter::new("name", "\u{7f}"), Err(FieldValueError::InvalidQuotedString));

        let mut parameter = RegularParameter::new("name", "").unwrap();
        assert_eq!(parameter.to_string(), "name=\"\"");
        assert_eq!(parameter.set_value("a\"b"), Ok(()));
        assert_eq!(parameter.to_string(), "name=\"a\\\"b\"");
    }

    #[test]
    fn test_parameters() {
        let mut content_disposition = ContentDisposition::parse("form-data; name=field; filename=\"a.txt\"").unwrap();
        assert!(!content_disposition.is_attachment());
        assert!(!content_disposition.is_inline());
        assert_eq!(content_disposition.disposition_type(), "form-data");

        assert!(content_disposition.has_parameter("NAME"));
        assert_eq!(content_disposition.parameter("missing"), Err(FieldValueError::ParameterNotFound));

        assert!(content_disposition.unset_parameter("Name"));
        assert!(!content_disposition.unset_parameter("name"));

        assert_eq!(content_disposition.set_disposition_type("not a token"), Err(FieldValueError::InvalidDispositionType));
        content_disposition.set_disposition_type("Attachment").unwrap();
        assert!(content_disposition.is_attachment());

        let names: Vec<_> = content_disposition.parameters().map(Parameter::name).collect();
        assert_eq!(names, ["filename"]);
    }
}
