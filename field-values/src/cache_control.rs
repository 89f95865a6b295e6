// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! The `Cache-Control` field and its directives.
//!
//! # Definition
//! ```text
//! Cache-Control   = #cache-directive
//! cache-directive = token [ "=" ( token / quoted-string ) ]
//! ```
//!
//! Directives come in four shapes, each owning its own names:
//! * valueless, such as `no-store`;
//! * integer (`delta-seconds`), such as `max-age=3600`;
//! * field list, such as `no-cache="Set-Cookie"`;
//! * general, any other name with an optional argument.
//!
//! # References
//! * [RFC 9111 Section 5.2](https://www.rfc-editor.org/rfc/rfc9111.html#name-cache-control)

use std::{borrow::Cow, fmt, str::FromStr};

use indexmap::IndexMap;
use phf::phf_map;
use unicase::UniCase;

use crate::{
    abnf,
    lists::{token_element, ListGrammar},
    quoting,
    syntax::{token_length, validate_token},
    FieldValueError,
};

static CACHE_DIRECTIVE_LIST: ListGrammar = ListGrammar::new(cache_directive_length, 1, None);
static FIELD_NAME_LIST: ListGrammar = ListGrammar::new(token_element, 0, None);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    Valueless,
    Integer,
    FieldList,
    General,
}

/// The names reserved by the non-general directive kinds. Every name not in
/// this map is a general directive.
static RESERVED_DIRECTIVE_NAMES: phf::Map<UniCase<&'static str>, DirectiveKind> = phf_map!(
    UniCase::ascii("no-cache") => DirectiveKind::FieldList,
    UniCase::ascii("private") => DirectiveKind::FieldList,

    UniCase::ascii("max-age") => DirectiveKind::Integer,
    UniCase::ascii("max-stale") => DirectiveKind::Integer,
    UniCase::ascii("min-fresh") => DirectiveKind::Integer,
    UniCase::ascii("s-maxage") => DirectiveKind::Integer,
    UniCase::ascii("stale-if-error") => DirectiveKind::Integer,
    UniCase::ascii("stale-while-revalidate") => DirectiveKind::Integer,

    UniCase::ascii("immutable") => DirectiveKind::Valueless,
    UniCase::ascii("must-revalidate") => DirectiveKind::Valueless,
    UniCase::ascii("must-understand") => DirectiveKind::Valueless,
    UniCase::ascii("no-store") => DirectiveKind::Valueless,
    UniCase::ascii("no-transform") => DirectiveKind::Valueless,
    UniCase::ascii("only-if-cached") => DirectiveKind::Valueless,
    UniCase::ascii("proxy-revalidate") => DirectiveKind::Valueless,
    UniCase::ascii("public") => DirectiveKind::Valueless,
);

impl DirectiveKind {
    /// The kind of directive that owns the given name.
    pub fn of(name: &str) -> Self {
        RESERVED_DIRECTIVE_NAMES.get(&UniCase::ascii(name))
            .copied()
            .unwrap_or(DirectiveKind::General)
    }
}

fn validate_name(name: &str, kind: DirectiveKind) -> Result<(), FieldValueError> {
    validate_token(name)?;

    if DirectiveKind::of(name) != kind {
        return Err(FieldValueError::ReservedDirectiveName);
    }

    Ok(())
}

/// A directive without an argument, e.g. `no-store`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValuelessDirective {
    name: String,
}

impl ValuelessDirective {
    pub fn new(name: impl Into<String>) -> Result<Self, FieldValueError> {
        let name = name.into();
        validate_name(&name, DirectiveKind::Valueless)?;
        Ok(Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), FieldValueError> {
        *self = Self::new(name)?;
        Ok(())
    }
}

/// A directive with a `delta-seconds` argument, e.g. `max-age=3600`. The
/// digits are kept as text, since the grammar doesn't bound their count.
///
/// ```text
/// delta-seconds = 1*DIGIT
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegerDirective {
    name: String,
    value: String,
}

impl IntegerDirective {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self, FieldValueError> {
        let name = name.into();
        let value = value.into();

        validate_name(&name, DirectiveKind::Integer)?;
        if !abnf::is_digits(&value) {
            return Err(FieldValueError::InvalidDeltaSeconds);
        }

        Ok(Self { name, value })
    }

    pub fn from_seconds(name: impl Into<String>, seconds: u64) -> Result<Self, FieldValueError> {
        Self::new(name, seconds.to_string())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), FieldValueError> {
        let name = name.into();
        validate_name(&name, DirectiveKind::Integer)?;
        self.name = name;
        Ok(())
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) -> Result<(), FieldValueError> {
        let value = value.into();
        if !abnf::is_digits(&value) {
            return Err(FieldValueError::InvalidDeltaSeconds);
        }
        self.value = value;
        Ok(())
    }

    /// Returns `None` when the value doesn't fit.
    pub fn as_u64(&self) -> Option<u64> {
        self.value.parse().ok()
    }
}

/// A directive with a list of field names, e.g. `no-cache="Set-Cookie"`.
/// Field names are unique, compared case-insensitively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldListDirective {
    name: String,
    fields: Vec<String>,
}

impl FieldListDirective {
    pub fn new<I, S>(name: impl Into<String>, fields: I) -> Result<Self, FieldValueError>
            where I: IntoIterator<Item = S>, S: Into<String> {
        let name = name.into();
        validate_name(&name, DirectiveKind::FieldList)?;

        let mut directive = Self { name, fields: Vec::new() };
        for field in fields {
            directive.add_field(field)?;
        }
        Ok(directive)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), FieldValueError> {
        let name = name.into();
        validate_name(&name, DirectiveKind::FieldList)?;
        self.name = name;
        Ok(())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|existing| existing.eq_ignore_ascii_case(field))
    }

    /// Adds the field name, returning `false` if it was already present.
    pub fn add_field(&mut self, field: impl Into<String>) -> Result<bool, FieldValueError> {
        let field = field.into();
        validate_token(&field)?;

        if self.has_field(&field) {
            return Ok(false);
        }

        self.fields.push(field);
        Ok(true)
    }

    pub fn remove_field(&mut self, field: &str) -> bool {
        let length = self.fields.len();
        self.fields.retain(|existing| !existing.eq_ignore_ascii_case(field));
        self.fields.len() != length
    }
}

/// Any directive not reserved by the other kinds, with an optional argument
/// that is sent as a token when possible, and as a quoted-string otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneralDirective {
    name: String,
    value: Option<String>,
}

impl GeneralDirective {
    pub fn new(name: impl Into<String>, value: Option<String>) -> Result<Self, FieldValueError> {
        let name = name.into();
        validate_name(&name, DirectiveKind::General)?;
        if let Some(value) = &value {
            quoting::encode(value)?;
        }

        Ok(Self { name, value })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), FieldValueError> {
        let name = name.into();
        validate_name(&name, DirectiveKind::General)?;
        self.name = name;
        Ok(())
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_value(&mut self, value: Option<String>) -> Result<(), FieldValueError> {
        if let Some(value) = &value {
            quoting::encode(value)?;
        }
        self.value = value;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Directive {
    Valueless(ValuelessDirective),
    Integer(IntegerDirective),
    FieldList(FieldListDirective),
    General(GeneralDirective),
}

impl Directive {
    /// Parses a single `cache-directive`, picking the kind by its name.
    pub fn parse(input: &str) -> Result<Self, FieldValueError> {
        let (name, argument) = match input.split_once('=') {
            Some((name, argument)) => (name, Some(argument)),
            None => (input, None),
        };

        validate_token(name).map_err(|_| FieldValueError::InvalidDirective)?;

        match DirectiveKind::of(name) {
            DirectiveKind::FieldList => {
                let fields = match argument {
                    Some(argument) => {
                        let argument = decode_argument(argument)?;
                        FIELD_NAME_LIST.split(&argument)?
                            .into_iter()
                            .map(str::to_owned)
                            .collect()
                    }
                    None => Vec::new(),
                };
                FieldListDirective::new(name, fields).map(Self::FieldList)
            }
            DirectiveKind::Integer => {
                let argument = argument.ok_or(FieldValueError::DirectiveValueRequired)?;
                IntegerDirective::new(name, decode_argument(argument)?.into_owned()).map(Self::Integer)
            }
            DirectiveKind::Valueless => {
                if argument.is_some() {
                    return Err(FieldValueError::DirectiveValueNotAllowed);
                }
                ValuelessDirective::new(name).map(Self::Valueless)
            }
            DirectiveKind::General => {
                let value = argument
                    .map(|argument| decode_argument(argument).map(Cow::into_owned))
                    .transpose()?;
                GeneralDirective::new(name, value).map(Self::General)
            }
        }
    }

    pub fn kind(&self) -> DirectiveKind {
        match self {
            Self::Valueless(_) => DirectiveKind::Valueless,
            Self::Integer(_) => DirectiveKind::Integer,
            Self::FieldList(_) => DirectiveKind::FieldList,
            Self::General(_) => DirectiveKind::General,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Valueless(directive) => directive.name(),
            Self::Integer(directive) => directive.name(),
            Self::FieldList(directive) => directive.name(),
            Self::General(directive) => directive.name(),
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valueless(directive) => f.write_str(&directive.name),
            Self::Integer(directive) => write!(f, "{}={}", directive.name, directive.value),
            Self::FieldList(directive) => write!(f, "{}=\"{}\"", directive.name, directive.fields.join(", ")),
            Self::General(GeneralDirective { name, value: None }) => f.write_str(name),
            Self::General(GeneralDirective { name, value: Some(value) }) => {
                let value = quoting::encode(value).map_err(|_| fmt::Error)?;
                write!(f, "{name}={value}")
            }
        }
    }
}

impl FromStr for Directive {
    type Err = FieldValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<ValuelessDirective> for Directive {
    fn from(directive: ValuelessDirective) -> Self {
        Self::Valueless(directive)
    }
}

impl From<IntegerDirective> for Directive {
    fn from(directive: IntegerDirective) -> Self {
        Self::Integer(directive)
    }
}

impl From<FieldListDirective> for Directive {
    fn from(directive: FieldListDirective) -> Self {
        Self::FieldList(directive)
    }
}

impl From<GeneralDirective> for Directive {
    fn from(directive: GeneralDirective) -> Self {
        Self::General(directive)
    }
}

/// ```text
/// token / quoted-string
/// ```
fn decode_argument(argument: &str) -> Result<Cow<'_, str>, FieldValueError> {
    if argument.starts_with('"') {
        return quoting::decode(argument);
    }

    validate_token(argument).map_err(|_| FieldValueError::InvalidDirective)?;
    Ok(Cow::Borrowed(argument))
}

fn cache_directive_length(input: &str) -> Option<usize> {
    let name_length = token_length(input);
    if name_length == 0 {
        return None;
    }

    let Some(argument) = input[name_length..].strip_prefix('=') else {
        return Some(name_length);
    };

    let argument_length = if argument.starts_with('"') {
        quoting::quoted_string_length(argument)?
    } else {
        token_length(argument)
    };

    if argument_length == 0 {
        return None;
    }

    Some(name_length + 1 + argument_length)
}

/// The directives of a `Cache-Control` field, keyed case-insensitively by
/// name, in the order they were first set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheControl {
    directives: IndexMap<String, Directive>,
}

impl CacheControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the field value. A directive that occurs multiple times keeps
    /// the position of its first occurrence, and the value of its last.
    pub fn from_value(input: &str) -> Result<Self, FieldValueError> {
        let result = CACHE_DIRECTIVE_LIST.split(input)
            .and_then(|elements| {
                let mut cache_control = Self::new();
                for element in elements {
                    cache_control.set(Directive::parse(element)?);
                }
                Ok(cache_control)
            });

        match &result {
            Ok(_cache_control) => {
                #[cfg(feature = "debugging")]
                tracing::debug!(input, directives = _cache_control.len(), "parsed Cache-Control");
            }
            Err(error) => tracing::trace!(input, ?error, "rejected Cache-Control"),
        }

        result
    }

    pub fn get(&self, name: &str) -> Result<&Directive, FieldValueError> {
        self.directives.get(&name.to_ascii_lowercase())
            .ok_or(FieldValueError::DirectiveNotFound)
    }

    pub fn has(&self, name: &str) -> bool {
        self.directives.contains_key(&name.to_ascii_lowercase())
    }

    /// The argument of an integer directive, e.g. `max-age`.
    pub fn delta_seconds(&self, name: &str) -> Result<Option<u64>, FieldValueError> {
        match self.get(name)? {
            Directive::Integer(directive) => Ok(directive.as_u64()),
            _ => Err(FieldValueError::DirectiveNotFound),
        }
    }

    /// Sets the directive, replacing the one with the same name.
    pub fn set(&mut self, directive: impl Into<Directive>) {
        let directive = directive.into();
        self.directives.insert(directive.name().to_ascii_lowercase(), directive);
    }

    pub fn unset(&mut self, name: &str) -> bool {
        self.directives.shift_remove(&name.to_ascii_lowercase()).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Directive> {
        self.directives.values()
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// A `Cache-Control` field without directives can't be sent.
    pub fn is_valid(&self) -> bool {
        !self.is_empty()
    }

    pub fn to_value(&self) -> Result<String, FieldValueError> {
        if self.is_empty() {
            return Err(FieldValueError::EmptyCacheControl);
        }

        Ok(self.iter()
            .map(Directive::to_string)
            .collect::<Vec<_>>()
            .join(", "))
    }
}

impl FromStr for CacheControl {
    type Err = FieldValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_value(s)
    }
}
