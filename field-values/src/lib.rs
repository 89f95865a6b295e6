// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! This crate parses HTTP field values into strongly validated types and
//! serializes them back into their canonical wire form.
//!
//! Every parser is total: it either returns a fully valid value, or a
//! [`FieldValueError`].
//!
//! # References
//! * [RFC 9110 HTTP Semantics](https://www.rfc-editor.org/rfc/rfc9110.html)
//! * [RFC 9111 HTTP Caching](https://www.rfc-editor.org/rfc/rfc9111.html)
//! * [RFC 6266 Content-Disposition](https://www.rfc-editor.org/rfc/rfc6266.html)
//! * [RFC 8187 Indicating Character Encoding and Language for HTTP Header Field Parameters](https://www.rfc-editor.org/rfc/rfc8187.html)

pub mod abnf;
pub mod cache_control;
pub mod charset;
pub mod conditional;
pub mod content_disposition;
pub mod date;
pub mod entity_tag;
pub mod error;
pub mod lists;
pub mod quoting;
pub mod range;
pub mod syntax;
pub mod transliterate;

pub use cache_control::*;
pub use charset::Charset;
pub use conditional::*;
pub use content_disposition::*;
pub use date::HttpDate;
pub use entity_tag::*;
pub use error::*;
pub use lists::ListGrammar;
pub use range::*;
pub use transliterate::{LatinFolding, Transliterate};
