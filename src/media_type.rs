//! Media type parsing and serialization.
//!
//! Implements a WHATWG-style "parse a MIME type" algorithm as a single
//! forward scan over raw bytes. Parsing is total: every byte sequence
//! produces a [`MediaType`], and syntactic failure is reported through
//! [`Validity`] rather than an error.

use crate::error::Error;
use crate::grammar::{
    is_http_quoted_string_byte, is_http_token_byte, is_http_whitespace_byte, is_token,
};
use crate::params::MimeParams;
use std::fmt::{self, Write as _};
use std::str::FromStr;

/// Outcome of a parse.
///
/// Parsing stops at the first failing stage, so the two invalid states are
/// mutually exclusive and never combine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validity {
    /// Both tokens parsed; parameters (if any) were extracted.
    Valid,
    /// The type token was empty, unterminated, or contained a non-token byte.
    InvalidType,
    /// The subtype token was empty or contained a non-token byte.
    InvalidSubtype,
}

impl Validity {
    /// Reports whether the parse succeeded.
    pub fn is_valid(self) -> bool {
        self == Validity::Valid
    }
}

/// Policy for parameters whose name repeats within one source string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicateParams {
    /// Keep the first occurrence of each name, drop the rest.
    #[default]
    KeepFirst,
    /// Keep every occurrence in source order.
    KeepAll,
}

/// Options controlling [`MediaType::parse_with`].
#[derive(Clone, Debug, Default)]
pub struct ParseOptions {
    /// How repeated parameter names are handled. Defaults to
    /// [`DuplicateParams::KeepFirst`].
    pub duplicates: DuplicateParams,
}

/// A parsed media type: `type/subtype` plus ordered parameters.
///
/// Constructed once by [`MediaType::parse`] and immutable afterwards.
/// Callers must check [`MediaType::is_valid`] before reading fields; on an
/// invalid result the accessors return empty values.
///
/// # Examples
///
/// ```
/// use whatwg_mime::MediaType;
///
/// let mime = MediaType::parse("TEXT/HTML; Charset=UTF-8");
/// assert!(mime.is_valid());
/// assert_eq!(mime.type_(), "text");
/// assert_eq!(mime.subtype(), "html");
/// assert_eq!(mime.params().get("charset"), Some("UTF-8"));
/// assert_eq!(mime.to_string(), "text/html;charset=UTF-8");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaType {
    type_: String,
    subtype: String,
    params: MimeParams,
    validity: Validity,
    invalid_offset: Option<usize>,
}

impl MediaType {
    /// Parses a media type from raw bytes with default options.
    ///
    /// Never fails and never panics; malformed input yields a value whose
    /// [`validity`](MediaType::validity) is not [`Validity::Valid`].
    ///
    /// # Examples
    ///
    /// ```
    /// use whatwg_mime::{MediaType, Validity};
    ///
    /// assert!(MediaType::parse("application/json").is_valid());
    /// assert_eq!(MediaType::parse("").validity(), Validity::InvalidType);
    /// assert_eq!(MediaType::parse("text/").validity(), Validity::InvalidSubtype);
    /// ```
    pub fn parse(source: impl AsRef<[u8]>) -> Self {
        Self::parse_with(source, &ParseOptions::default())
    }

    /// Parses a media type from raw bytes with explicit options.
    ///
    /// # Examples
    ///
    /// ```
    /// use whatwg_mime::{DuplicateParams, MediaType, ParseOptions};
    ///
    /// let opts = ParseOptions { duplicates: DuplicateParams::KeepAll };
    /// let mime = MediaType::parse_with("text/html;a=1;a=2", &opts);
    /// assert_eq!(mime.params().len(), 2);
    /// ```
    pub fn parse_with(source: impl AsRef<[u8]>, options: &ParseOptions) -> Self {
        parse_bytes(source.as_ref(), options)
    }

    /// The lowercased type token, or `""` if the parse failed.
    pub fn type_(&self) -> &str {
        &self.type_
    }

    /// The lowercased subtype token, or `""` if the parse failed.
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// The retained parameters, in source order.
    pub fn params(&self) -> &MimeParams {
        &self.params
    }

    /// The parse outcome.
    pub fn validity(&self) -> Validity {
        self.validity
    }

    /// Reports whether the parse succeeded.
    pub fn is_valid(&self) -> bool {
        self.validity.is_valid()
    }

    /// Byte offset of the first offending byte for an invalid result.
    ///
    /// Diagnostic only; `None` for valid results. When a stage fails without
    /// a specific bad byte (empty token, missing `/`), this is the cursor
    /// position at which the failure was declared.
    pub fn invalid_offset(&self) -> Option<usize> {
        self.invalid_offset
    }

    fn invalid(validity: Validity, offset: usize) -> Self {
        MediaType {
            type_: String::new(),
            subtype: String::new(),
            params: MimeParams::new(),
            validity,
            invalid_offset: Some(offset),
        }
    }
}

/// Serializes to the canonical form: `type/subtype` then `;name=value` for
/// each retained parameter, quoting values that are not bare tokens.
///
/// Invalid media types render as the empty string. This is a lossy one-way
/// canonicalization; source case, whitespace, and quoting are not preserved.
impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return Ok(());
        }
        write!(f, "{}/{}", self.type_, self.subtype)?;
        for (name, value) in &self.params {
            write!(f, ";{}=", name)?;
            if is_token(value.as_bytes()) {
                f.write_str(value)?;
            } else {
                f.write_char('"')?;
                for ch in value.chars() {
                    if ch == '"' || ch == '\\' {
                        f.write_char('\\')?;
                    }
                    f.write_char(ch)?;
                }
                f.write_char('"')?;
            }
        }
        Ok(())
    }
}

/// Strict entry point: parses and converts an invalid result into an
/// [`Error`] carrying the diagnostic byte offset.
impl FromStr for MediaType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let parsed = MediaType::parse(s);
        let offset = parsed.invalid_offset.unwrap_or(0);
        match parsed.validity {
            Validity::Valid => Ok(parsed),
            Validity::InvalidType => Err(Error::InvalidType(offset)),
            Validity::InvalidSubtype => Err(Error::InvalidSubtype(offset)),
        }
    }
}

impl TryFrom<&str> for MediaType {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Error> {
        s.parse()
    }
}

/// The scan proper. Two cursors (`left`, `right`) move strictly forward over
/// the byte sequence; nothing is ever re-read and no byte past `len` is
/// touched.
fn parse_bytes(bytes: &[u8], options: &ParseOptions) -> MediaType {
    let len = bytes.len();

    // Leading whitespace.
    let mut left = 0;
    while left < len && is_http_whitespace_byte(bytes[left]) {
        left += 1;
    }

    // Type token, up to '/'. A non-token byte poisons the token but the
    // scan still runs on to locate the slash.
    let mut right = left;
    let mut first_bad: Option<usize> = None;
    while right < len && bytes[right] != b'/' {
        if first_bad.is_none() && !is_http_token_byte(bytes[right]) {
            first_bad = Some(right);
        }
        right += 1;
    }
    if right == len || right == left || first_bad.is_some() {
        return MediaType::invalid(Validity::InvalidType, first_bad.unwrap_or(right));
    }
    let type_ = ascii_lowered(&bytes[left..right]);

    // Subtype token, up to ';' or end, with trailing whitespace trimmed.
    left = right + 1;
    right = left;
    first_bad = None;
    while right < len && bytes[right] != b';' {
        if first_bad.is_none() && !is_http_token_byte(bytes[right]) {
            first_bad = Some(right);
        }
        right += 1;
    }
    let mut end = right;
    while end > left && is_http_whitespace_byte(bytes[end - 1]) {
        end -= 1;
    }
    // A bad byte inside the trimmed trailing whitespace is harmless.
    if let Some(pos) = first_bad {
        if pos < end {
            return MediaType::invalid(Validity::InvalidSubtype, pos);
        }
    }
    if end == left {
        return MediaType::invalid(Validity::InvalidSubtype, end);
    }
    let subtype = ascii_lowered(&bytes[left..end]);

    // Parameters. Rejected pairs are dropped without affecting validity.
    let mut params = MimeParams::new();
    while right < len {
        // right sits on ';'
        left = right + 1;
        while left < len && is_http_whitespace_byte(bytes[left]) {
            left += 1;
        }

        // Parameter name, up to ';' or '='. A non-token byte only blocks
        // the lowercase fold.
        right = left;
        let mut name_bad = false;
        while right < len && bytes[right] != b';' && bytes[right] != b'=' {
            if !is_http_token_byte(bytes[right]) {
                name_bad = true;
            }
            right += 1;
        }
        if right == len || bytes[right] == b';' {
            // Name with no '=' is discarded.
            continue;
        }
        let name_bytes = &bytes[left..right];

        // Value, after '='.
        left = right + 1;
        let mut value: Vec<u8> = Vec::new();
        let mut value_bad = false;
        if left < len && bytes[left] == b'"' {
            // Quoted value. Out-of-class bytes mark the value invalid but
            // never stop the copy.
            right = left + 1;
            loop {
                while right < len && bytes[right] != b'"' && bytes[right] != b'\\' {
                    if !is_http_quoted_string_byte(bytes[right]) {
                        value_bad = true;
                    }
                    value.push(bytes[right]);
                    right += 1;
                }
                if right < len && bytes[right] == b'\\' {
                    right += 1;
                    if right < len {
                        if !is_http_quoted_string_byte(bytes[right]) {
                            value_bad = true;
                        }
                        value.push(bytes[right]);
                        right += 1;
                    } else {
                        // Lone trailing backslash is kept verbatim.
                        value.push(b'\\');
                        break;
                    }
                } else {
                    break;
                }
            }
            // Whatever trails the closing quote is skipped up to the
            // next ';'.
            while right < len && bytes[right] != b';' {
                right += 1;
            }
        } else {
            // Unquoted value, up to ';' or end, trailing whitespace trimmed.
            right = left;
            while right < len && bytes[right] != b';' {
                if !is_http_quoted_string_byte(bytes[right]) {
                    value_bad = true;
                }
                right += 1;
            }
            let mut vend = right;
            while vend > left && is_http_whitespace_byte(bytes[vend - 1]) {
                vend -= 1;
            }
            value.extend_from_slice(&bytes[left..vend]);
        }

        if name_bytes.is_empty() || value.is_empty() || value_bad {
            continue;
        }
        // Names and values must decode as UTF-8 to be retained.
        let Ok(name) = std::str::from_utf8(name_bytes) else {
            continue;
        };
        let Ok(value) = String::from_utf8(value) else {
            continue;
        };
        let mut name = name.to_owned();
        if !name_bad {
            name.make_ascii_lowercase();
        }
        match options.duplicates {
            DuplicateParams::KeepFirst => {
                if !params.has(&name) {
                    params.push(name, value);
                }
            }
            DuplicateParams::KeepAll => params.push(name, value),
        }
    }

    MediaType {
        type_,
        subtype,
        params,
        validity: Validity::Valid,
        invalid_offset: None,
    }
}

fn ascii_lowered(bytes: &[u8]) -> String {
    // Token-validated input is pure ASCII, so the lossy conversion is exact.
    let mut s = String::from_utf8_lossy(bytes).into_owned();
    s.make_ascii_lowercase();
    s
}
