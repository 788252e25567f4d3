//! Parser: fixed-width text to structured records.
//!
//! Each line is checked against the schema's total width, sliced at the
//! column offsets, trimmed of the pad character, cast per field, and written
//! into a fresh record at each field's property path.

use std::borrow::Cow;

use crate::encoding::{self, Encoding};
use crate::error::CodecError;
use crate::pad::{TrimPolicy, char_len, pad_end, trim, truncate};
use crate::schema::Schema;
use crate::value::Value;

/// Per-call parse options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub encoding: Encoding,
    pub line_terminator: String,
    pub trim: TrimPolicy,
    pub pad_char: char,
    /// Pad short lines and cut long ones instead of failing.
    pub relaxed: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            encoding: Encoding::Utf8,
            line_terminator: "\n".to_string(),
            trim: TrimPolicy::Both,
            pad_char: ' ',
            relaxed: false,
        }
    }
}

/// Decode `bytes` and parse every line into a record.
///
/// Fails as a whole: on error no records are returned.
pub fn parse(bytes: &[u8], schema: &Schema, options: &ParseOptions) -> Result<Vec<Value>, CodecError> {
    let text = encoding::decode(bytes, options.encoding)?;
    parse_str(&text, schema, options)
}

/// Parse already decoded text.
pub fn parse_str(text: &str, schema: &Schema, options: &ParseOptions) -> Result<Vec<Value>, CodecError> {
    split_lines(text, &options.line_terminator)?
        .into_iter()
        .enumerate()
        .map(|(index, line)| parse_line(line, index, schema, options))
        .collect()
}

/// Split on `terminator`, treating a single trailing terminator as a
/// separator rather than the start of an empty final line.
pub fn split_lines<'a>(text: &'a str, terminator: &str) -> Result<Vec<&'a str>, CodecError> {
    if terminator.is_empty() {
        return Err(CodecError::InvalidOption(
            "line terminator must not be empty".to_string(),
        ));
    }
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let body = text.strip_suffix(terminator).unwrap_or(text);
    Ok(body.split(terminator).collect())
}

/// Cut a line into one slice per field, in schema order.
///
/// A line shorter than the schema yields short (possibly empty) trailing
/// slices; characters past the total width are ignored.
pub fn slice_line<'a>(line: &'a str, schema: &Schema) -> Vec<&'a str> {
    let mut rest = line;
    schema
        .fields()
        .iter()
        .map(|field| {
            let head = truncate(rest, field.width);
            rest = &rest[head.len()..];
            head
        })
        .collect()
}

/// Parse one line; `index` is its 0-based position, reported on mismatch.
pub fn parse_line(
    line: &str,
    index: usize,
    schema: &Schema,
    options: &ParseOptions,
) -> Result<Value, CodecError> {
    let expected = schema.total_width();
    let actual = char_len(line);

    let line = if actual == expected {
        Cow::Borrowed(line)
    } else if !options.relaxed {
        return Err(CodecError::LengthMismatch {
            line: index,
            expected,
            actual,
        });
    } else if actual < expected {
        Cow::Owned(pad_end(line, expected, options.pad_char))
    } else {
        Cow::Borrowed(truncate(line, expected))
    };

    let mut record = Value::map();
    for (field, slice) in schema.fields().iter().zip(slice_line(&line, schema)) {
        let text = trim(slice, options.trim, options.pad_char);
        record.set_path(&field.path, field.cast(text));
    }
    Ok(record)
}
