//! Stringifier: structured records to fixed-width text.
//!
//! Every output line is exactly the schema's total width. Values longer than
//! their column are cut from the tail; shorter ones are padded on the side
//! opposite the field's alignment.

use crate::encoding::{self, Encoding};
use crate::error::CodecError;
use crate::pad::{Alignment, TrimPolicy, fit};
use crate::schema::Schema;
use crate::value::Value;

/// Per-call stringify options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringifyOptions {
    pub encoding: Encoding,
    pub line_terminator: String,
    pub pad_char: char,
    /// Accepted for symmetry with [`ParseOptions`](crate::ParseOptions); unused when writing.
    pub trim: TrimPolicy,
    pub trailing_terminator: bool,
}

impl Default for StringifyOptions {
    fn default() -> Self {
        Self {
            encoding: Encoding::Utf8,
            line_terminator: "\n".to_string(),
            pad_char: ' ',
            trim: TrimPolicy::Both,
            trailing_terminator: false,
        }
    }
}

/// Lay out every record and encode the result.
pub fn stringify(
    records: &[Value],
    schema: &Schema,
    options: &StringifyOptions,
) -> Result<Vec<u8>, CodecError> {
    let text = stringify_to_string(records, schema, options)?;
    encoding::encode(&text, options.encoding)
}

/// Lay out every record as text, one line per record.
pub fn stringify_to_string(
    records: &[Value],
    schema: &Schema,
    options: &StringifyOptions,
) -> Result<String, CodecError> {
    if options.line_terminator.is_empty() {
        return Err(CodecError::InvalidOption(
            "line terminator must not be empty".to_string(),
        ));
    }

    let lines: Vec<String> = records
        .iter()
        .map(|record| format_record(record, schema, options.pad_char))
        .collect();
    let mut text = lines.join(options.line_terminator.as_str());
    if options.trailing_terminator {
        text.push_str(&options.line_terminator);
    }
    Ok(text)
}

/// One fixed-width line for `record`. Missing paths become blank columns.
pub fn format_record(record: &Value, schema: &Schema, pad: char) -> String {
    let mut line = String::with_capacity(schema.total_width());
    for field in schema.fields() {
        let text = match field.path.get(record) {
            Some(value) => format_field(value, field.width, field.alignment, pad),
            None => fit("", field.width, field.alignment, pad),
        };
        line.push_str(&text);
    }
    line
}

pub fn format_field(value: &Value, width: usize, alignment: Alignment, pad: char) -> String {
    fit(&value.to_text(), width, alignment, pad)
}
