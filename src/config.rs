//! Layout files: a field list plus default codec options, stored as JSON.
//!
//! ```json
//! {
//!   "fields": [
//!     { "path": "id", "width": 4, "type": "integer", "align": "right" },
//!     { "path": "name", "width": 6 }
//!   ],
//!   "encoding": "latin1",
//!   "lineTerminator": "\r\n",
//!   "padChar": " ",
//!   "trim": "both",
//!   "relaxed": false,
//!   "trailingTerminator": true
//! }
//! ```
//!
//! Every key except `fields` is optional and falls back to the defaults of
//! [`ParseOptions`] and [`StringifyOptions`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::encoding::Encoding;
use crate::error::{ConfigError, SchemaError};
use crate::pad::TrimPolicy;
use crate::parser::ParseOptions;
use crate::schema::{FieldConfig, Mode, Schema};
use crate::stringifier::StringifyOptions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub fields: Vec<FieldConfig>,
    #[serde(default)]
    pub encoding: Encoding,
    #[serde(default = "default_line_terminator")]
    pub line_terminator: String,
    #[serde(default = "default_pad_char")]
    pub pad_char: char,
    #[serde(default)]
    pub trim: TrimPolicy,
    #[serde(default)]
    pub relaxed: bool,
    #[serde(default)]
    pub trailing_terminator: bool,
}

fn default_line_terminator() -> String {
    "\n".to_string()
}

fn default_pad_char() -> char {
    ' '
}

impl Layout {
    /// A layout with default options.
    pub fn new(fields: Vec<FieldConfig>) -> Self {
        Self {
            fields,
            encoding: Encoding::default(),
            line_terminator: default_line_terminator(),
            pad_char: default_pad_char(),
            trim: TrimPolicy::default(),
            relaxed: false,
            trailing_terminator: false,
        }
    }

    /// Read and deserialize a layout file. Fields are not validated until
    /// [`Layout::schema`] is called.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn schema(&self, mode: Mode) -> Result<Schema, SchemaError> {
        Schema::build(&self.fields, mode)
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            encoding: self.encoding,
            line_terminator: self.line_terminator.clone(),
            trim: self.trim,
            pad_char: self.pad_char,
            relaxed: self.relaxed,
        }
    }

    pub fn stringify_options(&self) -> StringifyOptions {
        StringifyOptions {
            encoding: self.encoding,
            line_terminator: self.line_terminator.clone(),
            pad_char: self.pad_char,
            trim: self.trim,
            trailing_terminator: self.trailing_terminator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cast::DataType;
    use crate::pad::Alignment;

    #[test]
    fn test_defaults() {
        let layout = Layout::from_json(r#"{"fields":[{"path":"id","width":4}]}"#).unwrap();
        assert_eq!(layout, Layout::new(vec![FieldConfig::new("id", 4)]));
        assert_eq!(layout.parse_options(), ParseOptions::default());
        assert_eq!(layout.stringify_options(), StringifyOptions::default());
    }

    #[test]
    fn test_full_layout() {
        let layout = Layout::from_json(
            r#"{
                "fields": [
                    {"path": "id", "width": 4, "type": "integer", "align": "right"},
                    {"path": "name", "width": 6}
                ],
                "encoding": "latin1",
                "lineTerminator": "\r\n",
                "padChar": "0",
                "trim": "left",
                "relaxed": true,
                "trailingTerminator": true
            }"#,
        )
        .unwrap();

        let parse = layout.parse_options();
        assert_eq!(parse.encoding, Encoding::Latin1);
        assert_eq!(parse.line_terminator, "\r\n");
        assert_eq!(parse.pad_char, '0');
        assert_eq!(parse.trim, TrimPolicy::Left);
        assert!(parse.relaxed);
        assert!(layout.stringify_options().trailing_terminator);

        let schema = layout.schema(Mode::Parse).unwrap();
        assert_eq!(schema.fields()[0].data_type, DataType::Integer);
        let schema = layout.schema(Mode::Stringify).unwrap();
        assert_eq!(schema.fields()[0].alignment, Alignment::Right);
    }

    #[test]
    fn test_names_match_command_line_spelling() {
        let layout = Layout::from_json(
            r#"{
                "fields": [{"path": "qty", "width": 5, "type": "INT", "align": "End"}],
                "encoding": "UTF-8",
                "trim": "Start"
            }"#,
        )
        .unwrap();
        assert_eq!(layout.encoding, Encoding::Utf8);
        assert_eq!(layout.trim, TrimPolicy::Left);
        assert_eq!(layout.fields[0].data_type, Some(DataType::Integer));
        assert_eq!(layout.fields[0].alignment, Some(Alignment::Right));

        let err = Layout::from_json(r#"{"fields":[],"encoding":"ebcdic"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown encoding 'ebcdic'"), "{err}");
    }

    #[test]
    fn test_pad_char_must_be_one_character() {
        assert!(Layout::from_json(r#"{"fields":[],"padChar":"ab"}"#).is_err());
    }

    #[test]
    fn test_negative_width_reaches_schema() {
        let layout = Layout::from_json(r#"{"fields":[{"path":"x","width":-3}]}"#).unwrap();
        assert_eq!(
            layout.schema(Mode::Parse).unwrap_err(),
            SchemaError::NegativeWidth { index: 0, width: -3 }
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.json");
        fs::write(&path, r#"{"fields":[{"path":"order.id","width":8}],"encoding":"ascii"}"#)
            .unwrap();

        let layout = Layout::load(&path).unwrap();
        assert_eq!(layout.encoding, Encoding::Ascii);
        assert_eq!(layout.schema(Mode::Parse).unwrap().total_width(), 8);
    }

    #[test]
    fn test_load_errors_carry_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = Layout::load(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        let err = Layout::load(&broken).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
        assert!(err.to_string().contains("broken.json"));
    }
}
