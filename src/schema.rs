//! Schema model: an ordered list of fixed-width columns.
//!
//! Column offsets follow purely from field order and widths; the first field
//! starts at 0 and each subsequent field starts where the previous one ends.
//!
//! ```
//! use fixedwidth_rs::{DataType, FieldConfig, Mode, build_schema};
//!
//! let schema = build_schema(
//!     &[
//!         FieldConfig::new("id", 4).with_type(DataType::Integer),
//!         FieldConfig::new("name", 6),
//!     ],
//!     Mode::Parse,
//! )
//! .unwrap();
//!
//! assert_eq!(schema.total_width(), 10);
//! assert_eq!(schema.offsets().collect::<Vec<_>>(), vec![0, 4]);
//! ```

use serde::{Deserialize, Serialize};

use crate::cast::{CastFn, DataType};
use crate::error::SchemaError;
use crate::pad::Alignment;
use crate::path::PropertyPath;
use crate::value::Value;

/// Raw field configuration as supplied by a caller or a layout file.
///
/// Width is signed so that a negative value surfaces as a schema error
/// rather than a deserialization failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    #[serde(default, alias = "propertyPath", alias = "property")]
    pub path: String,
    pub width: i64,
    #[serde(
        default,
        rename = "type",
        alias = "dataType",
        skip_serializing_if = "Option::is_none"
    )]
    pub data_type: Option<DataType>,
    #[serde(
        default,
        rename = "align",
        alias = "alignment",
        skip_serializing_if = "Option::is_none"
    )]
    pub alignment: Option<Alignment>,
}

impl FieldConfig {
    pub fn new(path: impl Into<String>, width: i64) -> Self {
        Self {
            path: path.into(),
            width,
            data_type: None,
            alignment: None,
        }
    }

    pub fn with_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }
}

/// Direction a schema is built for.
///
/// Parse mode honors each field's data type and ignores alignment; stringify
/// mode honors alignment and ignores the data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Parse,
    Stringify,
}

/// One validated column.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub path: PropertyPath,
    pub width: usize,
    pub data_type: DataType,
    pub alignment: Alignment,
    cast: CastFn,
}

impl FieldSpec {
    /// Apply this field's cast to an already trimmed slice.
    pub fn cast(&self, text: &str) -> Value {
        (self.cast)(text)
    }
}

/// Immutable, ordered column layout. Safe to share across threads.
#[derive(Debug, Clone)]
pub struct Schema {
    mode: Mode,
    fields: Vec<FieldSpec>,
    total_width: usize,
}

impl Schema {
    pub fn build(configs: &[FieldConfig], mode: Mode) -> Result<Self, SchemaError> {
        let fields = configs
            .iter()
            .enumerate()
            .map(|(index, config)| build_field(index, config, mode))
            .collect::<Result<Vec<_>, _>>()?;
        let total_width = fields.iter().map(|f| f.width).sum();

        Ok(Self {
            mode,
            fields,
            total_width,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Length of every well-formed line.
    pub fn total_width(&self) -> usize {
        self.total_width
    }

    /// Starting column of each field, in schema order.
    pub fn offsets(&self) -> impl Iterator<Item = usize> + '_ {
        self.fields.iter().scan(0, |offset, field| {
            let start = *offset;
            *offset += field.width;
            Some(start)
        })
    }
}

fn build_field(index: usize, config: &FieldConfig, mode: Mode) -> Result<FieldSpec, SchemaError> {
    let width = usize::try_from(config.width).map_err(|_| SchemaError::NegativeWidth {
        index,
        width: config.width,
    })?;

    if config.path.is_empty() {
        return Err(SchemaError::EmptyPath { index });
    }
    let path = PropertyPath::parse(&config.path).map_err(|e| SchemaError::InvalidPath {
        index,
        path: config.path.clone(),
        reason: e.to_string(),
    })?;

    let (data_type, alignment) = match mode {
        Mode::Parse => (config.data_type.unwrap_or_default(), Alignment::Left),
        Mode::Stringify => (DataType::String, config.alignment.unwrap_or_default()),
    };

    Ok(FieldSpec {
        path,
        width,
        data_type,
        alignment,
        cast: data_type.cast_fn(),
    })
}

/// Build a schema from raw field configuration.
pub fn build_schema(configs: &[FieldConfig], mode: Mode) -> Result<Schema, SchemaError> {
    Schema::build(configs, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configs() -> Vec<FieldConfig> {
        vec![
            FieldConfig::new("id", 4)
                .with_type(DataType::Integer)
                .with_alignment(Alignment::Right),
            FieldConfig::new("name.first", 6),
            FieldConfig::new("flags[0]", 1).with_type(DataType::Boolean),
        ]
    }

    #[test]
    fn test_offsets_and_total_width() {
        let schema = build_schema(&configs(), Mode::Parse).unwrap();
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.total_width(), 11);
        assert_eq!(schema.offsets().collect::<Vec<_>>(), vec![0, 4, 10]);
    }

    #[test]
    fn test_parse_mode_attaches_cast() {
        let schema = build_schema(&configs(), Mode::Parse).unwrap();
        let id = &schema.fields()[0];
        assert_eq!(id.data_type, DataType::Integer);
        assert_eq!(id.alignment, Alignment::Left);
        assert_eq!(id.cast("0042"), Value::Integer(42));
        assert_eq!(schema.fields()[1].cast("Ada"), Value::from("Ada"));
        assert_eq!(schema.fields()[2].cast(""), Value::Bool(false));
    }

    #[test]
    fn test_stringify_mode_attaches_alignment() {
        let schema = build_schema(&configs(), Mode::Stringify).unwrap();
        assert_eq!(schema.mode(), Mode::Stringify);
        assert_eq!(schema.fields()[0].alignment, Alignment::Right);
        assert_eq!(schema.fields()[1].alignment, Alignment::Left);
        assert_eq!(schema.fields()[0].data_type, DataType::String);
    }

    #[test]
    fn test_negative_width_rejected() {
        let err = build_schema(
            &[FieldConfig::new("a", 2), FieldConfig::new("b", -1)],
            Mode::Parse,
        )
        .unwrap_err();
        assert_eq!(err, SchemaError::NegativeWidth { index: 1, width: -1 });
    }

    #[test]
    fn test_zero_width_allowed() {
        let schema = build_schema(&[FieldConfig::new("gap", 0)], Mode::Parse).unwrap();
        assert_eq!(schema.total_width(), 0);
        assert!(!schema.is_empty());
    }

    #[test]
    fn test_no_fields() {
        let schema = build_schema(&[], Mode::Stringify).unwrap();
        assert!(schema.is_empty());
        assert_eq!(schema.total_width(), 0);
    }

    #[test]
    fn test_empty_path_rejected() {
        let err = build_schema(&[FieldConfig::new("", 3)], Mode::Stringify).unwrap_err();
        assert_eq!(err, SchemaError::EmptyPath { index: 0 });
    }

    #[test]
    fn test_malformed_path_rejected() {
        let err = build_schema(&[FieldConfig::new("a[x]", 3)], Mode::Parse).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPath { index: 0, .. }));
    }

    #[test]
    fn test_oversized_index_rejected() {
        let err = build_schema(
            &[
                FieldConfig::new("ok[3]", 1),
                FieldConfig::new("rows[18446744073709551615]", 1),
            ],
            Mode::Parse,
        )
        .unwrap_err();
        match err {
            SchemaError::InvalidPath { index, path, .. } => {
                assert_eq!(index, 1);
                assert_eq!(path, "rows[18446744073709551615]");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_config_json() {
        let configs: Vec<FieldConfig> = serde_json::from_str(
            r#"[
                {"path": "id", "width": 4, "type": "integer", "align": "right"},
                {"propertyPath": "name", "width": 6, "dataType": "string", "alignment": "left"}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            configs[0],
            FieldConfig::new("id", 4)
                .with_type(DataType::Integer)
                .with_alignment(Alignment::Right)
        );
        assert_eq!(configs[1].path, "name");
        assert_eq!(configs[1].alignment, Some(Alignment::Left));
    }

    #[test]
    fn test_schema_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Schema>();
    }
}
