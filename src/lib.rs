//! # fixedwidth-rs
//!
//! A codec for fixed-width positional text records.
//!
//! Many legacy systems (mainframe batch jobs, banking files, EDI feeds)
//! exchange data as lines in which every field owns a constant column
//! range. This library slices such lines into structured records and lays
//! structured records back out into byte-exact lines.
//!
//! ## Overview
//!
//! - **Schema**: an ordered list of named, fixed-width, typed columns
//! - **Parse**: bytes → text → lines → sliced, trimmed, cast fields → records
//! - **Stringify**: records → padded/truncated fields → lines → text → bytes
//! - **Records**: nested [`Value`] trees addressed by paths like `a.b[0].c`
//!
//! ## Example
//!
//! ```
//! use fixedwidth_rs::{
//!     DataType, FieldConfig, Mode, ParseOptions, StringifyOptions, Value, build_schema, parse,
//!     stringify,
//! };
//!
//! // Record layout: Id(4) Name(6)
//! let fields = vec![
//!     FieldConfig::new("id", 4).with_type(DataType::Integer),
//!     FieldConfig::new("name", 6),
//! ];
//!
//! let schema = build_schema(&fields, Mode::Parse).unwrap();
//! let records = parse(b"0042Alice \n0007Bob   \n", &schema, &ParseOptions::default()).unwrap();
//!
//! assert_eq!(records.len(), 2);
//! let id = "id".parse().unwrap();
//! assert_eq!(records[0].get_path(&id), Some(&Value::Integer(42)));
//!
//! let schema = build_schema(&fields, Mode::Stringify).unwrap();
//! let mut record = Value::map();
//! record.set_path(&id, Value::Integer(1));
//! record.set_path(&"name".parse().unwrap(), Value::from("Al"));
//!
//! let bytes = stringify(&[record], &schema, &StringifyOptions::default()).unwrap();
//! assert_eq!(bytes, b"1   Al    ");
//! ```

pub mod cast;
pub mod config;
pub mod encoding;
pub mod error;
pub mod pad;
pub mod parser;
pub mod path;
pub mod schema;
pub mod stringifier;
pub mod value;

pub use cast::{CastFn, DataType};
pub use config::Layout;
pub use encoding::Encoding;
pub use error::{CodecError, ConfigError, PathError, SchemaError};
pub use pad::{Alignment, TrimPolicy};
pub use parser::{ParseOptions, parse, parse_str};
pub use path::{PathSegment, PropertyPath};
pub use schema::{FieldConfig, FieldSpec, Mode, Schema, build_schema};
pub use stringifier::{StringifyOptions, stringify, stringify_to_string};
pub use value::Value;
