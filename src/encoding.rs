//! Character sets for turning buffers into text and back.
//!
//! `base64` and `hex` are textual views of the raw bytes: decoding yields
//! the base64/hex rendering of the buffer, and encoding reads such a
//! rendering back into bytes.

use std::fmt;
use std::str::FromStr;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Layout files accept the same names as the command line, in any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Encoding {
    Ascii,
    #[default]
    Utf8,
    Utf16Le,
    Base64,
    Hex,
    Latin1,
}

impl Encoding {
    pub const ALL: [Encoding; 6] = [
        Encoding::Ascii,
        Encoding::Utf8,
        Encoding::Utf16Le,
        Encoding::Base64,
        Encoding::Hex,
        Encoding::Latin1,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Encoding::Ascii => "ascii",
            Encoding::Utf8 => "utf8",
            Encoding::Utf16Le => "utf16le",
            Encoding::Base64 => "base64",
            Encoding::Hex => "hex",
            Encoding::Latin1 => "latin1",
        }
    }
}

/// Decode `bytes` into text.
pub fn decode(bytes: &[u8], encoding: Encoding) -> Result<String, CodecError> {
    match encoding {
        Encoding::Ascii => {
            if let Some(pos) = bytes.iter().position(|b| !b.is_ascii()) {
                return Err(CodecError::encoding(
                    encoding,
                    format!("byte 0x{:02x} at offset {pos} is not ASCII", bytes[pos]),
                ));
            }
            Ok(bytes.iter().map(|&b| char::from(b)).collect())
        }
        Encoding::Utf8 => std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|e| CodecError::encoding(encoding, e.to_string())),
        Encoding::Utf16Le => {
            if bytes.len() % 2 != 0 {
                return Err(CodecError::encoding(
                    encoding,
                    format!("odd byte count {}", bytes.len()),
                ));
            }
            let units = bytes
                .chunks_exact(2)
                .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
            char::decode_utf16(units)
                .collect::<Result<String, _>>()
                .map_err(|e| CodecError::encoding(encoding, e.to_string()))
        }
        Encoding::Base64 => Ok(STANDARD.encode(bytes)),
        Encoding::Hex => Ok(hex::encode(bytes)),
        Encoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}

/// Encode `text` into bytes.
pub fn encode(text: &str, encoding: Encoding) -> Result<Vec<u8>, CodecError> {
    match encoding {
        Encoding::Ascii => {
            if let Some((pos, c)) = text.char_indices().find(|(_, c)| !c.is_ascii()) {
                return Err(CodecError::encoding(
                    encoding,
                    format!("character {c:?} at offset {pos} is not ASCII"),
                ));
            }
            Ok(text.as_bytes().to_vec())
        }
        Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
        Encoding::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
        Encoding::Base64 => STANDARD
            .decode(text)
            .map_err(|e| CodecError::encoding(encoding, e.to_string())),
        Encoding::Hex => hex::decode(text).map_err(|e| CodecError::encoding(encoding, e.to_string())),
        Encoding::Latin1 => text
            .char_indices()
            .map(|(pos, c)| {
                u8::try_from(c).map_err(|_| {
                    CodecError::encoding(
                        encoding,
                        format!("character {c:?} at offset {pos} is outside Latin-1"),
                    )
                })
            })
            .collect(),
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" => Ok(Encoding::Ascii),
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            "utf16le" | "utf-16le" | "utf16-le" | "ucs2" => Ok(Encoding::Utf16Le),
            "base64" => Ok(Encoding::Base64),
            "hex" => Ok(Encoding::Hex),
            "latin1" | "latin-1" | "binary" => Ok(Encoding::Latin1),
            other => {
                let known: Vec<&str> = Encoding::ALL.iter().map(|e| e.name()).collect();
                Err(format!(
                    "unknown encoding '{other}' (expected one of {})",
                    known.join(", ")
                ))
            }
        }
    }
}

impl TryFrom<String> for Encoding {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}
