//! Pad, trim, and truncate primitives over an arbitrary pad character.
//!
//! All lengths are counted in `char`s, never bytes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which edges of a parsed slice lose their run of pad characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum TrimPolicy {
    None,
    Left,
    Right,
    #[default]
    Both,
}

/// Edge of the column a stringified value sits against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Strip the maximal run of `pad` from the sides named by `policy`.
pub fn trim(text: &str, policy: TrimPolicy, pad: char) -> &str {
    match policy {
        TrimPolicy::None => text,
        TrimPolicy::Left => text.trim_start_matches(pad),
        TrimPolicy::Right => text.trim_end_matches(pad),
        TrimPolicy::Both => text.trim_matches(pad),
    }
}

/// The first `width` characters of `text`.
pub fn truncate(text: &str, width: usize) -> &str {
    match text.char_indices().nth(width) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Append `pad` until `text` is `width` characters long.
pub fn pad_end(text: &str, width: usize, pad: char) -> String {
    let mut out = String::with_capacity(text.len() + width);
    out.push_str(text);
    out.extend(std::iter::repeat_n(pad, width.saturating_sub(char_len(text))));
    out
}

/// Prepend `pad` until `text` is `width` characters long.
pub fn pad_start(text: &str, width: usize, pad: char) -> String {
    let mut out = String::with_capacity(text.len() + width);
    out.extend(std::iter::repeat_n(pad, width.saturating_sub(char_len(text))));
    out.push_str(text);
    out
}

/// Exactly `width` characters: truncated from the tail when too long,
/// padded on the side opposite `alignment` when too short.
pub fn fit(text: &str, width: usize, alignment: Alignment, pad: char) -> String {
    let text = truncate(text, width);
    match alignment {
        Alignment::Left => pad_end(text, width, pad),
        Alignment::Right => pad_start(text, width, pad),
    }
}

impl FromStr for TrimPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(TrimPolicy::None),
            "left" | "start" => Ok(TrimPolicy::Left),
            "right" | "end" => Ok(TrimPolicy::Right),
            "both" => Ok(TrimPolicy::Both),
            other => Err(format!(
                "unknown trim policy '{other}' (expected none, left, right, both)"
            )),
        }
    }
}

impl fmt::Display for TrimPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TrimPolicy::None => "none",
            TrimPolicy::Left => "left",
            TrimPolicy::Right => "right",
            TrimPolicy::Both => "both",
        })
    }
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" | "start" => Ok(Alignment::Left),
            "right" | "end" => Ok(Alignment::Right),
            other => Err(format!(
                "unknown alignment '{other}' (expected left or right)"
            )),
        }
    }
}

impl TryFrom<String> for TrimPolicy {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl TryFrom<String> for Alignment {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}
