//! Property paths into structured records.
//!
//! A path such as `a.b[0].c` is a list of segments: map keys separated by
//! dots and sequence indices in brackets. The same segment walk serves both
//! directions: [`PropertyPath::get`] follows it read-only, and
//! [`PropertyPath::set`] follows it while creating missing containers.

use std::fmt;
use std::str::FromStr;

use crate::error::PathError;
use crate::value::Value;

/// Largest sequence index a path may name. Setting an index pads the
/// sequence with `Null` up to it, so the bound caps that allocation.
pub const MAX_INDEX: usize = 65_535;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// A parsed, non-empty property path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    segments: Vec<PathSegment>,
}

/// Where a segment lands in the container it is applied to.
enum Target {
    Key(String),
    Index(usize),
}

impl PropertyPath {
    pub fn parse(text: &str) -> Result<Self, PathError> {
        if text.is_empty() {
            return Err(PathError::Empty);
        }

        let mut segments = Vec::new();
        let mut rest = text;
        let mut offset = 0;

        while !rest.is_empty() {
            if let Some(inner) = rest.strip_prefix('[') {
                let close = inner
                    .find(']')
                    .ok_or(PathError::UnclosedBracket { offset })?;
                let digits = &inner[..close];
                let index = as_index(digits).ok_or_else(|| PathError::BadIndex {
                    offset,
                    text: digits.to_string(),
                })?;
                segments.push(PathSegment::Index(index));
                rest = &inner[close + 1..];
                offset += close + 2;
                continue;
            }

            if !segments.is_empty() {
                match rest.strip_prefix('.') {
                    Some(after) => {
                        rest = after;
                        offset += 1;
                    }
                    None => {
                        let found = rest.chars().next().unwrap_or('.');
                        return Err(PathError::Unexpected { offset, found });
                    }
                }
            }

            let end = rest.find(['.', '[', ']']).unwrap_or(rest.len());
            if end == 0 {
                return Err(PathError::EmptyKey { offset });
            }
            segments.push(PathSegment::Key(rest[..end].to_string()));
            rest = &rest[end..];
            offset += end;
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Value at this path, or `None` when any step is missing.
    pub fn get<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(root, |node, segment| match (node, segment) {
                (Value::Map(entries), PathSegment::Key(key)) => entries.get(key),
                (Value::Map(entries), PathSegment::Index(i)) => entries.get(&i.to_string()),
                (Value::Sequence(items), PathSegment::Index(i)) => items.get(*i),
                (Value::Sequence(items), PathSegment::Key(key)) => {
                    as_index(key).and_then(|i| items.get(i))
                }
                _ => None,
            })
    }

    /// Write `value` at this path, creating intermediate containers.
    ///
    /// Existing containers are reused. A scalar standing where a container is
    /// needed is replaced, and sequences grow with `Null` up to the index.
    pub fn set(&self, root: &mut Value, value: Value) {
        let mut node = root;
        for segment in &self.segments {
            node = slot(node, segment);
        }
        *node = value;
    }
}

fn target(node: &Value, segment: &PathSegment) -> Target {
    match (node, segment) {
        (Value::Map(_), PathSegment::Index(i)) => Target::Key(i.to_string()),
        (Value::Sequence(_), PathSegment::Key(key)) => match as_index(key) {
            Some(i) => Target::Index(i),
            None => Target::Key(key.clone()),
        },
        (_, PathSegment::Key(key)) => Target::Key(key.clone()),
        (_, PathSegment::Index(i)) => Target::Index(*i),
    }
}

fn slot<'a>(node: &'a mut Value, segment: &PathSegment) -> &'a mut Value {
    match target(node, segment) {
        Target::Index(i) => {
            if !matches!(node, Value::Sequence(_)) {
                *node = Value::Sequence(Vec::new());
            }
            match node {
                Value::Sequence(items) => {
                    if let Some(len) = i.checked_add(1)
                        && items.len() < len
                    {
                        items.resize(len, Value::Null);
                    }
                    &mut items[i]
                }
                other => other,
            }
        }
        Target::Key(key) => {
            if !matches!(node, Value::Map(_)) {
                *node = Value::map();
            }
            match node {
                Value::Map(entries) => entries.entry(key).or_default(),
                other => other,
            }
        }
    }
}

fn as_index(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok().filter(|&i| i <= MAX_INDEX)
}

impl FromStr for PropertyPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{key}")?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}
