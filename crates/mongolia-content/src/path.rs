//! Relative node paths.
//!
//! A path is a `/`-separated list of segments. A segment is either `.`,
//! `..`, or a node name with an optional same-name-sibling index, e.g.
//! `items[2]`. Indices are 1-based and `items` is the same as `items[1]`.

use crate::error::{Result, StoreError};

/// One step of a [`NodePath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// `.`
    Current,
    /// `..`
    Parent,
    /// A named child, 1-based index among siblings with the same name.
    Child { name: String, index: usize },
}

/// A parsed node path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePath {
    /// Resolve from the store root instead of the given node.
    pub absolute: bool,
    pub segments: Vec<Segment>,
}

impl NodePath {
    /// Parse a path. The empty string is the node itself.
    pub fn parse(path: &str) -> Result<Self> {
        let absolute = path.starts_with('/');
        let mut segments = Vec::new();

        for raw in path.split('/') {
            match raw {
                "" => continue,
                "." => segments.push(Segment::Current),
                ".." => segments.push(Segment::Parent),
                _ => segments.push(parse_child(path, raw)?),
            }
        }

        Ok(Self { absolute, segments })
    }

    /// Split off the last segment, which must be a child name.
    pub fn split_last(&self) -> Option<(NodePath, &str)> {
        match self.segments.last() {
            Some(Segment::Child { name, .. }) => {
                let parent = NodePath {
                    absolute: self.absolute,
                    segments: self.segments[..self.segments.len() - 1].to_vec(),
                };
                Some((parent, name.as_str()))
            }
            _ => None,
        }
    }

    /// True when the path names the starting node itself.
    pub fn is_empty(&self) -> bool {
        !self.absolute && self.segments.iter().all(|s| *s == Segment::Current)
    }
}

fn parse_child(path: &str, raw: &str) -> Result<Segment> {
    let invalid = |reason: &str| StoreError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    let (name, index) = match raw.find('[') {
        Some(open) => {
            let close = raw.strip_suffix(']').ok_or_else(|| invalid("unterminated index"))?;
            let index: usize = close[open + 1..]
                .parse()
                .map_err(|_| invalid("index is not a number"))?;
            if index == 0 {
                return Err(invalid("indices start at 1"));
            }
            (&raw[..open], index)
        }
        None => (raw, 1),
    };

    validate_name(name).map_err(|_| invalid("bad segment name"))?;
    Ok(Segment::Child {
        name: name.to_string(),
        index,
    })
}

/// Check that a string can be used as a node or property name.
pub fn validate_name(name: &str) -> Result<()> {
    let reserved = ['/', '[', ']', '*', '|'];
    if name.is_empty() || name == "." || name == ".." || name.contains(reserved) {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}
