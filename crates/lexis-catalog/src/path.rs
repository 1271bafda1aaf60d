//! Key-path parsing
//!
//! A key such as `menu.items[2].label` is split on `.` into segments. A
//! segment may end in one `name[index]` group; the name part may be empty,
//! in which case the index applies to the current array (`rows.[0]`).
//!
//! Parsing is total. Malformed pieces degrade into steps that simply fail to
//! match during navigation:
//!
//! | Input segment | Parsed as |
//! |---------------|-----------|
//! | `name` | property `name` |
//! | `name[3]` | element 3 of property `name` |
//! | `[3]` | element 3 of the current node |
//! | `name[x]` | property `name` (index ignored) |
//! | `[x]` | property `""` |
//! | `name[-1]` | element that never exists |
//! | `name[99999999999999999999]` | element that never exists |
//! | `name[1][2]` | element 1 of `name` (later groups ignored) |

use std::fmt;

/// One navigation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Look up a property of the current object.
    Property(String),
    /// Look up `name` (skipped when empty), then element `index` of the
    /// resulting array.
    Element {
        /// Property holding the array; empty for the current node.
        name: String,
        /// Zero-based position. Negative or oversized literals map to
        /// `usize::MAX`, which no array can contain.
        index: usize,
    },
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property(name) => f.write_str(name),
            Self::Element { name, index } => write!(f, "{name}[{index}]"),
        }
    }
}

/// Ordered sequence of [`Segment`]s parsed from a key string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyPath {
    segments: Vec<Segment>,
}

impl KeyPath {
    /// Parse a key string. Never fails.
    #[must_use]
    pub fn parse(key: &str) -> Self {
        let segments = key.split('.').map(parse_segment).collect();
        Self { segments }
    }

    /// The parsed segments, in order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate over the segments.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }
}

impl<'a> IntoIterator for &'a KeyPath {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Parse a key string into a [`KeyPath`].
#[must_use]
pub fn parse(key: &str) -> KeyPath {
    KeyPath::parse(key)
}

fn parse_segment(raw: &str) -> Segment {
    let Some(open) = raw.find('[') else {
        return Segment::Property(raw.to_string());
    };
    let Some(len) = raw[open + 1..].find(']') else {
        return Segment::Property(raw.to_string());
    };

    let name = raw[..open].to_string();
    match parse_index(raw[open + 1..open + 1 + len].trim()) {
        Some(index) => Segment::Element { name, index },
        None => Segment::Property(name),
    }
}

// An integer literal that does not fit a `usize` still counts as an index.
fn parse_index(text: &str) -> Option<usize> {
    let digits = text.strip_prefix(|c| c == '-' || c == '+').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(text.parse().unwrap_or(usize::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn prop(name: &str) -> Segment {
        Segment::Property(name.to_string())
    }

    fn elem(name: &str, index: usize) -> Segment {
        Segment::Element {
            name: name.to_string(),
            index,
        }
    }

    #[test]
    fn test_plain_dotted_path() {
        let path = parse("menu.file.open");
        assert_eq!(path.segments(), &[prop("menu"), prop("file"), prop("open")]);
    }

    #[test]
    fn test_indexed_segments() {
        let path = parse("a.b[1]");
        assert_eq!(path.segments(), &[prop("a"), elem("b", 1)]);

        let path = parse("rows[0].[2]");
        assert_eq!(path.segments(), &[elem("rows", 0), elem("", 2)]);
    }

    #[test]
    fn test_non_numeric_index_is_ignored() {
        assert_eq!(parse("items[first]").segments(), &[prop("items")]);
        assert_eq!(parse("a.[x].b").segments(), &[prop("a"), prop(""), prop("b")]);
        assert_eq!(parse("[x]").segments(), &[prop("")]);
    }

    #[test]
    fn test_negative_index_never_matches() {
        assert_eq!(parse("items[-1]").segments(), &[elem("items", usize::MAX)]);
        assert_eq!(parse("items[+2]").segments(), &[elem("items", 2)]);
    }

    #[test]
    fn test_oversized_index_never_matches() {
        assert_eq!(
            parse("items[99999999999999999999]").segments(),
            &[elem("items", usize::MAX)]
        );
        assert_eq!(parse("[-99999999999999999999]").segments(), &[elem("", usize::MAX)]);
    }

    #[test]
    fn test_only_first_bracket_group_counts() {
        assert_eq!(parse("grid[1][2]").segments(), &[elem("grid", 1)]);
    }

    #[test]
    fn test_unbalanced_brackets_are_literal() {
        assert_eq!(parse("a[1").segments(), &[prop("a[1")]);
        assert_eq!(parse("a]1[").segments(), &[prop("a]1[")]);
    }

    #[test]
    fn test_whitespace_inside_index() {
        assert_eq!(parse("a[ 3 ]").segments(), &[elem("a", 3)]);
    }

    #[test]
    fn test_empty_and_degenerate_keys() {
        assert_eq!(parse("").segments(), &[prop("")]);
        assert_eq!(parse("a..b").segments(), &[prop("a"), prop(""), prop("b")]);
    }

    #[test]
    fn test_segment_display() {
        assert_eq!(elem("b", 1).to_string(), "b[1]");
        assert_eq!(prop("a").to_string(), "a");
    }

    proptest! {
        #[test]
        fn test_parse_is_total(key in ".{0,64}") {
            let path = parse(&key);
            prop_assert_eq!(path.len(), key.split('.').count());
        }

        #[test]
        fn test_plain_keys_keep_every_part(parts in proptest::collection::vec("[a-zA-Z_]{1,8}", 1..6)) {
            let key = parts.join(".");
            let path = parse(&key);
            prop_assert_eq!(path.len(), parts.len());
            for (segment, part) in path.iter().zip(&parts) {
                prop_assert_eq!(segment, &Segment::Property(part.clone()));
            }
        }

        #[test]
        fn test_indexed_keys_round_trip(name in "[a-z]{0,6}", index in 0usize..10_000) {
            let key = format!("{name}[{index}]");
            let path = parse(&key);
            prop_assert_eq!(path.segments(), &[Segment::Element { name, index }]);
        }
    }
}
