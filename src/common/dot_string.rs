use std::fmt;
use std::ops::Index;

/// Dot-delimited path into a state tree.
///
/// An empty string is "no path" (zero segments). Any other input is split on
/// every `.`, so `"a..b"` and `".a"` keep their empty-string segments verbatim.
///
/// # Examples
///
/// ```
/// use storage_sync::common::DotString;
///
/// let path = DotString::new("user.profile.name");
/// assert_eq!(path.len(), 3);
/// assert_eq!(&path[0], "user");
/// assert_eq!(&path[2], "name");
///
/// assert!(DotString::new("").is_empty());
/// assert_eq!(DotString::new("a..b").iter().collect::<Vec<_>>(), vec!["a", "", "b"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DotString {
    key: String,
    segments: Vec<String>,
}

impl DotString {
    pub fn new(dot_key: &str) -> Self {
        let segments = if dot_key.is_empty() {
            Vec::new()
        } else {
            dot_key.split('.').map(|s| s.to_string()).collect()
        };

        Self {
            key: dot_key.to_string(),
            segments,
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|s| s.as_str())
    }
}

impl Index<usize> for DotString {
    type Output = str;

    fn index(&self, index: usize) -> &Self::Output {
        &self.segments[index]
    }
}

impl From<&str> for DotString {
    fn from(dot_key: &str) -> Self {
        Self::new(dot_key)
    }
}

impl From<&String> for DotString {
    fn from(dot_key: &String) -> Self {
        Self::new(dot_key)
    }
}

impl fmt::Display for DotString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}
