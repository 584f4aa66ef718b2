//! Header collections and the merge applied when a client is built.
//!
//! # Design
//! `HeaderSet` keeps headers as plain `(name, value)` string pairs in
//! insertion order. Nothing is validated here: a malformed name or value is
//! carried through untouched and only rejected if the transport refuses to
//! put it on the wire.

/// How a header name behaves when two header sets are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    /// Values accumulate (`Accept`, `Via`, ...).
    Multi,
    /// Only one value survives; later writes replace earlier ones.
    Single,
    /// Not a field we know about; appended as a raw pair.
    Custom,
}

const MULTI_VALUED: &[&str] = &[
    "accept",
    "accept-charset",
    "accept-encoding",
    "accept-language",
    "connection",
    "expect",
    "if-match",
    "if-none-match",
    "pragma",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "user-agent",
    "via",
    "warning",
];

const SINGLE_VALUED: &[&str] = &[
    "authorization",
    "cache-control",
    "date",
    "from",
    "host",
    "if-modified-since",
    "if-range",
    "if-unmodified-since",
    "max-forwards",
    "proxy-authorization",
    "range",
    "referer",
];

impl HeaderKind {
    pub fn of(name: &str) -> Self {
        if MULTI_VALUED.iter().any(|n| n.eq_ignore_ascii_case(name)) {
            HeaderKind::Multi
        } else if SINGLE_VALUED.iter().any(|n| n.eq_ignore_ascii_case(name)) {
            HeaderKind::Single
        } else {
            HeaderKind::Custom
        }
    }
}

/// An ordered, case-insensitive multimap of header names to values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    entries: Vec<(String, String)>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value without touching existing values of the same name.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Replace every value of `name` with `value`.
    ///
    /// The replacement takes the position of the first existing entry so the
    /// overall order stays stable.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(first) => {
                self.entries[first].1 = value;
                let mut idx = 0;
                self.entries.retain(|(n, _)| {
                    let keep = idx <= first || !n.eq_ignore_ascii_case(&name);
                    idx += 1;
                    keep
                });
            }
            None => self.entries.push((name, value)),
        }
    }

    /// First value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.entries[i].1.as_str())
    }

    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Drop every value of `name`, returning how many were removed.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n.eq_ignore_ascii_case(name))
    }
}

impl<K, V> FromIterator<(K, V)> for HeaderSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = HeaderSet::new();
        for (name, value) in iter {
            set.append(name, value);
        }
        set
    }
}

impl<'a> IntoIterator for &'a HeaderSet {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Copy every entry of `src` into `dest`.
///
/// Multi-valued fields are appended, single-valued fields are overwritten
/// (last write wins), and custom names are appended once the recognized
/// fields have been applied.
pub fn merge_headers(dest: &mut HeaderSet, src: &HeaderSet) {
    for (name, value) in src.iter() {
        match HeaderKind::of(name) {
            HeaderKind::Multi => dest.append(name, value),
            HeaderKind::Single => dest.insert(name, value),
            HeaderKind::Custom => {}
        }
    }
    for (name, value) in src.iter() {
        if HeaderKind::of(name) == HeaderKind::Custom {
            dest.append(name, value);
        }
    }
}
