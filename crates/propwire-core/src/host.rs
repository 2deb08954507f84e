#![forbid(unsafe_code)]

//! The DOM attribute surface of a host element.
//!
//! Attribute values are plain strings. Names are ASCII case-insensitive, so
//! [`AttributeMap`] stores them lowercased.

/// Attribute access on the element that hosts a component instance.
pub trait HostElement {
    fn get_attribute(&self, name: &str) -> Option<&str>;

    fn set_attribute(&mut self, name: &str, value: &str);

    /// Remove `name`. Returns whether it was present.
    fn remove_attribute(&mut self, name: &str) -> bool;

    fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }
}

/// In-memory attribute list, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    entries: Vec<(String, String)>,
}

impl AttributeMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(name))
    }
}

impl HostElement for AttributeMap {
    fn get_attribute(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.entries[i].1.as_str())
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        match self.position(name) {
            Some(i) => value.clone_into(&mut self.entries[i].1),
            None => self
                .entries
                .push((name.to_ascii_lowercase(), value.to_owned())),
        }
    }

    fn remove_attribute(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(i) => {
                self.entries.remove(i);
                true
            }
            None => false,
        }
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.set_attribute(name, value);
        }
        map
    }
}
