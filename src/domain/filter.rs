use std::collections::BTreeMap;

use serde::Serialize;

/// Search values keyed by backend query parameter.
///
/// Values are trimmed on insert and blank values are never stored, so every
/// entry is something the user actually typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState(BTreeMap<String, String>);

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`FilterState::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl AsRef<str>) -> Self {
        self.set(key, value);
        self
    }

    /// Stores the trimmed value, or clears the key when it is blank.
    pub fn set(&mut self, key: impl Into<String>, value: impl AsRef<str>) {
        let key = key.into();
        let value = value.as_ref().trim();
        if value.is_empty() {
            self.0.remove(&key);
        } else {
            self.0.insert(key, value.to_string());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for FilterState
where
    K: Into<String>,
    V: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filters = Self::new();
        for (key, value) in iter {
            filters.set(key, value);
        }
        filters
    }
}
