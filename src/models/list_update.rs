use serde::{Deserialize, Deserializer};

/// A client-submitted collection that may be left alone, emptied, or replaced.
///
/// Deserializes from an optional JSON array: a missing field or `null` is
/// `Unset`, `[]` is `Clear`, anything else is `Set`. Use with
/// `#[serde(default)]` so an absent field maps to `Unset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListUpdate<T> {
    Unset,
    Clear,
    Set(Vec<T>),
}

impl<T> ListUpdate<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, ListUpdate::Unset)
    }

    /// `None` when unset, otherwise the requested items (empty for `Clear`).
    pub fn into_items(self) -> Option<Vec<T>> {
        match self {
            ListUpdate::Unset => None,
            ListUpdate::Clear => Some(Vec::new()),
            ListUpdate::Set(items) => Some(items),
        }
    }

    pub fn map_items<U, F>(self, f: F) -> ListUpdate<U>
    where
        F: FnMut(T) -> U,
    {
        match self {
            ListUpdate::Unset => ListUpdate::Unset,
            ListUpdate::Clear => ListUpdate::Clear,
            ListUpdate::Set(items) => ListUpdate::Set(items.into_iter().map(f).collect()),
        }
    }
}

impl<T> Default for ListUpdate<T> {
    fn default() -> Self {
        ListUpdate::Unset
    }
}

impl<T> From<Option<Vec<T>>> for ListUpdate<T> {
    fn from(value: Option<Vec<T>>) -> Self {
        match value {
            None => ListUpdate::Unset,
            Some(items) if items.is_empty() => ListUpdate::Clear,
            Some(items) => ListUpdate::Set(items),
        }
    }
}

impl<'de, T> Deserialize<'de> for ListUpdate<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Vec<T>>::deserialize(deserializer).map(ListUpdate::from)
    }
}
