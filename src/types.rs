use std::fmt;

/// Key under which lines without a `key=value` shape are stored
pub const NONAME_KEY: &str = "{NONAME}";

/// A single key/value pair inside a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub key: String,
    pub value: String,
}

impl Item {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Whether this item holds an unstructured line
    pub fn is_unnamed(&self) -> bool {
        self.key == NONAME_KEY
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unnamed() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} = {}", self.key, self.value)
        }
    }
}

/// Ordered multimap of items. Keys may repeat; insertion order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    items: Vec<Item>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item, keeping any existing items with the same key
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.items.push(Item::new(key, value));
    }

    /// First value whose key equals `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.key == key)
            .map(|item| item.value.as_str())
    }

    /// Every value whose key starts with `prefix`, in insertion order
    pub fn values_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.items
            .iter()
            .filter(move |item| item.key.starts_with(prefix))
            .map(|item| item.value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.iter().any(|item| item.key == key)
    }

    pub fn contains_prefix(&self, prefix: &str) -> bool {
        self.items.iter().any(|item| item.key.starts_with(prefix))
    }

    /// Remove every item with `key`, returning how many were removed
    pub fn remove_all(&mut self, key: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.key != key);
        before - self.items.len()
    }

    /// Remove the first item with `key`
    pub fn remove_first(&mut self, key: &str) -> Option<Item> {
        let index = self.items.iter().position(|item| item.key == key)?;
        Some(self.items.remove(index))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

impl<'a> IntoIterator for &'a Section {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Section {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().map(|(k, v)| Item::new(k, v)).collect(),
        }
    }
}
