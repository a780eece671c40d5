//! Ordered section storage with a single-entry read cache.
//!
//! [`IniStore`] is the source of truth for every section. Reads that address
//! a section by name go through [`IniStore::with_section`], which serves them
//! from the cached snapshot when the same section was touched last. Every
//! mutation of the cached section reloads the snapshot before returning, so
//! the cache never disagrees with the map between public calls.

use crate::cache::SectionCache;
use crate::error::{IniError, IniResult};
use crate::types::{Item, Section};
use linked_hash_map::LinkedHashMap;
use log::trace;
use std::cell::RefCell;

/// Ordered mapping from unique section name to [`Section`]
#[derive(Debug, Default)]
pub struct IniStore {
    sections: LinkedHashMap<String, Section>,
    cache: RefCell<SectionCache>,
}

impl IniStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every section and the cached snapshot
    pub fn clear(&mut self) {
        self.sections.clear();
        self.cache.get_mut().invalidate();
    }

    pub fn contains(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section names in insertion order
    pub fn names(&self) -> Vec<String> {
        self.sections.keys().cloned().collect()
    }

    pub fn get(&self, section: &str) -> Option<&Section> {
        self.sections.get(section)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Section)> {
        self.sections.iter()
    }

    /// Insert a fully read section, rejecting names already present
    pub fn commit(&mut self, name: &str, section: Section) -> IniResult<()> {
        if self.sections.contains_key(name) {
            return Err(IniError::duplicate_section(name));
        }
        self.sections.insert(name.to_string(), section);
        Ok(())
    }

    /// Run `f` against `section`, loading it into the cache on a miss.
    ///
    /// Returns `None` if the section does not exist.
    pub fn with_section<R>(&self, section: &str, f: impl FnOnce(&Section) -> R) -> Option<R> {
        let stored = self.sections.get(section)?;
        let mut cache = self.cache.borrow_mut();
        if !cache.holds(section) {
            trace!("section cache miss for [{}]", section);
            cache.load(section, stored);
        }
        Some(f(cache.content()))
    }

    /// Load `section` into the cache unconditionally
    pub fn cache_section(&self, section: &str) -> IniResult<()> {
        let stored = self
            .sections
            .get(section)
            .ok_or_else(|| IniError::section_not_found(section))?;
        self.cache.borrow_mut().load(section, stored);
        Ok(())
    }

    /// Name of the section currently held by the cache
    pub fn cached_section(&self) -> Option<String> {
        self.cache.borrow().name().map(str::to_string)
    }

    /// Append an item, creating the section if needed
    pub fn append(&mut self, section: &str, key: &str, value: &str) {
        match self.sections.get_mut(section) {
            Some(existing) => existing.push(key, value),
            None => {
                let mut created = Section::new();
                created.push(key, value);
                self.sections.insert(section.to_string(), created);
            }
        }
        self.resync(section);
    }

    /// Remove every item named `key`, returning the number removed
    pub fn erase(&mut self, section: &str, key: &str) -> IniResult<usize> {
        let target = self
            .sections
            .get_mut(section)
            .ok_or_else(|| IniError::section_not_found(section))?;
        let removed = target.remove_all(key);
        if removed > 0 {
            self.resync(section);
        }
        Ok(removed)
    }

    /// Remove the first item named `key`
    pub fn erase_first(&mut self, section: &str, key: &str) -> IniResult<Item> {
        let target = self
            .sections
            .get_mut(section)
            .ok_or_else(|| IniError::section_not_found(section))?;
        let removed = target
            .remove_first(key)
            .ok_or_else(|| IniError::item_not_found(section, key))?;
        self.resync(section);
        Ok(removed)
    }

    fn resync(&mut self, section: &str) {
        let cache = self.cache.get_mut();
        if cache.holds(section) {
            if let Some(stored) = self.sections.get(section) {
                cache.load(section, stored);
            }
        }
    }
}

impl PartialEq for IniStore {
    fn eq(&self, other: &Self) -> bool {
        self.sections == other.sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(section: &str, items: &[(&str, &str)]) -> IniStore {
        let mut store = IniStore::new();
        store.commit(section, items.iter().copied().collect()).unwrap();
        store
    }

    #[test]
    fn test_commit_rejects_duplicates() {
        let mut store = store_with("a", &[("k", "v")]);
        let err = store.commit("a", Section::new()).unwrap_err();
        assert!(matches!(err, IniError::DuplicateSection { name } if name == "a"));
    }

    #[test]
    fn test_names_keep_insertion_order() {
        let mut store = IniStore::new();
        for name in ["zeta", "alpha", "mid"] {
            store.append(name, "k", "v");
        }
        assert_eq!(store.names(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_with_section_populates_cache() {
        let store = store_with("a", &[("k", "v")]);
        assert_eq!(store.cached_section(), None);

        let value = store.with_section("a", |s| s.get("k").map(str::to_string));
        assert_eq!(value, Some(Some("v".to_string())));
        assert_eq!(store.cached_section().as_deref(), Some("a"));

        assert!(store.with_section("missing", |s| s.len()).is_none());
        assert_eq!(store.cached_section().as_deref(), Some("a"));
    }

    #[test]
    fn test_mutation_resyncs_cache() {
        let mut store = store_with("a", &[("k", "v1")]);
        store.cache_section("a").unwrap();

        store.append("a", "k", "v2");
        assert_eq!(store.with_section("a", |s| s.len()), Some(2));

        assert_eq!(store.erase("a", "k").unwrap(), 2);
        assert_eq!(store.with_section("a", |s| s.len()), Some(0));
    }

    #[test]
    fn test_erase_first_errors() {
        let mut store = store_with("a", &[("k", "v")]);
        assert!(matches!(
            store.erase_first("b", "k"),
            Err(IniError::SectionNotFound { .. })
        ));
        assert!(matches!(
            store.erase_first("a", "x"),
            Err(IniError::ItemNotFound { .. })
        ));
        assert_eq!(store.erase_first("a", "k").unwrap(), Item::new("k", "v"));
    }

    #[test]
    fn test_clear_invalidates_cache() {
        let mut store = store_with("a", &[("k", "v")]);
        store.cache_section("a").unwrap();
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.cached_section(), None);
    }
}
