//! Single-entry memo of the most recently touched section

use crate::types::Section;

/// Snapshot of one section, keyed by its name
#[derive(Debug, Clone, Default)]
pub struct SectionCache {
    name: Option<String>,
    content: Section,
}

impl SectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the cache currently holds `section`
    pub fn holds(&self, section: &str) -> bool {
        self.name.as_deref() == Some(section)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn content(&self) -> &Section {
        &self.content
    }

    /// Replace the snapshot with `content` under `section`
    pub fn load(&mut self, section: &str, content: &Section) {
        self.name = Some(section.to_string());
        self.content = content.clone();
    }

    pub fn invalidate(&mut self) {
        self.name = None;
        self.content = Section::new();
    }
}
