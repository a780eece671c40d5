use crate::error::{IniError, IniResult};
use crate::io;
use crate::parser::{IniLineParser, Line, split_lines};
use crate::serializer;
use crate::store::IniStore;
use crate::types::{Item, NONAME_KEY, Section};
use crate::values;
#[cfg(feature = "encoding")]
use encoding_rs::Encoding;
use log::{debug, warn};
use std::fmt;
use std::path::Path;
use std::rc::Rc;
use std::str::FromStr;

/// Whole-text transform applied to input before it is split into lines
pub type TextTransform = Rc<dyn Fn(&str) -> String>;

/// Reader options, fixed when the reader is built
#[derive(Clone, Default)]
pub struct IniOptions {
    /// Keep lines that are not `key=value` under [`NONAME_KEY`]
    pub store_any_line: bool,

    /// Only keep these sections; empty means keep everything
    pub include_sections: Vec<String>,

    /// Drop these sections
    pub exclude_sections: Vec<String>,

    /// Applied to the whole input before parsing
    pub transform: Option<TextTransform>,

    /// Text encoding used for file and byte input/output (UTF-8 if unset)
    #[cfg(feature = "encoding")]
    pub encoding: Option<&'static Encoding>,
}

impl IniOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store_any_line(mut self, enabled: bool) -> Self {
        self.store_any_line = enabled;
        self
    }

    pub fn include(mut self, section: impl Into<String>) -> Self {
        self.include_sections.push(section.into());
        self
    }

    pub fn exclude(mut self, section: impl Into<String>) -> Self {
        self.exclude_sections.push(section.into());
        self
    }

    pub fn transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(&str) -> String + 'static,
    {
        self.transform = Some(Rc::new(transform));
        self
    }

    #[cfg(feature = "encoding")]
    pub fn encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Whether items of `section` are dropped during parsing
    pub fn is_excluded(&self, section: &str) -> bool {
        let excluded = self.exclude_sections.iter().any(|s| s == section);
        let included =
            self.include_sections.is_empty() || self.include_sections.iter().any(|s| s == section);
        excluded || !included
    }
}

impl fmt::Debug for IniOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("IniOptions");
        debug
            .field("store_any_line", &self.store_any_line)
            .field("include_sections", &self.include_sections)
            .field("exclude_sections", &self.exclude_sections)
            .field("transform", &self.transform.is_some());
        #[cfg(feature = "encoding")]
        debug.field("encoding", &self.encoding.map(|e| e.name()));
        debug.finish()
    }
}

/// In-memory INI store.
///
/// Sections keep the order they were read or created in, and every section
/// is a multimap: repeated keys are all kept, on parse and on [`set`].
///
/// Item-level reads never fail. Before a successful parse (or a first
/// [`set`]) they return empty strings, `false` or zero, exactly as they do
/// for a missing section or key. Use [`section_exists`] and
/// [`item_exists`] to tell these cases apart.
///
/// [`set`]: IniReader::set
/// [`section_exists`]: IniReader::section_exists
/// [`item_exists`]: IniReader::item_exists
#[derive(Debug, Default)]
pub struct IniReader {
    store: IniStore,
    options: IniOptions,
    parsed: bool,
    current_section: Option<String>,
    read_sections: Vec<String>,
}

impl IniReader {
    /// Create a new reader with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new reader with custom options
    pub fn with_options(options: IniOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Create a reader with default options and parse a file
    pub fn from_file(path: impl AsRef<Path>) -> IniResult<Self> {
        let mut reader = Self::new();
        reader.parse_file(path)?;
        Ok(reader)
    }

    pub fn options(&self) -> &IniOptions {
        &self.options
    }

    /// Underlying section storage
    pub fn store(&self) -> &IniStore {
        &self.store
    }

    /// Whether a parse succeeded or an item was set since the last reset
    pub fn is_parsed(&self) -> bool {
        self.parsed
    }

    /// Erase all data and reset the parse status
    pub fn erase_all(&mut self) {
        self.store.clear();
        self.read_sections.clear();
        self.parsed = false;
    }

    // ==================== Parsing ====================

    /// Parse INI text, replacing any previous content.
    ///
    /// Parsing is not transactional: on error, sections committed before the
    /// failing line stay in the store while the reader reports itself as not
    /// parsed. Call [`erase_all`](Self::erase_all) before reusing it.
    pub fn parse(&mut self, content: &str) -> IniResult<()> {
        self.erase_all();

        let converted = self.options.transform.clone().map(|t| t(content));
        let content = converted.as_deref().unwrap_or(content);

        let mut current: Option<String> = None;
        let mut items = Section::new();
        let mut excluded = false;

        for (index, line) in split_lines(content).enumerate() {
            match IniLineParser::classify(&line) {
                Line::Skip => {}

                Line::Item { key, value } => {
                    if excluded {
                        continue;
                    }
                    if current.is_none() {
                        warn!("item '{}' at line {} is outside of any section", key, index + 1);
                        return Err(IniError::item_outside_section(index + 1));
                    }
                    items.push(key, value);
                }

                Line::Section(name) => {
                    excluded = self.options.is_excluded(name);
                    if let Some(finished) = current.take() {
                        self.commit_section(finished, std::mem::take(&mut items))?;
                    }
                    // `[]` closes the previous section without opening one
                    current = (!name.is_empty()).then(|| name.to_string());

                    if !self.options.include_sections.is_empty()
                        && self.read_sections == self.options.include_sections
                    {
                        debug!("all included sections read, stopping at line {}", index + 1);
                        break;
                    }
                }

                Line::Unstructured(text) => {
                    if self.options.store_any_line && !excluded && current.is_some() {
                        items.push(NONAME_KEY, text);
                    }
                }
            }
        }

        if let Some(finished) = current {
            self.commit_section(finished, items)?;
        }

        self.parsed = true;
        debug!("parsed {} sections", self.store.len());
        Ok(())
    }

    /// Sections with no items are dropped and never count as duplicates
    fn commit_section(&mut self, name: String, items: Section) -> IniResult<()> {
        if items.is_empty() {
            return Ok(());
        }
        if let Err(e) = self.store.commit(&name, items) {
            warn!("section [{}] appears more than once", name);
            return Err(e);
        }
        self.read_sections.push(name);
        Ok(())
    }

    /// Decode raw bytes with the configured encoding, then parse them
    pub fn parse_bytes(&mut self, bytes: &[u8]) -> IniResult<()> {
        #[cfg(feature = "encoding")]
        let content = io::decode(bytes, self.options.encoding);
        #[cfg(not(feature = "encoding"))]
        let content = io::decode(bytes);
        self.parse(&content)
    }

    /// Parse an INI file
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> IniResult<()> {
        let bytes = io::read_file(path.as_ref())?;
        self.parse_bytes(&bytes)
    }

    // ==================== Sections ====================

    pub fn section_exists(&self, section: &str) -> bool {
        self.store.contains(section)
    }

    pub fn section_count(&self) -> usize {
        self.store.len()
    }

    /// All section names, in store order
    pub fn section_names(&self) -> Vec<String> {
        self.store.names()
    }

    /// Sections fully read by the last parse, in the order they completed
    pub fn read_sections(&self) -> &[String] {
        &self.read_sections
    }

    /// Make `section` the current section and cache its content
    pub fn enter_section(&mut self, section: &str) -> IniResult<()> {
        self.store.cache_section(section)?;
        self.current_section = Some(section.to_string());
        Ok(())
    }

    /// Set the current section without checking that it exists
    pub fn set_current_section(&mut self, section: &str) {
        self.current_section = Some(section.to_string());
    }

    /// The current section; an empty name counts as none
    pub fn current_section(&self) -> Option<&str> {
        self.current_section.as_deref().filter(|name| !name.is_empty())
    }

    fn require_current(&self) -> IniResult<String> {
        self.current_section().map(str::to_string).ok_or(IniError::NoCurrentSection)
    }

    // ==================== Reading ====================

    fn read<R>(&self, section: &str, f: impl FnOnce(&Section) -> R) -> Option<R> {
        if !self.parsed {
            return None;
        }
        self.store.with_section(section, f)
    }

    pub fn item_exists(&self, section: &str, key: &str) -> bool {
        self.read(section, |s| s.contains_key(key)).unwrap_or(false)
    }

    pub fn item_exists_current(&self, key: &str) -> bool {
        self.current_section()
            .is_some_and(|section| self.item_exists(section, key))
    }

    pub fn item_prefix_exists(&self, section: &str, prefix: &str) -> bool {
        self.read(section, |s| s.contains_prefix(prefix)).unwrap_or(false)
    }

    pub fn item_prefix_exists_current(&self, prefix: &str) -> bool {
        self.current_section()
            .is_some_and(|section| self.item_prefix_exists(section, prefix))
    }

    /// Number of items in `section`, counting repeated keys
    pub fn item_count(&self, section: &str) -> usize {
        self.read(section, Section::len).unwrap_or(0)
    }

    /// Every item of `section`
    pub fn get_items(&self, section: &str) -> IniResult<Vec<Item>> {
        if !self.parsed {
            return Err(IniError::NotParsed);
        }
        self.read(section, |s| s.items().to_vec())
            .ok_or_else(|| IniError::section_not_found(section))
    }

    pub fn get_items_current(&self) -> IniResult<Vec<Item>> {
        let section = self.require_current()?;
        self.get_items(&section)
    }

    /// Values of every item whose key starts with `prefix`
    pub fn get_all(&self, section: &str, prefix: &str) -> Vec<String> {
        self.read(section, |s| {
            s.values_with_prefix(prefix).map(str::to_string).collect()
        })
        .unwrap_or_default()
    }

    pub fn get_all_current(&self, prefix: &str) -> Vec<String> {
        self.current_section()
            .map(|section| self.get_all(section, prefix))
            .unwrap_or_default()
    }

    /// Value of the first item whose key equals `key`
    pub fn get(&self, section: &str, key: &str) -> String {
        self.read(section, |s| s.get(key).map(str::to_string))
            .flatten()
            .unwrap_or_default()
    }

    pub fn get_current(&self, key: &str) -> String {
        self.current_section()
            .map(|section| self.get(section, key))
            .unwrap_or_default()
    }

    /// Value of the first item whose key starts with `prefix`
    pub fn get_first(&self, section: &str, prefix: &str) -> String {
        self.read(section, |s| s.values_with_prefix(prefix).next().map(str::to_string))
            .flatten()
            .unwrap_or_default()
    }

    pub fn get_first_current(&self, prefix: &str) -> String {
        self.current_section()
            .map(|section| self.get_first(section, prefix))
            .unwrap_or_default()
    }

    /// True only if the stored value is exactly `"true"`
    pub fn get_bool(&self, section: &str, key: &str) -> bool {
        values::parse_bool(&self.get(section, key))
    }

    pub fn get_bool_current(&self, key: &str) -> bool {
        values::parse_bool(&self.get_current(key))
    }

    /// Integer value, or 0 if missing or not a number
    pub fn get_long(&self, section: &str, key: &str) -> i64 {
        values::parse_or_default(&self.get(section, key))
    }

    pub fn get_long_current(&self, key: &str) -> i64 {
        values::parse_or_default(&self.get_current(key))
    }

    /// Float value, or 0.0 if missing or not a number
    pub fn get_double(&self, section: &str, key: &str) -> f64 {
        values::parse_or_default(&self.get(section, key))
    }

    pub fn get_double_current(&self, key: &str) -> f64 {
        values::parse_or_default(&self.get_current(key))
    }

    /// Split a delimited value into exactly `N` elements.
    ///
    /// Elements past the end of the stored list, or that fail to parse, take
    /// the type's default value.
    ///
    /// ```
    /// use inistore::IniReader;
    ///
    /// let mut reader = IniReader::new();
    /// reader.set("window", "size", "800,600");
    /// let size: [u32; 3] = reader.get_array("window", "size", ",");
    /// assert_eq!(size, [800, 600, 0]);
    /// ```
    pub fn get_array<T, const N: usize>(&self, section: &str, key: &str, separator: &str) -> [T; N]
    where
        T: FromStr + Default,
    {
        values::split_fixed(&self.get(section, key), separator)
    }

    pub fn get_array_current<T, const N: usize>(&self, key: &str, separator: &str) -> [T; N]
    where
        T: FromStr + Default,
    {
        values::split_fixed(&self.get_current(key), separator)
    }

    /// Split a delimited value into as many elements as it holds
    pub fn get_vec<T>(&self, section: &str, key: &str, separator: &str) -> Vec<T>
    where
        T: FromStr + Default,
    {
        values::split_array(&self.get(section, key), separator)
    }

    pub fn get_vec_current<T>(&self, key: &str, separator: &str) -> Vec<T>
    where
        T: FromStr + Default,
    {
        values::split_array(&self.get_current(key), separator)
    }

    // ==================== Writing ====================

    /// Append an item, creating the section if needed.
    ///
    /// Existing items with the same key are kept.
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.parsed = true;
        self.store.append(section, key, value);
    }

    pub fn set_current(&mut self, key: &str, value: &str) -> IniResult<()> {
        let section = self.require_current()?;
        self.set(&section, key, value);
        Ok(())
    }

    pub fn set_bool(&mut self, section: &str, key: &str, value: bool) {
        self.set(section, key, values::format_bool(value));
    }

    pub fn set_bool_current(&mut self, key: &str, value: bool) -> IniResult<()> {
        self.set_current(key, values::format_bool(value))
    }

    pub fn set_long(&mut self, section: &str, key: &str, value: i64) {
        self.set(section, key, &value.to_string());
    }

    pub fn set_long_current(&mut self, key: &str, value: i64) -> IniResult<()> {
        self.set_current(key, &value.to_string())
    }

    pub fn set_double(&mut self, section: &str, key: &str, value: f64) {
        self.set(section, key, &value.to_string());
    }

    pub fn set_double_current(&mut self, key: &str, value: f64) -> IniResult<()> {
        self.set_current(key, &value.to_string())
    }

    /// Store a list joined by `separator`
    pub fn set_array<I>(&mut self, section: &str, key: &str, separator: &str, items: I)
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        self.set(section, key, &values::join_array(items, separator));
    }

    pub fn set_array_current<I>(&mut self, key: &str, separator: &str, items: I) -> IniResult<()>
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        self.set_current(key, &values::join_array(items, separator))
    }

    /// Remove every item named `key`, returning how many were removed
    pub fn erase(&mut self, section: &str, key: &str) -> IniResult<usize> {
        self.store.erase(section, key)
    }

    pub fn erase_current(&mut self, key: &str) -> IniResult<usize> {
        let section = self.require_current()?;
        self.erase(&section, key)
    }

    /// Remove only the first item named `key`
    pub fn erase_first(&mut self, section: &str, key: &str) -> IniResult<()> {
        self.store.erase_first(section, key).map(|_| ())
    }

    pub fn erase_first_current(&mut self, key: &str) -> IniResult<()> {
        let section = self.require_current()?;
        self.erase_first(&section, key)
    }

    // ==================== Output ====================

    /// Render the store as INI text; empty if nothing was parsed or set
    pub fn serialize(&self) -> String {
        if !self.parsed {
            return String::new();
        }
        serializer::serialize(&self.store)
    }

    /// Write the rendered store to a file
    pub fn to_file(&self, path: impl AsRef<Path>) -> IniResult<()> {
        let content = self.serialize();
        #[cfg(feature = "encoding")]
        let bytes = io::encode(&content, self.options.encoding);
        #[cfg(not(feature = "encoding"))]
        let bytes = content.into_bytes();
        io::write_file(path.as_ref(), &bytes)
    }
}

impl fmt::Display for IniReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_exclusion_policy() {
        let options = IniOptions::new().exclude("a");
        assert!(options.is_excluded("a"));
        assert!(!options.is_excluded("b"));

        let options = IniOptions::new().include("b").exclude("b");
        assert!(options.is_excluded("b"));
        assert!(options.is_excluded("c"));

        let options = IniOptions::new().include("b");
        assert!(!options.is_excluded("b"));
    }

    #[test]
    fn test_accessors_before_parse() {
        let reader = IniReader::new();
        assert_eq!(reader.get("a", "b"), "");
        assert!(reader.get_all("a", "b").is_empty());
        assert_eq!(reader.item_count("a"), 0);
        assert!(matches!(reader.get_items("a"), Err(IniError::NotParsed)));
        assert_eq!(reader.serialize(), "");
    }

    #[test]
    fn test_set_marks_parsed() {
        let mut reader = IniReader::new();
        reader.set("s", "k", "v");
        assert!(reader.is_parsed());
        assert_eq!(reader.get("s", "k"), "v");
    }

    #[test]
    fn test_enter_section_requires_existing() {
        let mut reader = IniReader::new();
        assert!(matches!(
            reader.enter_section("nope"),
            Err(IniError::SectionNotFound { .. })
        ));
        assert_eq!(reader.current_section(), None);

        reader.set("yes", "k", "v");
        reader.enter_section("yes").unwrap();
        assert_eq!(reader.current_section(), Some("yes"));
        assert_eq!(reader.store().cached_section().as_deref(), Some("yes"));
    }

    #[test]
    fn test_current_mutators_without_section() {
        let mut reader = IniReader::new();
        assert!(matches!(
            reader.set_current("k", "v"),
            Err(IniError::NoCurrentSection)
        ));
        assert!(matches!(
            reader.erase_current("k"),
            Err(IniError::NoCurrentSection)
        ));
        assert!(matches!(
            reader.erase_first_current("k"),
            Err(IniError::NoCurrentSection)
        ));
        assert!(!reader.is_parsed());
    }

    #[test]
    fn test_empty_current_section_is_none() {
        let mut reader = IniReader::new();
        reader.set_current_section("");
        assert_eq!(reader.current_section(), None);
        assert!(matches!(
            reader.set_current("k", "v"),
            Err(IniError::NoCurrentSection)
        ));
        assert_eq!(reader.section_count(), 0);
    }

    #[test]
    fn test_parse_keeps_current_section_pointer() {
        let mut reader = IniReader::new();
        reader.set_current_section("main");
        reader.parse("[main]\nname = demo\nmode = fast").unwrap();
        assert_eq!(reader.get_current("name"), "demo");
    }

    #[test]
    fn test_transform_runs_before_parsing() {
        let options = IniOptions::new().transform(|text| text.replace("KEY", "name"));
        let mut reader = IniReader::with_options(options);
        reader.parse("[s]\nKEY = x\nother = y").unwrap();
        assert_eq!(reader.get("s", "name"), "x");
    }

    #[test]
    fn test_debug_options() {
        let rendered = format!("{:?}", IniOptions::new().store_any_line(true));
        assert!(rendered.contains("store_any_line: true"));
        assert!(rendered.contains("transform: false"));
    }
}
