//! # inistore
//!
//! An in-memory store for INI configuration text.
//!
//! Text is parsed into an ordered list of named sections. Each section is an
//! ordered multimap, so repeated keys are all kept, both when parsing and when
//! adding items later. The store can be rendered back to INI text at any time.
//!
//! ## Features
//!
//! - **Multi-valued sections**: repeated keys keep every value in order
//! - **Selective parsing**: include or exclude sections by name
//! - **Unstructured lines**: optionally keep lines that are not `key=value`
//! - **Typed accessors**: booleans, integers, floats and delimited arrays
//! - **Section cache**: repeated reads of the same section skip the lookup
//! - **Serialization**: write the store back to text or a file
//!
//! ## Optional Features
//!
//! ### `encoding` Feature (default)
//!
//! Reads and writes files in a legacy text encoding such as GBK through
//! [`IniOptions::encoding`].
//!
//! ## Example
//!
//! ```rust
//! use inistore::IniReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut reader = IniReader::new();
//!
//! reader.parse(r#"
//! [General]
//! api_mode = false
//! enable_insert = true
//!
//! [Proxy]
//! node = trojan,example.com,443
//! node = vmess,example.org,8080
//! "#)?;
//!
//! assert!(reader.get_bool("General", "enable_insert"));
//! assert_eq!(reader.get_all("Proxy", "node").len(), 2);
//!
//! reader.set("Proxy", "node", "ss,example.net,8388");
//! assert_eq!(reader.item_count("Proxy"), 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Advanced Usage
//!
//! ### Selective Parsing
//!
//! ```rust
//! use inistore::{IniOptions, IniReader};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = IniOptions::new().include("rules").store_any_line(true);
//! let mut reader = IniReader::with_options(options);
//!
//! reader.parse("[common]\nname = demo\n[rules]\nDOMAIN,example.com,DIRECT\n")?;
//!
//! assert!(!reader.section_exists("common"));
//! assert_eq!(reader.get("rules", "{NONAME}"), "DOMAIN,example.com,DIRECT");
//! # Ok(())
//! # }
//! ```
//!
//! ### Current Section
//!
//! ```rust
//! use inistore::IniReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut reader = IniReader::new();
//! reader.parse("[window]\nsize = 800,600\ntitle = demo\n")?;
//!
//! reader.enter_section("window")?;
//! let size: [u32; 2] = reader.get_array_current("size", ",");
//! assert_eq!(size, [800, 600]);
//! reader.set_bool_current("fullscreen", false)?;
//! # Ok(())
//! # }
//! ```

// Module declarations
mod cache;
mod error;
mod io;
mod parser;
mod reader;
mod serializer;
mod store;
mod types;
mod values;

// Public API exports
pub use error::{IniError, IniResult};
pub use reader::{IniOptions, IniReader, TextTransform};
pub use types::{Item, NONAME_KEY, Section};

// Re-export submodules for advanced usage
pub use cache::SectionCache;
pub use parser::{IniLineParser, Line, MAX_LINE_LENGTH, line_delimiter, split_lines};
pub use serializer::serialize;
pub use store::IniStore;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
