//! Rendering of an [`IniStore`] back to INI text.
//!
//! Output is synthetic: comments and blank lines from the source are not
//! kept. Each section is written as a `[name]` header followed by its items
//! and a separating blank line.

use crate::store::IniStore;
use std::fmt::Write;

/// Render every section of `store` in insertion order
pub fn serialize(store: &IniStore) -> String {
    let mut output = String::new();
    for (name, section) in store.iter() {
        // Writing into a String cannot fail
        let _ = writeln!(output, "[{}]", name);
        for item in section {
            let _ = writeln!(output, "{}", item);
        }
        output.push('\n');
    }
    output
}
