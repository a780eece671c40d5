//! File collaborators for reading and writing INI text

use crate::error::{IniError, IniResult};
#[cfg(feature = "encoding")]
use encoding_rs::Encoding;
use log::debug;
#[cfg(feature = "encoding")]
use log::warn;
use std::path::Path;

/// Read a whole file as bytes
pub fn read_file(path: &Path) -> IniResult<Vec<u8>> {
    let bytes = std::fs::read(path).map_err(|e| IniError::io(path, e))?;
    debug!("read {} bytes from '{}'", bytes.len(), path.display());
    Ok(bytes)
}

/// Write `content` to a file, replacing it
pub fn write_file(path: &Path, content: &[u8]) -> IniResult<()> {
    std::fs::write(path, content).map_err(|e| IniError::io(path, e))?;
    debug!("wrote {} bytes to '{}'", content.len(), path.display());
    Ok(())
}

/// Decode raw bytes into text.
///
/// Without an encoding the bytes are read as UTF-8, replacing invalid
/// sequences. A leading byte order mark overrides the given encoding.
#[cfg(feature = "encoding")]
pub fn decode(bytes: &[u8], encoding: Option<&'static Encoding>) -> String {
    let encoding = encoding.unwrap_or(encoding_rs::UTF_8);
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!("input contained bytes not valid in {}", used.name());
    }
    text.into_owned()
}

#[cfg(not(feature = "encoding"))]
pub fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Encode text for writing
#[cfg(feature = "encoding")]
pub fn encode(text: &str, encoding: Option<&'static Encoding>) -> Vec<u8> {
    match encoding {
        Some(encoding) => {
            let (bytes, used, had_errors) = encoding.encode(text);
            if had_errors {
                warn!("output contained characters not representable in {}", used.name());
            }
            bytes.into_owned()
        }
        None => text.as_bytes().to_vec(),
    }
}
