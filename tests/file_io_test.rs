use inistore::{IniError, IniOptions, IniReader};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.ini");

    let mut reader = IniReader::new();
    reader.set("General", "name", "demo");
    reader.set_long("General", "port", 8080);
    reader.set("Extra", "tag", "a");
    reader.set("Extra", "tag", "b");
    reader.to_file(&path).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("[General]\nname = demo\n"));

    let loaded = IniReader::from_file(&path).unwrap();
    assert_eq!(loaded.store(), reader.store());
    assert_eq!(loaded.get_long("General", "port"), 8080);
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = IniReader::from_file(dir.path().join("absent.ini")).unwrap_err();
    assert!(matches!(err, IniError::Io { .. }));
}

#[test]
fn test_parse_file_with_filter() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("filtered.ini");
    fs::write(&path, "[keep]\na = 1\n[drop]\nb = 2\n").unwrap();

    let mut reader = IniReader::with_options(IniOptions::new().exclude("drop"));
    reader.parse_file(&path).unwrap();

    assert_eq!(reader.section_names(), vec!["keep"]);
}

#[test]
fn test_invalid_utf8_is_replaced() {
    let mut reader = IniReader::new();
    reader.parse_bytes(b"[s]\nname = caf\xe9\nother = x\n").unwrap();

    assert_eq!(reader.get("s", "name"), "caf\u{FFFD}");
}

#[cfg(feature = "encoding")]
#[test]
fn test_gbk_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gbk.ini");

    let options = IniOptions::new().encoding(encoding_rs::GBK);
    let mut reader = IniReader::with_options(options.clone());
    reader.set("节点", "名称", "香港");
    reader.to_file(&path).unwrap();

    let raw = fs::read(&path).unwrap();
    assert!(std::str::from_utf8(&raw).is_err());

    let mut loaded = IniReader::with_options(options);
    loaded.parse_file(&path).unwrap();
    assert_eq!(loaded.get("节点", "名称"), "香港");
}
