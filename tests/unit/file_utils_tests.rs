/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::fs;
use std::path::Path;
use xlifflow::file_utils::{FileManager, FileType};

use crate::common;

/// Test file existence checking
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file_path = common::create_test_file(temp_dir.path(), "test.txt", "Test content")?;

    assert!(FileManager::file_exists(&file_path));
    assert!(!FileManager::file_exists(temp_dir.path()));
    assert!(!FileManager::file_exists(temp_dir.path().join("missing.txt")));
    Ok(())
}

/// Test directory creation
#[test]
fn test_ensure_dir_withNestedPath_shouldCreateAllLevels() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b").join("c");

    FileManager::ensure_dir(&nested)?;
    assert!(FileManager::dir_exists(&nested));

    // Safe to call again
    FileManager::ensure_dir(&nested)?;
    Ok(())
}

/// Test final artifact naming
#[test]
fn test_generate_output_path_withExtension_shouldInsertLanguage() {
    let path = FileManager::generate_output_path("source/manual.sdlxliff", "final", "zh-CN");
    assert_eq!(path, Path::new("final/manual.zh-CN.sdlxliff"));

    let path = FileManager::generate_output_path("source/README", "final", "de");
    assert_eq!(path, Path::new("final/README.de"));
}

/// Test listing only returns files, sorted
#[test]
fn test_list_files_withMixedEntries_shouldReturnSortedFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "b.json", "{}")?;
    common::create_test_file(temp_dir.path(), "a.json", "{}")?;
    fs::create_dir(temp_dir.path().join("sub"))?;

    let files = FileManager::list_files(temp_dir.path())?;
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["a.json", "b.json"]);

    assert!(FileManager::list_files(temp_dir.path().join("missing"))?.is_empty());
    Ok(())
}

/// Test JSON helpers
#[test]
fn test_write_json_thenReadJson_shouldPreserveNonAsciiText() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested").join("terms.json");

    let mut value = std::collections::BTreeMap::new();
    value.insert("coke oven".to_string(), "焦炉".to_string());
    FileManager::write_json(&path, &value)?;

    let raw = FileManager::read_to_string(&path)?;
    assert!(raw.contains("焦炉"));

    let back: std::collections::BTreeMap<String, String> = FileManager::read_json(&path)?;
    assert_eq!(back, value);
    Ok(())
}

/// Test digest is stable and content-sensitive
#[test]
fn test_sha256_hex_withKnownContent_shouldMatchReference() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "abc.txt", "abc")?;

    assert_eq!(
        FileManager::sha256_hex(&path)?,
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    Ok(())
}

/// Test format detection by extension and by content
#[test]
fn test_detect_file_type_withVariousFiles_shouldDetectFormat() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let xliff = common::create_test_xliff(temp_dir.path(), "doc.sdlxliff", 1)?;
    assert_eq!(FileManager::detect_file_type(&xliff)?, FileType::Xliff);

    let sniffed = common::create_test_file(temp_dir.path(), "export.xml", &common::sample_xliff(1))?;
    assert_eq!(FileManager::detect_file_type(&sniffed)?, FileType::Xliff);

    let text = common::create_test_file(temp_dir.path(), "notes.txt", "hello\n")?;
    assert_eq!(FileManager::detect_file_type(&text)?, FileType::PlainText);

    let other = common::create_test_file(temp_dir.path(), "data.csv", "a,b\n")?;
    assert_eq!(FileManager::detect_file_type(&other)?, FileType::Unknown);

    assert!(FileManager::detect_file_type(temp_dir.path().join("missing.xlf")).is_err());
    Ok(())
}
