/*!
 * Tests for the glossary store
 */

use anyhow::Result;
use xlifflow::glossary::Glossary;

use crate::common;

/// Test a missing glossary file loads as empty
#[test]
fn test_load_withMissingFile_shouldBeEmpty() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let glossary = Glossary::load(&temp_dir.path().join("technical_terms.json"))?;
    assert!(glossary.is_empty());
    assert_eq!(glossary.lookup("anything"), None);
    Ok(())
}

/// Test lookups against a file in the workspace format
#[test]
fn test_lookup_withGlossaryFile_shouldFindTermsAndReportMissing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "technical_terms.json",
        r#"{ "coke oven": "焦炉", "Heat Recovery": "热回收" }"#,
    )?;

    let glossary = Glossary::load(&path)?;
    assert_eq!(glossary.len(), 2);
    assert_eq!(glossary.lookup("coke oven"), Some("焦炉"));
    assert_eq!(glossary.lookup("HEAT RECOVERY"), Some("热回收"));
    assert_eq!(glossary.lookup("blast furnace"), None);
    Ok(())
}

/// Test insert and save round-trip through the file
#[test]
fn test_insert_thenSave_shouldPersistSortedTerms() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("glossary").join("technical_terms.json");

    let mut glossary = Glossary::new();
    assert_eq!(glossary.insert("quenching", "熄焦"), None);
    assert_eq!(glossary.insert("battery", "炉组"), None);
    assert_eq!(glossary.insert("quenching", "湿熄焦"), Some("熄焦".to_string()));
    glossary.save(&path)?;

    let reloaded = Glossary::load(&path)?;
    let terms: Vec<_> = reloaded.iter().collect();
    assert_eq!(terms, vec![("battery", "炉组"), ("quenching", "湿熄焦")]);
    Ok(())
}

/// Test malformed glossary files are reported
#[test]
fn test_load_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "technical_terms.json", "[1, 2]")?;
    assert!(Glossary::load(&path).is_err());
    Ok(())
}
