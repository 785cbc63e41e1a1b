/*!
 * Tests running the xlifflow binary
 */

use anyhow::Result;
use std::path::Path;
use std::process::{Command, Output};

use crate::common;

// Run the binary against a workspace directory
fn run_cli(workspace: &Path, args: &[&str]) -> Result<Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_xlifflow"))
        .arg("--workspace")
        .arg(workspace)
        .args(args)
        .env_remove("XLIFFLOW_WORKSPACE")
        .output()?;
    Ok(output)
}

/// Test a missing glossary term is reported as not found without failing
#[test]
fn test_glossary_lookup_withMissingTerm_shouldPrintNotFoundAndSucceed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    run_cli(temp_dir.path(), &["init"])?;

    let output = run_cli(temp_dir.path(), &["glossary", "lookup", "blast furnace"])?;
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "not found");
    Ok(())
}

/// Test a stored glossary term is printed by lookup
#[test]
fn test_glossary_lookup_afterSet_shouldPrintTranslation() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let set = run_cli(temp_dir.path(), &["glossary", "set", "coke oven", "焦炉"])?;
    assert!(set.status.success());

    let output = run_cli(temp_dir.path(), &["glossary", "lookup", "Coke Oven"])?;
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "焦炉");
    Ok(())
}
