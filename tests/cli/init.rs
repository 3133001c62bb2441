use anyhow::{Context, Result};
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, run};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert!(
        parsed.get("ignores").is_some(),
        "Config should have 'ignores' field"
    );
    assert_eq!(parsed["extensions"], serde_json::json!(["swift"]));
    assert_eq!(parsed["failOnViolations"], Value::Bool(false));

    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = run(test.command().arg("--init"))?;

    assert_snapshot!(output.stdout.trim_end(), @"✓ Created .bangauditrc.json");
    assert_eq!(output.code, Some(0));
    assert!(test.root().join(".bangauditrc.json").exists());

    let content = test.read_file(".bangauditrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".bangauditrc.json", "{}")?;

    let output = run(test.command().arg("--init"))?;

    assert_snapshot!(output.stderr.trim_end(), @"error: .bangauditrc.json already exists");
    assert_eq!(output.code, Some(1));
    assert_eq!(test.read_file(".bangauditrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_with_paths_is_rejected() -> Result<()> {
    let test = CliTest::new()?;

    let output = run(test.command().args(["--init", "Sources"]))?;

    assert_eq!(output.code, Some(2));
    assert!(!test.root().join(".bangauditrc.json").exists());

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    run(test.command().arg("--init"))?;
    test.write_file("Sources/App.swift", "let a = b!\n")?;
    test.write_file(".build/debug/Gen.swift", "let c = d!\n")?;

    let output = run(test.command().arg("."))?;

    assert_eq!(
        output.code,
        Some(0),
        "Audit should work with initialized config. stderr: {}",
        output.stderr
    );
    assert!(output.stdout.contains("1 problem (1 error, 0 warnings)"));

    Ok(())
}
