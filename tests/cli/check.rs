use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{CliTest, run};

const HINT: &str =
    "   = hint: unwrap with `if let` or `guard let`, or end the line with `// audit:ignore`";

const MAIN_SWIFT: &str = r#"import Foundation

func maybeReturn() -> Int? {
    return 4
}

func main() {
    print("this is a test file")

    let notOkay = maybeReturn()!

    let inlineCommentOkay = maybeReturn()! // audit:ignore

    // audit:disable
    let blockCommentOkay = maybeReturn()!
    let blockCommentAlsoOkay = maybeReturn()!
    // audit:enable

    let anotherNotOkay = maybeReturn()!

    let notOkayBool = true as! Bool
    print(notOkayBool)

    print(
      "All of them: \(notOkay), \(inlineCommentOkay), \(blockCommentOkay), \(blockCommentAlsoOkay), \(anotherNotOkay)"
    )
}
"#;

/// Expected diagnostic block for one violation with a two-digit gutter.
fn violation_block(location: &str, line: usize, trimmed: &str, caret_padding: usize) -> String {
    format!(
        "error: unsafe '!' operator  unsafe-operator\n  --> {location}\n   |\n{line} | {trimmed}\n   | {}^\n{HINT}\n\n",
        " ".repeat(caret_padding)
    )
}

#[test]
fn test_reports_flagged_lines() -> Result<()> {
    let test = CliTest::with_file("Sources/main.swift", MAIN_SWIFT)?;

    let output = run(test.command().arg("Sources"))?;

    let expected = [
        violation_block(
            "Sources/main.swift:10:32",
            10,
            "let notOkay = maybeReturn()!",
            27,
        ),
        violation_block(
            "Sources/main.swift:19:39",
            19,
            "let anotherNotOkay = maybeReturn()!",
            34,
        ),
        violation_block(
            "Sources/main.swift:21:30",
            21,
            "let notOkayBool = true as! Bool",
            25,
        ),
        "\u{2718} 3 problems (3 errors, 0 warnings)\n".to_string(),
    ]
    .concat();

    assert_eq!(output.stdout, expected);
    assert_eq!(output.stderr, "");
    assert_eq!(output.code, Some(0));

    Ok(())
}

#[test]
fn test_clean_file() -> Result<()> {
    let test = CliTest::with_file(
        "Sources/App.swift",
        r#"
guard let value = optional else { return }
if !flag && a != b {
    print("done!")
}
let forced = value! // audit:ignore
"#,
    )?;

    let output = run(test.command().arg("Sources"))?;

    assert_snapshot!(output.stdout.trim_end(), @"✓ Checked 1 file - no violations found");
    assert_eq!(output.code, Some(0));

    Ok(())
}

#[test]
fn test_no_paths_prints_usage() -> Result<()> {
    let test = CliTest::new()?;

    let output = run(&mut test.command())?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Usage: bang-audit"));
    assert_eq!(output.stdout, "");

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = run(test.command().arg("--help"))?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("--fail-on-violations"));
    assert!(output.stdout.contains("--format <FORMAT>"));
    assert!(output.stdout.contains("BANG_AUDIT_FAIL_ON_VIOLATIONS"));

    Ok(())
}

#[test]
fn test_fail_on_violations_flag() -> Result<()> {
    let test = CliTest::with_file("App.swift", "let a = b!\n")?;

    let output = run(test.command().args(["--fail-on-violations", "App.swift"]))?;
    assert_eq!(output.code, Some(1));

    let clean = CliTest::with_file("App.swift", "let a = b\n")?;
    let output = run(clean.command().args(["--fail-on-violations", "App.swift"]))?;
    assert_eq!(output.code, Some(0));

    Ok(())
}

#[test]
fn test_fail_on_violations_env() -> Result<()> {
    let test = CliTest::with_file("App.swift", "let a = b!\n")?;

    let output = run(test
        .command()
        .env("BANG_AUDIT_FAIL_ON_VIOLATIONS", "true")
        .arg("App.swift"))?;

    assert_eq!(output.code, Some(1));

    Ok(())
}

#[test]
fn test_fail_on_violations_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".bangauditrc.json", r#"{ "failOnViolations": true }"#)?;
    test.write_file("Sources/App.swift", "let a = b!\n")?;

    // Config is found by searching upward from a subdirectory.
    let output = run(test
        .command()
        .current_dir(test.root().join("Sources"))
        .arg("App.swift"))?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("--> App.swift:1:10"));

    Ok(())
}

#[test]
fn test_explicit_config_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "configs/strict.json",
        r#"{ "ignores": ["**/Generated/**"], "failOnViolations": true }"#,
    )?;
    test.write_file("Sources/App.swift", "let a = b!\n")?;
    test.write_file("Sources/Generated/Api.swift", "let c = d!\n")?;

    let output = run(test
        .command()
        .args(["--config", "configs/strict.json", "Sources"]))?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("Sources/App.swift:1:10"));
    assert!(!output.stdout.contains("Api.swift"));
    assert!(output.stdout.contains("1 problem (1 error, 0 warnings)"));

    Ok(())
}

#[test]
fn test_config_ignores() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".bangauditrc.json",
        r#"{
         "ignores": ["**/Generated/**", "Sources/Legacy"]
     }"#,
    )?;
    test.write_file("Sources/App.swift", "let a = b\n")?;
    test.write_file("Sources/Generated/Api.swift", "let c = d!\n")?;
    test.write_file("Sources/Legacy/Old.swift", "let e = f!\n")?;

    let output = run(test.command().arg("Sources"))?;

    assert_snapshot!(output.stdout.trim_end(), @"✓ Checked 1 file - no violations found");
    assert_eq!(output.code, Some(0));

    Ok(())
}

#[test]
fn test_default_ignores_skip_build_products() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Sources/App.swift", "let a = b!\n")?;
    test.write_file(".build/checkouts/Dep/Dep.swift", "let c = d!\n")?;
    test.write_file("Pods/Lib/Lib.swift", "let e = f!\n")?;

    let output = run(test.command().arg("."))?;

    assert!(output.stdout.contains("Sources/App.swift:1:10"));
    assert!(!output.stdout.contains("Dep.swift"));
    assert!(!output.stdout.contains("Lib.swift"));

    Ok(())
}

#[test]
fn test_only_swift_files_in_directories() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Sources/App.swift", "let a = b\n")?;
    test.write_file("Sources/notes.txt", "really!\n")?;
    test.write_file("Sources/Info.plist", "<true/>!\n")?;

    let output = run(test.command().arg("Sources"))?;

    assert_snapshot!(output.stdout.trim_end(), @"✓ Checked 1 file - no violations found");

    Ok(())
}

#[test]
fn test_parse_failure_does_not_stop_audit() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Sources/Bad.swift", "func f() {\n")?;
    test.write_file("Sources/Good.swift", "let x = y!\n")?;

    let output = run(test.command().args(["--fail-on-violations", "Sources"]))?;

    let expected = "\
warning: could not parse file  parse-error
  --> Sources/Bad.swift
  = note: unclosed '{' opened at 1:10

error: unsafe '!' operator  unsafe-operator
  --> Sources/Good.swift:1:10
  |
1 | let x = y!
  |          ^
  = hint: unwrap with `if let` or `guard let`, or end the line with `// audit:ignore`

\u{2718} 2 problems (1 error, 1 warning)
";
    assert_eq!(output.stdout, expected);
    assert_eq!(
        output.stderr,
        "warning: 1 file(s) could not be scanned (use -v for details)\n"
    );
    assert_eq!(output.code, Some(1));

    Ok(())
}

#[test]
fn test_parse_failure_alone_is_not_a_violation() -> Result<()> {
    let test = CliTest::with_file("Bad.swift", "let s = \"open\n")?;

    let output = run(test.command().args(["--fail-on-violations", "Bad.swift"]))?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("could not parse file"));
    assert!(output.stdout.contains("unterminated string literal"));

    Ok(())
}

#[test]
fn test_missing_path() -> Result<()> {
    let test = CliTest::new()?;

    let output = run(test.command().arg("Nowhere"))?;

    assert!(output.stdout.contains("warning: could not read file  io-error"));
    assert!(output.stdout.contains("  --> Nowhere\n"));
    assert!(output.stdout.contains("1 problem (0 errors, 1 warning)"));
    assert_eq!(output.code, Some(0));

    Ok(())
}

#[test]
fn test_verbose_notes() -> Result<()> {
    let test = CliTest::with_file("App.swift", "let a = b\n")?;

    let output = run(test.command().args(["-v", "App.swift"]))?;

    assert!(
        output
            .stderr
            .contains("note: No .bangauditrc.json found, using default configuration")
    );
    assert!(output.stderr.contains("note: Auditing 1 file(s)"));

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".bangauditrc.json", r#"{ "ignores": ["**/[bad"] }"#)?;
    test.write_file("App.swift", "let a = b!\n")?;

    let output = run(test.command().arg("App.swift"))?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.starts_with("error: "));
    assert!(output.stderr.contains("Invalid glob pattern in 'ignores'"));
    assert_eq!(output.stdout, "");

    Ok(())
}

#[test]
fn test_malformed_config_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".bangauditrc.json", "{ not json")?;
    test.write_file("App.swift", "let a = b\n")?;

    let output = run(test.command().arg("App.swift"))?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Failed to parse config file"));

    Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Sources/main.swift", MAIN_SWIFT)?;
    test.write_file("Sources/Bad.swift", "let s = \"open\n")?;

    let output = run(test.command().args(["--format", "json", "Sources"]))?;
    let value: Value = serde_json::from_str(&output.stdout)?;

    assert_eq!(
        value["summary"],
        json!({ "filesChecked": 2, "violationCount": 3, "errorCount": 1 })
    );
    assert_eq!(
        value["violations"][0],
        json!({
            "path": "Sources/main.swift",
            "line": 10,
            "column": 32,
            "source": "let notOkay = maybeReturn()!"
        })
    );
    assert_eq!(value["errors"][0]["path"], json!("Sources/Bad.swift"));
    assert_eq!(value["errors"][0]["kind"], json!("parse"));
    assert_eq!(output.stderr, "");
    assert_eq!(output.code, Some(0));

    Ok(())
}

#[test]
fn test_explicit_file_is_audited_regardless_of_extension() -> Result<()> {
    let test = CliTest::with_file("Scripts/run.swiftscript", "let a = b!\n")?;

    let output = run(test.command().arg("Scripts/run.swiftscript"))?;

    assert!(output.stdout.contains("--> Scripts/run.swiftscript:1:10"));

    Ok(())
}
