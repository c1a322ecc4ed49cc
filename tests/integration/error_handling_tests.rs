//! Fatal conditions: exit status, messages, and structured robot errors.

use super::fixture::TestFixture;
use crate::assert_exit_code;

#[test]
fn test_missing_toc_fails_with_path() {
    let fixture = TestFixture::standard("test_missing_toc_fails_with_path");
    fixture.repo.remove("Guide.docc/MigrationGuide.md");
    let output = fixture.output("skill");

    let result = fixture.run_packager(&["-o", output.to_str().unwrap()]);
    assert_exit_code!(result, 1);
    assert!(result.stderr.contains("TOC file not found"));
    assert!(result.stderr.contains("MigrationGuide.md"));
    assert!(!output.exists());
}

#[test]
fn test_no_resolvable_documents_is_distinct_error() {
    let fixture = TestFixture::standard("test_no_resolvable_documents_is_distinct_error");
    fixture.repo.create_toc("<doc:Renamed> <doc:AlsoRenamed>\n");

    let result = fixture.run_packager(&["--dry-run"]);
    assert_exit_code!(result, 1);
    assert!(result.stderr.contains("No documentation files found"));
    assert!(!result.stderr.contains("TOC file not found"));
}

#[test]
fn test_missing_license_is_fatal() {
    let fixture = TestFixture::standard("test_missing_license_is_fatal");
    fixture.repo.remove("LICENSE.txt");

    let result = fixture.run_packager(&["--dry-run"]);
    assert_exit_code!(result, 1);
    assert!(result.stderr.contains("LICENSE.txt, LICENSE.md, LICENSE"));
}

#[test]
fn test_missing_config_file_is_fatal() {
    let fixture = TestFixture::standard("test_missing_config_file_is_fatal");
    let missing = fixture.scratch().join("nope.toml");

    let result = fixture.run_packager(&["--config", missing.to_str().unwrap(), "--dry-run"]);
    assert_exit_code!(result, 1);
    assert!(result.stderr.contains("config file not found"));
}

#[test]
fn test_robot_error_is_structured() {
    let fixture = TestFixture::standard("test_robot_error_is_structured");
    fixture.repo.remove("Guide.docc/MigrationGuide.md");

    let result = fixture.run_packager(&["--robot", "--dry-run"]);
    assert_exit_code!(result, 1);

    let json = result.json();
    assert_eq!(json["error"], true);
    let details = &json["details"];
    assert_eq!(details["code"], "TOC_NOT_FOUND");
    assert_eq!(details["numeric_code"], 201);
    assert_eq!(details["category"], "structure");
    assert!(details["suggestion"].is_string());
    assert!(
        details["context"]["toc_path"]
            .as_str()
            .unwrap()
            .ends_with("MigrationGuide.md")
    );
}
