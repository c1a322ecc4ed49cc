//! End-to-end packaging against an on-disk guide repository.

use std::fs::File;
use std::io::Read;

use skill_packager::config::PackagerConfig;
use skill_packager::packager::{BuildOptions, SkillPackager};
use skill_packager::test_utils::logging::{Level, RecordingLog};

use super::fixture::TestFixture;
use crate::{assert_exit_code, assert_file_contains, assert_file_exists};

#[test]
fn test_library_build_produces_full_layout() {
    let fixture = TestFixture::standard("test_library_build_produces_full_layout");
    let config = PackagerConfig::default();
    let log = RecordingLog::new();
    let output = fixture.output("skill");

    let report = SkillPackager::new(
        &config,
        BuildOptions {
            output_path: output.clone(),
            dry_run: false,
        },
        &log,
    )
    .build(fixture.repo.path())
    .unwrap();

    assert_file_exists!(&output.join("SKILL.md"));
    assert_file_exists!(&output.join("Guide/DataRaceSafety.md"));
    assert_file_exists!(&output.join("Guide/MigrationStrategy.md"));
    assert_file_exists!(&output.join("Examples/Actor_Isolation.swift"));
    assert_file_exists!(&output.join("LICENSE.txt"));
    assert!(!output.join("Guide/MigrationGuide.md").exists());

    let index = output.join("SKILL.md");
    assert_file_contains!(&index, "- **Data Race Safety** ([Guide/DataRaceSafety.md](Guide/DataRaceSafety.md)): Learn about the fundamental concepts Swift uses.");
    assert_file_contains!(&index, "- **Migration Strategy** ([Guide/MigrationStrategy.md](Guide/MigrationStrategy.md)): Get started migrating your project.");
    assert_file_contains!(&index, "- **Actor_Isolation.swift** ([Examples/Actor_Isolation.swift](Examples/Actor_Isolation.swift)): Demonstrates actor isolation.");
    assert_file_contains!(&index, "[Apache 2.0 License](LICENSE.txt)");

    let archive_path = report.archive_path.clone().unwrap();
    assert_eq!(archive_path, fixture.output("skill.zip"));
    let mut archive = zip::ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "skill/",
            "skill/Examples/",
            "skill/Examples/Actor_Isolation.swift",
            "skill/Guide/",
            "skill/Guide/DataRaceSafety.md",
            "skill/Guide/MigrationStrategy.md",
            "skill/LICENSE.txt",
            "skill/SKILL.md",
        ]
    );

    let mut archived_index = String::new();
    archive
        .by_name("skill/SKILL.md")
        .unwrap()
        .read_to_string(&mut archived_index)
        .unwrap();
    assert_eq!(archived_index, std::fs::read_to_string(&index).unwrap());

    for message in [
        "Processed 2 documentation files",
        "Processed 1 example files",
        "Included license: LICENSE.txt",
        "Archive created:",
        "Packaging complete",
    ] {
        assert!(log.contains(Level::Info, message), "missing log line: {message}");
    }
}

#[test]
fn test_copied_files_are_byte_identical() {
    let fixture = TestFixture::standard("test_copied_files_are_byte_identical");
    let output = fixture.output("skill");

    let result = fixture.run_packager(&["-o", output.to_str().unwrap()]);
    assert_exit_code!(result, 0);

    for (source, copied) in [
        ("Guide.docc/DataRaceSafety.md", "Guide/DataRaceSafety.md"),
        ("Sources/Examples/Actor+Isolation.swift", "Examples/Actor_Isolation.swift"),
        ("LICENSE.txt", "LICENSE.txt"),
    ] {
        assert_eq!(
            std::fs::read(fixture.repo.path().join(source)).unwrap(),
            std::fs::read(output.join(copied)).unwrap(),
            "{copied} differs from {source}"
        );
    }
}

#[test]
fn test_cli_dry_run_writes_nothing() {
    let fixture = TestFixture::standard("test_cli_dry_run_writes_nothing");
    let output = fixture.output("skill");

    let result = fixture.run_packager(&["--dry-run", "-o", output.to_str().unwrap()]);
    assert_exit_code!(result, 0);
    assert!(!output.exists());
    assert!(!fixture.output("skill.zip").exists());
    assert!(result.stderr.contains("Processed 2 documentation files"));
    assert!(result.stderr.contains("Processed 1 example files"));
}

#[test]
fn test_cli_default_output_under_working_directory() {
    let fixture = TestFixture::standard("test_cli_default_output_under_working_directory");

    let result = fixture.run_packager(&[]);
    assert_exit_code!(result, 0);
    assert_file_exists!(&fixture.scratch().join("migrating-to-swift-concurrency/SKILL.md"));
    assert_file_exists!(&fixture.scratch().join("migrating-to-swift-concurrency.zip"));
}

#[test]
fn test_rerun_replaces_previous_output() {
    let fixture = TestFixture::standard("test_rerun_replaces_previous_output");
    let output = fixture.output("skill");
    let output_arg = output.to_str().unwrap();

    assert_exit_code!(fixture.run_packager(&["-o", output_arg]), 0);
    std::fs::write(output.join("Guide/Leftover.md"), "stale").unwrap();
    fixture.repo.remove("Sources/Examples/Actor+Isolation.swift");

    let result = fixture.run_packager(&["-o", output_arg]);
    assert_exit_code!(result, 0);
    assert!(!output.join("Guide/Leftover.md").exists());
    assert!(!output.join("Examples").exists());
    assert!(result.stderr.contains("No example files found in Sources/Examples"));

    let index = std::fs::read_to_string(output.join("SKILL.md")).unwrap();
    assert!(!index.contains("## Code Examples"));
}

#[test]
fn test_config_file_changes_layout_and_frontmatter() {
    let fixture = TestFixture::new("test_config_file_changes_layout_and_frontmatter");
    fixture.repo.create_file("Docs/Index.md", "<doc:Intro>\n");
    fixture.repo.create_file("Docs/Intro.md", "# Intro\n\nStart here.\n");
    fixture.repo.create_file("Samples/one.kt", "// Kotlin sample\n");
    fixture.repo.create_file("LICENSE", "MIT\n");

    let config_path = fixture.scratch().join("packager.toml");
    std::fs::write(
        &config_path,
        r#"
[source]
guide_dir = "Docs"
toc_file = "Index.md"
examples_dir = "Samples"
example_extension = "kt"

[skill]
name = "kotlin-guide"
"#,
    )
    .unwrap();

    let output = fixture.output("kotlin-guide");
    let result = fixture.run_packager(&[
        "--config",
        config_path.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    assert_exit_code!(result, 0);

    let index = output.join("SKILL.md");
    assert_file_contains!(&index, "name: kotlin-guide");
    assert_file_contains!(&index, "- **Intro** ([Guide/Intro.md](Guide/Intro.md)): Start here.");
    assert_file_contains!(&index, "- **one.kt** ([Examples/one.kt](Examples/one.kt)): Kotlin sample");
    assert_file_contains!(&index, "[Apache 2.0 License](LICENSE)");
}

#[test]
fn test_robot_report_is_json() {
    let fixture = TestFixture::standard("test_robot_report_is_json");
    let output = fixture.output("skill");

    let result = fixture.run_packager(&["--robot", "-o", output.to_str().unwrap()]);
    assert_exit_code!(result, 0);

    let json = result.json();
    assert_eq!(json["skill_name"], "migrating-to-swift-concurrency");
    assert_eq!(json["document_count"], 2);
    assert_eq!(json["example_count"], 1);
    assert_eq!(json["license_file"], "LICENSE.txt");
    assert_eq!(json["dry_run"], false);
    assert!(json["archive_path"].as_str().unwrap().ends_with("skill.zip"));
    assert!(json.get("retained_temp_dir").is_none());
    assert_eq!(json["registry"]["documents"][0]["title"], "Data Race Safety");
}
