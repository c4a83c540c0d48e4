//! End-to-end CLI tests for vdocs.
//!
//! These tests exercise the full CLI binary with isolated test environments.
//! Each test creates its own temporary data directory and config to ensure
//! isolation.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

// =============================================================================
// Test Environment Helper
// =============================================================================

/// Isolated test environment with its own data directory and config.
struct TestEnv {
    temp_dir: TempDir,
    data_path: PathBuf,
    config_path: PathBuf,
}

impl TestEnv {
    /// Create a new environment with no collections.
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();

        let data_path = root.join("data");
        fs::create_dir_all(&data_path).expect("Failed to create data dir");

        let config_path = root.join("config.toml");
        let config_content = format!(
            "[databases]\ndefault = \"local\"\n\n\
            [[databases.vector_databases]]\nname = \"local\"\ntype = \"local\"\npath = '{}'\n",
            data_path.display()
        );
        fs::write(&config_path, config_content).expect("Failed to write config");

        Self {
            temp_dir,
            data_path,
            config_path,
        }
    }

    /// Create an environment with a chunked PDF, its extracted images, a
    /// standalone note and two scratch collections.
    fn with_collections() -> Self {
        let env = Self::new();

        env.write_collection(
            "RagDocs",
            &json!([
                {
                    "id": "c0",
                    "content": "a".repeat(300),
                    "metadata": {
                        "metadata": r#"{"original_filename":"report.pdf","is_chunked":true,"total_chunks":2,"chunk_index":0,"filename":"report.pdf"}"#,
                        "lang": "en"
                    }
                },
                {
                    "id": "c1",
                    "content": "Second chunk",
                    "metadata": {
                        "metadata": r#"{"original_filename":"report.pdf","is_chunked":true,"total_chunks":2,"chunk_index":1,"filename":"report.pdf"}"#,
                        "lang": "fr"
                    }
                },
                {
                    "id": "n0",
                    "content": "Short note",
                    "metadata": { "filename": "notes.txt" }
                }
            ]),
        );

        env.write_collection(
            "RagImages",
            &json!([
                {
                    "id": "i0",
                    "content": "",
                    "metadata": { "url": "pdf://report.pdf/page_1/image_0", "image": "aGVsbG8=" }
                },
                {
                    "id": "i1",
                    "content": "",
                    "metadata": { "url": "pdf://other.pdf/page_2/image_0", "image": "aGVsbG8=" }
                }
            ]),
        );

        env.write_collection("tmp_one", &json!([]));
        env.write_collection("tmp_two", &json!([]));

        env
    }

    fn write_collection(&self, name: &str, records: &Value) {
        let contents = serde_json::to_string_pretty(records).expect("Failed to serialize");
        fs::write(self.data_path.join(format!("{name}.json")), contents)
            .expect("Failed to write collection");
    }

    fn collection_exists(&self, name: &str) -> bool {
        self.data_path.join(format!("{name}.json")).exists()
    }

    /// Get a Command configured for this test environment.
    fn command(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("vdocs");
        cmd.current_dir(self.temp_dir.path())
            .env("VDOCS_CONFIG", &self.config_path)
            .env_remove("ENV_FILE")
            .env_remove("RUST_LOG");
        cmd
    }
}

// =============================================================================
// 1. Help / No Command Tests
// =============================================================================

#[test]
fn tc_1_1_no_subcommand_shows_help() {
    let env = TestEnv::new();

    env.command()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("collection"))
        .stdout(predicate::str::contains("document"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn tc_1_2_help_flag() {
    let env = TestEnv::new();

    env.command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Inspect and manage vector store collections as documents",
        ));
}

#[test]
fn tc_1_3_version_flag() {
    let env = TestEnv::new();

    env.command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vdocs"));
}

// =============================================================================
// 2. Collection Command Tests
// =============================================================================

#[test]
fn tc_2_1_collection_list() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["collection", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 4 collections"))
        .stdout(predicate::str::contains("RagDocs (3 documents)"))
        .stdout(predicate::str::contains("tmp_two (0 documents)"))
        .stdout(predicate::str::contains("Virtual Summary").not());
}

#[test]
fn tc_2_2_collection_list_empty() {
    let env = TestEnv::new();

    env.command()
        .args(["collection", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No collections found"));
}

#[test]
fn tc_2_3_collection_list_virtual() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["collection", "list", "--virtual"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Virtual Summary:"))
        .stdout(predicate::str::contains("Chunked Documents: 1 (2 chunks)"))
        .stdout(predicate::str::contains("Image Stacks: 2"));
}

#[test]
fn tc_2_4_collection_count() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["collection", "count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 collections"));
}

#[test]
fn tc_2_5_collection_show() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["collection", "show", "RagDocs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Collection: RagDocs"))
        .stdout(predicate::str::contains("Documents: 3"))
        .stdout(predicate::str::contains("Sample document (ID: c0)"))
        .stdout(predicate::str::contains("lang (string)"));
}

#[test]
fn tc_2_6_collection_show_missing() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["collection", "show", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Collection not found: Nope"));
}

#[test]
fn tc_2_7_collection_delete_pattern_dry_run() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["collection", "delete", "--pattern", "tmp_*", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would delete 2 collection(s)"))
        .stdout(predicate::str::contains("  - tmp_one"))
        .stdout(predicate::str::contains("Dry run: nothing was deleted"));

    assert!(env.collection_exists("tmp_one"));
    assert!(env.collection_exists("tmp_two"));
}

#[test]
fn tc_2_8_collection_delete_glob() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["collection", "delete", "--pattern", "tmp_*", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 deleted, 0 failed"));

    assert!(!env.collection_exists("tmp_one"));
    assert!(!env.collection_exists("tmp_two"));
    assert!(env.collection_exists("RagDocs"));
}

#[test]
fn tc_2_9_collection_delete_auto_regex() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["collection", "delete", "--pattern", "^tmp_(one)$", "-f"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted collection 'tmp_one'"));

    assert!(!env.collection_exists("tmp_one"));
    assert!(env.collection_exists("tmp_two"));
}

#[test]
fn tc_2_10_collection_delete_invalid_forced_regex() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["collection", "delete", "--pattern", "([", "--regex"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid regex pattern"));
}

#[test]
fn tc_2_11_collection_delete_requires_selection() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["collection", "delete"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Specify collection names or --pattern"));
}

#[test]
fn tc_2_12_collection_delete_reports_failures() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["collection", "delete", "tmp_one", "Missing"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Deleted collection 'tmp_one'"))
        .stdout(predicate::str::contains("Failed to delete collection 'Missing'"))
        .stderr(predicate::str::contains("1 collection(s) could not be deleted"));

    assert!(!env.collection_exists("tmp_one"));
}

#[test]
fn tc_2_13_collection_delete_stays_inside_data_dir() {
    let env = TestEnv::with_collections();
    let outside = env.temp_dir.path().join("outside.json");
    fs::write(&outside, "[]").expect("Failed to write outside file");

    env.command()
        .args(["collection", "delete", "../outside", "tmp_one"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Failed to delete collection '../outside'"))
        .stdout(predicate::str::contains("Deleted collection 'tmp_one'"))
        .stderr(predicate::str::contains("1 collection(s) could not be deleted"));

    assert!(outside.exists());
    assert!(env.collection_exists("RagDocs"));
}

#[test]
fn tc_2_14_collection_delete_pattern_needs_confirmation() {
    let env = TestEnv::with_collections();

    // No terminal to answer the prompt, so the delete is cancelled
    env.command()
        .args(["collection", "delete", "--pattern", "tmp_*"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deletion cancelled"))
        .stdout(predicate::str::contains("Deleted").not());

    assert!(env.collection_exists("tmp_one"));
    assert!(env.collection_exists("tmp_two"));
}

#[test]
fn tc_2_15_collection_delete_all() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["collection", "delete-all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deletion cancelled"));
    assert!(env.collection_exists("RagDocs"));

    env.command()
        .args(["collection", "delete-all", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 deleted, 0 failed"));

    env.command()
        .args(["collection", "count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 collections"));
}

#[test]
fn tc_2_16_collection_show_json() {
    let env = TestEnv::with_collections();

    let output = env
        .command()
        .args(["collection", "show", "RagImages", "--json"])
        .output()
        .expect("Failed to run vdocs");
    assert!(output.status.success());

    let details: Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(details["name"], "RagImages");
    assert_eq!(details["records"], 2);
    assert_eq!(details["summary"]["total_images"], 2);
    assert_eq!(details["summary"]["image_stacks"], 2);
    assert_eq!(details["sample"]["id"], "i0");
}

// =============================================================================
// 3. Document Command Tests
// =============================================================================

#[test]
fn tc_3_1_document_list() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["document", "list", "RagDocs"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Found 3 documents in collection 'RagDocs'",
        ))
        .stdout(predicate::str::contains("1. ID: c0"))
        .stdout(predicate::str::contains("filename: notes.txt"));
}

#[test]
fn tc_3_2_document_list_limit() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["document", "list", "RagDocs", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 documents"))
        .stdout(predicate::str::contains("ID: c1").not());
}

#[test]
fn tc_3_3_document_list_virtual_merges_images() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["document", "list", "RagDocs", "--virtual"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Found 3 virtual documents in collection 'RagDocs' (aggregated from 5 total documents)",
        ))
        .stdout(predicate::str::contains("Document: report.pdf [chunked]"))
        .stdout(predicate::str::contains("Document: other.pdf [images]"))
        .stdout(predicate::str::contains("Document: notes.txt [standalone]"));
}

#[test]
fn tc_3_4_document_list_summary_requires_virtual() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["document", "list", "RagDocs", "--summary"])
        .assert()
        .failure();

    env.command()
        .args(["document", "list", "RagDocs", "--virtual", "--summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary:"));
}

#[test]
fn tc_3_5_long_content_is_truncated() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["document", "show", "RagDocs", "c0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("... (truncated, 100 more characters)"));
}

#[test]
fn tc_3_6_no_truncate_shows_everything() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["document", "show", "RagDocs", "c0", "--no-truncate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a".repeat(300)))
        .stdout(predicate::str::contains("truncated").not());
}

#[test]
fn tc_3_7_document_show_by_id() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["document", "show", "RagDocs", "c1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Document 'c1' in collection 'RagDocs'",
        ))
        .stdout(predicate::str::contains("lang: fr"));
}

#[test]
fn tc_3_8_document_show_missing_id() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["document", "show", "RagDocs", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Record 'ghost' not found"));
}

#[test]
fn tc_3_9_document_show_by_metadata() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["document", "show", "RagDocs", "--metadata", "lang=fr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Document 'c1'"))
        .stdout(predicate::str::contains("Document 'c0'").not());
}

#[test]
fn tc_3_10_document_show_invalid_metadata_filter() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["document", "show", "RagDocs", "--metadata", "langfr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid metadata filter format: langfr"));
}

#[test]
fn tc_3_11_document_count() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["document", "count", "RagImages"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "2 documents in collection 'RagImages'",
        ));
}

#[test]
fn tc_3_12_document_delete_pattern_dry_run() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["document", "delete", "RagDocs", "--pattern", "*.pdf", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would delete 2 document(s)"))
        .stdout(predicate::str::contains("  - c0"))
        .stdout(predicate::str::contains("  - n0").not());

    env.command()
        .args(["document", "count", "RagDocs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 documents"));
}

#[test]
fn tc_3_13_document_delete_original_spans_image_collection() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["document", "delete", "RagDocs", "--original", "report.pdf", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 deleted, 0 failed"));

    env.command()
        .args(["document", "count", "RagImages"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 documents"));
}

#[test]
fn tc_3_14_document_delete_original_dry_run() {
    let env = TestEnv::with_collections();

    env.command()
        .args([
            "document",
            "delete",
            "RagDocs",
            "--original",
            "report.pdf",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("  - i0 (RagImages)"))
        .stdout(predicate::str::contains("  - c1 (RagDocs)"));
}

#[test]
fn tc_3_15_document_delete_is_best_effort() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["document", "delete", "RagDocs", "c0", "ghost", "n0"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Deleted document 'c0'"))
        .stdout(predicate::str::contains("Failed to delete document 'ghost'"))
        .stdout(predicate::str::contains("Deleted document 'n0'"));

    env.command()
        .args(["document", "count", "RagDocs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 documents"));
}

#[test]
fn tc_3_16_document_delete_by_metadata() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["document", "delete", "RagDocs", "--metadata", "lang=en", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted document 'c0'"))
        .stdout(predicate::str::contains("1 deleted, 0 failed"));
}

#[test]
fn tc_3_17_document_delete_requires_selection() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["document", "delete", "RagDocs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Specify document IDs"));
}

#[test]
fn tc_3_18_invalid_collection_name() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["document", "list", "Rag/Docs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid character"));
}

#[test]
fn tc_3_19_document_show_by_name() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["document", "show", "RagDocs", "--name", "report.pdf"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Document 'report.pdf' in collection 'RagDocs' [chunked]:",
        ))
        .stdout(predicate::str::contains("1. ID: c0"))
        .stdout(predicate::str::contains("2. ID: c1"))
        .stdout(predicate::str::contains(
            "Document 'report.pdf' in collection 'RagImages' [images]:",
        ))
        .stdout(predicate::str::contains("1. ID: i0"))
        .stdout(predicate::str::contains("ID: n0").not());
}

#[test]
fn tc_3_20_document_show_filename_with_schema() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["document", "show", "RagDocs", "--filename", "notes.txt", "--schema"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. ID: n0"))
        .stdout(predicate::str::contains("Schema:"))
        .stdout(predicate::str::contains("filename (string)"));

    env.command()
        .args(["document", "show", "RagDocs", "c1", "--schema"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lang (string)"));

    env.command()
        .args(["document", "show", "RagDocs", "--name", "missing.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No document named 'missing.pdf'"));
}

#[test]
fn tc_3_21_document_count_several_collections() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["document", "count", "RagDocs", "RagImages"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 documents in collection 'RagDocs'"))
        .stdout(predicate::str::contains("2 documents in collection 'RagImages'"))
        .stdout(predicate::str::contains("Total: 5 documents"));

    env.command()
        .args(["document", "count", "RagDocs", "Nope"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("3 documents in collection 'RagDocs'"))
        .stdout(predicate::str::contains("Failed to count collection 'Nope'"))
        .stderr(predicate::str::contains("1 collection(s) could not be counted"));
}

#[test]
fn tc_3_22_document_delete_all() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["document", "delete-all", "RagDocs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deletion cancelled"));

    env.command()
        .args(["document", "delete-all", "RagDocs", "-f"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 deleted, 0 failed"));

    assert!(env.collection_exists("RagDocs"));
    env.command()
        .args(["document", "count", "RagDocs", "RagImages"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 documents in collection 'RagDocs'"))
        .stdout(predicate::str::contains("2 documents in collection 'RagImages'"));
}

#[test]
fn tc_3_23_bulk_document_delete_needs_confirmation() {
    let env = TestEnv::with_collections();

    for args in [
        vec!["document", "delete", "RagDocs", "--pattern", "*.pdf"],
        vec!["document", "delete", "RagDocs", "--metadata", "lang=en"],
        vec!["document", "delete", "RagDocs", "--name", "report.pdf"],
    ] {
        env.command()
            .args(&args)
            .assert()
            .success()
            .stdout(predicate::str::contains("Deletion cancelled"));
    }

    env.command()
        .args(["document", "count", "RagDocs", "RagImages"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 5 documents"));
}

#[test]
fn tc_3_24_document_delete_stays_inside_data_dir() {
    let env = TestEnv::with_collections();
    let outside = env.temp_dir.path().join("x.json");
    let contents = r#"[{"id":"a","content":"","metadata":{}}]"#;
    fs::write(&outside, contents).expect("Failed to write outside file");

    for args in [
        vec!["document", "delete", "../x", "a"],
        vec!["document", "delete", "../x", "--original", "a", "--force"],
        vec!["document", "delete-all", "../x", "--force"],
    ] {
        env.command().args(&args).assert().failure();
    }

    assert_eq!(fs::read_to_string(&outside).unwrap(), contents);
}

// =============================================================================
// 4. Configuration Tests
// =============================================================================

#[test]
fn tc_4_1_config_show() {
    let env = TestEnv::new();

    env.command()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("local (default)"))
        .stdout(predicate::str::contains("type: local"))
        .stdout(predicate::str::contains("short_lines: 5"));
}

#[test]
fn tc_4_2_unknown_database() {
    let env = TestEnv::with_collections();

    env.command()
        .args(["collection", "list", "--db", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Database 'nope' not found"));
}

#[test]
fn tc_4_3_explicit_config_not_found() {
    let env = TestEnv::new();

    env.command()
        .args(["collection", "list", "--config", "/nonexistent/vdocs.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn tc_4_4_invalid_config_toml() {
    let env = TestEnv::new();
    fs::write(&env.config_path, "this is not [valid toml").expect("Failed to write config");

    env.command()
        .args(["collection", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn tc_4_5_memory_database() {
    let env = TestEnv::new();
    fs::write(
        &env.config_path,
        "[[databases.vector_databases]]\nname = \"mem\"\ntype = \"memory\"\ncollections = [\"Scratch\"]\n",
    )
    .expect("Failed to write config");

    env.command()
        .args(["collection", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Scratch (0 documents)"));
}

#[test]
fn tc_4_6_env_file_interpolation() {
    let env = TestEnv::with_collections();
    fs::write(
        &env.config_path,
        "[[databases.vector_databases]]\nname = \"local\"\ntype = \"local\"\npath = \"${VDOCS_E2E_DATA}\"\napi_key = \"${VDOCS_E2E_KEY:-fallback-key}\"\n",
    )
    .expect("Failed to write config");

    let env_file = env.temp_dir.path().join("test.env");
    fs::write(
        &env_file,
        format!("VDOCS_E2E_DATA={}\n", env.data_path.display()),
    )
    .expect("Failed to write env file");

    env.command()
        .arg("--env-file")
        .arg(&env_file)
        .args(["collection", "count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 collections"));

    env.command()
        .arg("--env-file")
        .arg(&env_file)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api_key: ********-key"));
}

#[test]
fn tc_4_7_missing_env_file_fails() {
    let env = TestEnv::new();

    env.command()
        .args(["config", "show", "--env-file", "/nonexistent/.env"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load env file"));
}
