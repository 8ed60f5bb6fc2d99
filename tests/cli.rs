use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use sha1::{Digest, Sha1};
use tempfile::tempdir;

fn nomad() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("nomad"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Cache with `full` non-empty and `empty` empty documents
fn seed_cache(root: &Path, full: usize, empty: usize) {
    for i in 0..full {
        write_file(
            &root.join(format!("full/{i}.json")),
            &format!(r#"[{{"place_id": {i}, "display_name": "Place {i}"}}]"#),
        );
    }
    for i in 0..empty {
        let content = if i % 2 == 0 { "[]" } else { "{}" };
        write_file(&root.join(format!("empty_{i}.json")), content);
    }
}

/// Seed the default cache under `dir` with a Nominatim point-geocode response
fn seed_geocode_response(dir: &Path, query: &str, response: &str) {
    let key = format!(
        "https://nominatim.openstreetmap.org/search?format=json&limit=1&dedupe=0&q={query}"
    );
    let digest = format!("{:x}", Sha1::digest(key.as_bytes()));
    write_file(
        &dir.join(".nomad/osmnx/cache").join(format!("{digest}.json")),
        response,
    );
}

fn count_json(root: &Path) -> usize {
    walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|x| x == "json").unwrap_or(false))
        .count()
}

// ============== usage ==============

#[test]
fn no_arguments_prints_usage() {
    nomad()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn geocode_without_location_prints_usage() {
    nomad()
        .arg("geocode")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn cache_without_action_prints_usage() {
    nomad()
        .arg("cache")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag() {
    nomad()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("nomad "));
}

// ============== geocode / download ==============

#[test]
fn geocode_dry_run_echoes_location() {
    nomad()
        .args(["--dry-run", "geocode", "Paris, France"])
        .assert()
        .success()
        .stdout("Paris, France\n");
}

#[test]
fn geocode_dry_run_flag_after_subcommand() {
    nomad()
        .args(["geocode", "--dry-run", "Paris, France"])
        .assert()
        .success()
        .stdout("Paris, France\n");
}

#[test]
fn geocode_dry_run_short_flag_with_pretty_print() {
    nomad()
        .args(["-n", "geocode", "-p", "-c", "Berlin"])
        .assert()
        .success()
        .stdout("Berlin\n");
}

#[test]
fn download_dry_run_touches_nothing() {
    let temp = tempdir().unwrap();
    let target = temp.path().join("gis");

    nomad()
        .arg("-n")
        .arg("download")
        .arg("-d")
        .arg(&target)
        .arg("Mitte, Berlin")
        .assert()
        .success()
        .stdout(predicate::str::contains("would be downloaded to"));

    assert!(!target.exists());
}

#[test]
fn geocode_from_cached_response() {
    let temp = tempdir().unwrap();
    seed_geocode_response(temp.path(), "Berlin", r#"[{"lat": "52.5", "lon": "13.25"}]"#);

    nomad()
        .current_dir(temp.path())
        .args(["geocode", "-c", "Berlin"])
        .assert()
        .success()
        .stdout("52.5 13.25\n");
}

#[test]
fn geocode_cached_empty_response_fails() {
    let temp = tempdir().unwrap();
    seed_geocode_response(temp.path(), "laksdfljasdkfj", "[]");

    nomad()
        .current_dir(temp.path())
        .args(["geocode", "-c", "laksdfljasdkfj"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Nominatim could not geocode query 'laksdfljasdkfj'.",
        ));
}

#[test]
#[ignore = "requires network access"]
fn geocode_location_error() {
    nomad()
        .args(["geocode", "laksdfljasdkfj"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nominatim could not geocode query"));
}

#[test]
#[ignore = "requires network access"]
fn download_location_error() {
    let temp = tempdir().unwrap();

    nomad()
        .arg("download")
        .arg("-d")
        .arg(temp.path().join("cache"))
        .arg("laksdfljasdkfj")
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not be found"));
}

// ============== cache inspect / search ==============

#[test]
fn inspect_emits_one_block_per_non_empty_file() {
    let temp = tempdir().unwrap();
    seed_cache(temp.path(), 3, 2);

    let assert = nomad()
        .args(["cache", "--cache-dir"])
        .arg(temp.path())
        .arg("inspect")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert_eq!(stdout.matches("file_path").count(), 3);
    assert!(!stdout.contains("empty_"));
}

#[test]
fn inspect_uses_default_cache_dir() {
    let temp = tempdir().unwrap();
    seed_cache(&temp.path().join(".nomad/osmnx/cache"), 2, 1);

    let assert = nomad()
        .current_dir(temp.path())
        .args(["cache", "inspect"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert_eq!(stdout.matches("file_path").count(), 2);
    assert!(stdout.contains(" .nomad/osmnx/cache/"));
    assert!(!stdout.contains("./.nomad"));
}

#[test]
fn inspect_missing_cache_dir_is_empty() {
    let temp = tempdir().unwrap();

    nomad()
        .current_dir(temp.path())
        .args(["cache", "inspect"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn inspect_fails_on_malformed_json() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("broken.json"), "{\"a\": ");

    nomad()
        .args(["cache", "--cache-dir"])
        .arg(temp.path())
        .arg("inspect")
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.json"));
}

#[test]
fn search_is_case_insensitive_and_skips_paths() {
    let temp = tempdir().unwrap();
    write_file(
        &temp.path().join("a.json"),
        r#"[{"display_name": "Berlin, Deutschland"}]"#,
    );
    write_file(
        &temp.path().join("berlin.json"),
        r#"[{"display_name": "Paris, France", "address": {"city": "Berlin"}}]"#,
    );

    let assert = nomad()
        .args(["cache", "--cache-dir"])
        .arg(temp.path())
        .args(["search", "BERLIN"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert_eq!(stdout.matches("file_path").count(), 1);
    assert!(stdout.contains("a.json"));
    assert!(!stdout.contains("Paris"));
}

#[test]
fn search_rejects_invalid_regex() {
    let temp = tempdir().unwrap();

    nomad()
        .args(["cache", "--cache-dir"])
        .arg(temp.path())
        .args(["search", "(unclosed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid search query"));
}

// ============== cache rm ==============

#[test]
fn rm_declined_deletes_nothing() {
    let temp = tempdir().unwrap();
    seed_cache(temp.path(), 2, 2);

    nomad()
        .args(["--no-color", "cache", "--cache-dir"])
        .arg(temp.path())
        .arg("rm")
        .write_stdin("n\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Do you want to delete all cached data?"))
        .stderr(predicate::str::contains("Aborted!"));

    assert_eq!(count_json(temp.path()), 4);
}

#[test]
fn rm_confirmed_deletes_all() {
    let temp = tempdir().unwrap();
    seed_cache(temp.path(), 2, 2);

    let assert = nomad()
        .args(["--no-color", "cache", "--cache-dir"])
        .arg(temp.path())
        .arg("rm")
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Confirmed. Now deleting ..."));

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert_eq!(stdout.matches("Deleted: ").count(), 4);
    assert_eq!(count_json(temp.path()), 0);
}

#[test]
fn rm_force_empty_keeps_non_empty() {
    let temp = tempdir().unwrap();
    seed_cache(temp.path(), 3, 2);

    let assert = nomad()
        .args(["--no-color", "cache", "--cache-dir"])
        .arg(temp.path())
        .args(["rm", "--force", "--empty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Now deleting ..."));

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert_eq!(stdout.matches("Deleted: ").count(), 2);
    assert!(!temp.path().join("empty_0.json").exists());
    assert!(!temp.path().join("empty_1.json").exists());
    for i in 0..3 {
        assert!(temp.path().join(format!("full/{i}.json")).exists());
    }
}

#[test]
fn rm_dry_run_lists_without_deleting() {
    let temp = tempdir().unwrap();
    seed_cache(temp.path(), 1, 1);

    let assert = nomad()
        .args(["--no-color", "-n", "cache", "--cache-dir"])
        .arg(temp.path())
        .args(["rm", "-e"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert_eq!(stdout.matches("Would delete: ").count(), 1);
    assert_eq!(count_json(temp.path()), 2);
}
