//! CLI surface tests
//!
//! Exercise argument handling, configuration loading, and the sandboxed
//! listing paths that never need the ffmpeg binaries.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quiclip() -> Command {
    let mut cmd = Command::cargo_bin("quiclip").unwrap();
    cmd.env_remove("QUICLIP_MEDIA_ROOT");
    cmd
}

fn media_root() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("b.mp4"), b"v").unwrap();
    fs::write(dir.path().join("a.mkv"), b"v").unwrap();
    fs::write(dir.path().join("readme.txt"), b"t").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/c.mov"), b"v").unwrap();
    dir
}

#[test]
fn test_list_prints_sorted_video_labels() {
    let root = media_root();
    quiclip()
        .arg("--media-root")
        .arg(root.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::eq("a.mkv\nb.mp4\n"));
}

#[test]
fn test_list_subdirectory() {
    let root = media_root();
    quiclip()
        .arg("--media-root")
        .arg(root.path())
        .args(["list", "sub"])
        .assert()
        .success()
        .stdout(predicate::str::contains("c.mov"));
}

#[test]
fn test_list_escaping_dir_is_empty() {
    let root = media_root();
    quiclip()
        .arg("--media-root")
        .arg(root.path())
        .args(["list", ".."])
        .assert()
        .success()
        .stdout(predicate::eq(""));
}

#[test]
fn test_list_json_output_parses() {
    let root = media_root();
    let output = quiclip()
        .arg("--media-root")
        .arg(root.path())
        .args(["list", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let items: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["label"], "a.mkv");
}

#[test]
fn test_missing_media_root_fails() {
    quiclip()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No media root configured"));
}

#[test]
fn test_media_root_from_config_file() {
    let root = media_root();
    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("quiclip.toml");
    fs::write(
        &config_path,
        format!("media_root = {:?}\n", root.path().to_str().unwrap()),
    )
    .unwrap();

    quiclip()
        .arg("--config")
        .arg(&config_path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("b.mp4"));
}

#[test]
fn test_probe_rejects_file_outside_root() {
    let root = media_root();
    quiclip()
        .arg("--media-root")
        .arg(root.path())
        .args(["probe", "/etc/passwd"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a valid video file selection"));
}

#[test]
fn test_clip_rejects_malformed_segment_spec() {
    let root = media_root();
    quiclip()
        .arg("--media-root")
        .arg(root.path())
        .args(["clip", "-s", "b.mp4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid segment spec"));
}

#[test]
fn test_clip_rejects_inverted_range() {
    let root = media_root();
    quiclip()
        .arg("--media-root")
        .arg(root.path())
        .args(["clip", "-s", "b.mp4:5:5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("end must be greater than start"));
}

#[test]
fn test_clip_rejects_negative_start() {
    let root = media_root();
    quiclip()
        .arg("--media-root")
        .arg(root.path())
        .args(["clip", "-s", "b.mp4:-1:5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("start must not be negative"));
}

#[test]
fn test_clip_fails_whole_command_on_one_bad_range() {
    // A negative start among otherwise valid segments must abort the
    // command instead of silently clipping fewer segments than requested.
    let root = media_root();
    quiclip()
        .arg("--media-root")
        .arg(root.path())
        .args(["clip", "-s", "b.mp4:0:5", "-s", "b.mp4:-1:5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("start must not be negative"));
}

#[test]
fn test_clip_rejects_path_outside_sandbox() {
    let root = media_root();
    quiclip()
        .arg("--media-root")
        .arg(root.path())
        .args(["clip", "-s", "../outside.mp4:0:5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("inside the media root"));
}

#[test]
fn test_merge_rejects_non_video_file() {
    let root = media_root();
    quiclip()
        .arg("--media-root")
        .arg(root.path())
        .args(["merge", "readme.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("inside the media root"));
}

/// Put stub `ffmpeg`/`ffprobe` executables on PATH that succeed and create
/// their last argument, so the full pipeline runs without real binaries.
#[cfg(unix)]
fn stub_tools() -> TempDir {
    use std::os::unix::fs::PermissionsExt;

    let bin = TempDir::new().unwrap();
    let script = "#!/bin/sh\n\
        [ \"$1\" = \"-version\" ] && exit 0\n\
        for a in \"$@\"; do out=$a; done\n\
        : > \"$out\"\n\
        exit 0\n";
    for name in ["ffmpeg", "ffprobe"] {
        let path = bin.path().join(name);
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }
    bin
}

#[cfg(unix)]
#[test]
fn test_merge_success_removes_concat_manifest() {
    let root = media_root();
    let bin = stub_tools();

    let output = quiclip()
        .env("PATH", bin.path())
        .arg("--media-root")
        .arg(root.path())
        .args(["merge", "b.mp4"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let output_path = String::from_utf8(output).unwrap().trim().to_string();
    assert!(std::path::Path::new(&output_path).is_file());
    // The concat manifest is written next to the output and must be gone
    // after a successful run too.
    let manifest = format!("{}.txt", output_path);
    assert!(!std::path::Path::new(&manifest).exists());
}
