// tests/cli_dispatch_test.rs

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::{self, File};
use std::io::{Cursor, Write};
use std::path::Path;
use tempfile::{TempDir, tempdir};
use zip::ZipArchive;

// 辅助函数，避免重复；HOME 指向临时目录，避免污染真实配置
fn main_command(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env("HOME", home).env_remove("USE_PROXY");
    cmd
}

fn archive_names(path: &Path) -> Vec<String> {
    let bytes = fs::read(path).expect("archive should exist");
    let archive = ZipArchive::new(Cursor::new(bytes)).expect("archive should be valid");
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    names
}

fn gallery_server() -> mockito::ServerGuard {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/page.html")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(r#"<img src="/cat.png" alt="Cat"><img src="/dog_pic.gif">"#)
        .create();
    server
        .mock("GET", "/cat.png")
        .with_status(200)
        .with_header("content-type", "image/png")
        .with_body("cat")
        .create();
    server
        .mock("GET", "/dog_pic.gif")
        .with_status(200)
        .with_header("content-type", "image/gif")
        .with_body("dog")
        .create();
    server
}

// --- 测试基本 CLI 行为 ---

#[test]
fn test_help_flag() {
    let home = tempdir().unwrap();
    main_command(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("显示此帮助信息并退出"));
}

#[test]
fn test_missing_mode_shows_help() {
    let home = tempdir().unwrap();
    main_command(home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: img-dl <MODE> [OPTIONS]"));
}

#[test]
fn test_name_requires_image_mode() {
    let home = tempdir().unwrap();
    main_command(home.path())
        .args(["--url", "http://127.0.0.1:1/", "--name", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--image"));
}

#[test]
fn test_modes_are_mutually_exclusive() {
    let home = tempdir().unwrap();
    main_command(home.path())
        .args(["--url", "http://127.0.0.1:1/", "--image", "http://127.0.0.1:1/a.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

// --- 测试核心分发逻辑 ---

#[test]
fn test_list_json_prints_records() {
    let server = gallery_server();
    let home = tempdir().unwrap();

    main_command(home.path())
        .arg("--url")
        .arg(format!("{}/page.html", server.url()))
        .args(["--list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""alt": "Cat""#))
        .stdout(predicate::str::contains(r#""alt": "dog pic""#));
}

#[test]
fn test_url_mode_writes_archive() {
    let server = gallery_server();
    let home = tempdir().unwrap();
    let output = tempdir().unwrap();

    main_command(home.path())
        .arg("--url")
        .arg(format!("{}/page.html", server.url()))
        .arg("-o")
        .arg(output.path())
        .assert()
        .success();

    assert_eq!(
        archive_names(&output.path().join("images.zip")),
        vec!["Cat.png".to_string(), "dog pic.gif".to_string()]
    );
    // 首次运行会生成默认配置文件
    assert!(home.path().join(".img-dl").join("config.json").is_file());
}

#[test]
fn test_url_mode_with_selection_and_separate_files() {
    let server = gallery_server();
    let home = tempdir().unwrap();
    let output = tempdir().unwrap();

    main_command(home.path())
        .arg("--url")
        .arg(format!("{}/page.html", server.url()))
        .args(["--select", "2", "--separate"])
        .arg("-o")
        .arg(output.path())
        .assert()
        .success();

    assert_eq!(fs::read(output.path().join("dog pic.gif")).unwrap(), b"dog");
    assert!(!output.path().join("Cat.png").exists());
    assert!(!output.path().join("images.zip").exists());
}

#[test]
fn test_unreachable_page_reports_error() {
    let home = tempdir().unwrap();
    main_command(home.path())
        .args(["--url", "http://127.0.0.1:1/page.html", "--list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("程序执行出错"));
}

fn write_batch_file(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("batch.json");
    let mut file = File::create(&path).unwrap();
    writeln!(file, "{}", content).unwrap();
    path
}

#[test]
fn test_empty_batch_file_writes_empty_archive() {
    let home = tempdir().unwrap();
    let work = tempdir().unwrap();
    let batch = write_batch_file(&work, "[]");

    main_command(home.path())
        .arg("-b")
        .arg(&batch)
        .args(["--archive-name", "empty.zip"])
        .arg("-o")
        .arg(work.path())
        .assert()
        .success();

    assert!(archive_names(&work.path().join("empty.zip")).is_empty());
}

#[test]
fn test_batch_file_with_missing_fields() {
    let server = gallery_server();
    let home = tempdir().unwrap();
    let work = tempdir().unwrap();
    let batch = write_batch_file(
        &work,
        &format!(
            r#"[{{"src": "{0}/cat.png"}}, {{"alt": "nothing"}}, {{"src": "{0}/dog_pic.gif", "alt": "Dog"}}]"#,
            server.url()
        ),
    );

    main_command(home.path())
        .arg("-b")
        .arg(&batch)
        .arg("-o")
        .arg(work.path())
        .assert()
        .success();

    assert_eq!(
        archive_names(&work.path().join("images.zip")),
        vec!["Dog.gif".to_string(), "no alt name.png".to_string()]
    );
}

#[test]
fn test_invalid_batch_file_fails() {
    let home = tempdir().unwrap();
    let work = tempdir().unwrap();
    let batch = write_batch_file(&work, "{not json");

    main_command(home.path())
        .arg("-b")
        .arg(&batch)
        .arg("-o")
        .arg(work.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("解析批量文件"));
}

#[test]
fn test_single_image_mode_saves_file() {
    let server = gallery_server();
    let home = tempdir().unwrap();
    let output = tempdir().unwrap();

    main_command(home.path())
        .arg("--image")
        .arg(format!("{}/cat.png", server.url()))
        .args(["--name", "Kitty"])
        .arg("-o")
        .arg(output.path())
        .assert()
        .success();

    assert_eq!(fs::read(output.path().join("Kitty.png")).unwrap(), b"cat");
}
