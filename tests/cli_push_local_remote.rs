use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn write_cfg(
    path: &std::path::Path,
    staging: &std::path::Path,
    publish: &std::path::Path,
    remote: &std::path::Path,
) {
    let xml = format!(
        r#"<config>
  <staging_dir>{}</staging_dir>
  <publish_dir>{}</publish_dir>
  <remote_url>{}</remote_url>
  <branch>main</branch>
  <log_level>quiet</log_level>
</config>"#,
        staging.display(),
        publish.display(),
        remote.display()
    );
    fs::write(path, xml).unwrap();
}

#[test]
fn push_builds_commits_and_pushes_to_a_local_bare_remote() {
    if !git_available() {
        eprintln!("git not installed; skipping");
        return;
    }
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg_path = base.join("config.xml");
    let staging = base.join("staging");
    let publish = staging.join("pdf");
    let remote = base.join("remote.git");
    fs::create_dir_all(&staging).unwrap();
    fs::create_dir_all(&publish).unwrap();

    let out = Command::new("git")
        .args(["init", "--bare", "-b", "main"])
        .arg(&remote)
        .output()
        .expect("create bare remote");
    assert!(out.status.success());

    write_cfg(&cfg_path, &staging, &publish, &remote);
    fs::write(publish.join("sheet.pdf"), b"content").unwrap();

    let me = assert_cmd::cargo::cargo_bin!("pdfhub");
    let out = Command::new(me)
        .env("PDFHUB_CONFIG", &cfg_path)
        .args(["push", "-m", "publish sheet"])
        .output()
        .expect("spawn binary");

    eprintln!("=== STDOUT ===\n{}", String::from_utf8_lossy(&out.stdout));
    eprintln!("=== STDERR ===\n{}", String::from_utf8_lossy(&out.stderr));
    assert!(out.status.success(), "push exited with failure");

    // Gallery was rebuilt before the push
    assert!(publish.join("index.html").exists());

    // The commit arrived on the remote
    let log = Command::new("git")
        .arg("-C")
        .arg(&remote)
        .args(["log", "--oneline", "main"])
        .output()
        .expect("read remote log");
    assert!(log.status.success());
    let log = String::from_utf8_lossy(&log.stdout);
    assert!(log.contains("publish sheet"), "got: {log}");
}

#[test]
fn push_dry_run_neither_commits_nor_pushes() {
    if !git_available() {
        eprintln!("git not installed; skipping");
        return;
    }
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg_path = base.join("config.xml");
    let staging = base.join("staging");
    let publish = staging.join("pdf");
    let remote = base.join("remote.git");
    fs::create_dir_all(&staging).unwrap();
    fs::create_dir_all(&publish).unwrap();

    let out = Command::new("git")
        .args(["init", "--bare", "-b", "main"])
        .arg(&remote)
        .output()
        .expect("create bare remote");
    assert!(out.status.success());

    write_cfg(&cfg_path, &staging, &publish, &remote);
    fs::write(publish.join("sheet.pdf"), b"content").unwrap();

    let me = assert_cmd::cargo::cargo_bin!("pdfhub");
    let out = Command::new(me)
        .env("PDFHUB_CONFIG", &cfg_path)
        .args(["--dry-run", "push", "-m", "never lands"])
        .output()
        .expect("spawn binary");
    assert!(out.status.success());

    assert!(!publish.join(".git").exists(), "dry-run must not init a repo");
    assert!(!publish.join("index.html").exists());
}
