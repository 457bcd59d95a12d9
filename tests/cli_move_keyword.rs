use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn write_cfg(path: &std::path::Path, staging: &std::path::Path, publish: &std::path::Path) {
    let xml = format!(
        r#"<config>
  <staging_dir>{}</staging_dir>
  <publish_dir>{}</publish_dir>
  <keyword>_optimised</keyword>
  <log_level>quiet</log_level>
</config>"#,
        staging.display(),
        publish.display()
    );
    fs::write(path, xml).unwrap();
}

#[test]
fn move_then_build_publishes_keyword_pdfs() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg_path = base.join("config.xml");
    let staging = base.join("staging");
    let publish = staging.join("pdf");
    fs::create_dir_all(&staging).unwrap();
    fs::create_dir_all(&publish).unwrap();
    write_cfg(&cfg_path, &staging, &publish);

    fs::write(staging.join("report_optimised.pdf"), vec![0u8; 2048]).unwrap();
    fs::write(staging.join("draft.pdf"), b"no keyword").unwrap();
    fs::write(staging.join("notes.txt"), b"not a pdf").unwrap();

    let me = assert_cmd::cargo::cargo_bin!("pdfhub");
    let out = Command::new(&me)
        .env("PDFHUB_CONFIG", &cfg_path)
        .arg("move")
        .output()
        .expect("spawn binary");

    eprintln!("=== STDOUT ===\n{}", String::from_utf8_lossy(&out.stdout));
    eprintln!("=== STDERR ===\n{}", String::from_utf8_lossy(&out.stderr));
    assert!(out.status.success(), "move exited with failure");

    // Keyword match moved, everything else left in place
    assert!(publish.join("report_optimised.pdf").exists());
    assert!(!staging.join("report_optimised.pdf").exists());
    assert!(staging.join("draft.pdf").exists());
    assert!(staging.join("notes.txt").exists());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("MOVED: report_optimised.pdf"), "got: {stdout}");
    assert!(stdout.contains("Moved:   1"), "got: {stdout}");

    // Build the gallery over the published folder
    let out = Command::new(&me)
        .env("PDFHUB_CONFIG", &cfg_path)
        .arg("build")
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "build exited with failure");

    let html = fs::read_to_string(publish.join("index.html")).unwrap();
    assert!(html.contains("report_optimised.pdf"));
    assert!(html.contains("2.0 KB"));
    assert!(!html.contains("notes.txt"));
}

#[test]
fn keyword_match_is_case_insensitive() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg_path = base.join("config.xml");
    let staging = base.join("staging");
    let publish = staging.join("pdf");
    fs::create_dir_all(&staging).unwrap();
    fs::create_dir_all(&publish).unwrap();
    write_cfg(&cfg_path, &staging, &publish);

    fs::write(staging.join("Sheet_OPTIMISED.PDF"), b"x").unwrap();

    let me = assert_cmd::cargo::cargo_bin!("pdfhub");
    let out = Command::new(me)
        .env("PDFHUB_CONFIG", &cfg_path)
        .arg("move")
        .output()
        .expect("spawn binary");
    assert!(out.status.success());
    assert!(publish.join("Sheet_OPTIMISED.PDF").exists());
}

#[test]
fn empty_staging_is_a_clean_no_op() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg_path = base.join("config.xml");
    let staging = base.join("staging");
    let publish = staging.join("pdf");
    fs::create_dir_all(&staging).unwrap();
    fs::create_dir_all(&publish).unwrap();
    write_cfg(&cfg_path, &staging, &publish);

    let me = assert_cmd::cargo::cargo_bin!("pdfhub");
    let out = Command::new(me)
        .env("PDFHUB_CONFIG", &cfg_path)
        .arg("move")
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "no candidates should still exit 0");
}
