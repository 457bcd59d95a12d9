use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn env_config_missing_file_fails_loudly() {
    let td = tempdir().unwrap();
    let me = assert_cmd::cargo::cargo_bin!("pdfhub");
    let out = Command::new(me)
        .env("PDFHUB_CONFIG", td.path().join("nope.xml"))
        .arg("build")
        .output()
        .expect("spawn binary");
    assert!(!out.status.success(), "missing explicit config must fail");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("PDFHUB_CONFIG"), "got: {stderr}");
}

#[test]
fn env_config_unknown_field_fails_parse() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><nonsense>1</nonsense></config>").unwrap();

    let me = assert_cmd::cargo::cargo_bin!("pdfhub");
    let out = Command::new(me)
        .env("PDFHUB_CONFIG", &cfg_path)
        .arg("build")
        .output()
        .expect("spawn binary");
    assert!(!out.status.success(), "typo fields must not be ignored");
}

#[test]
fn cli_flags_override_env_config() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg_path = base.join("config.xml");
    let staging_a = base.join("a");
    let publish_a = staging_a.join("pdf");
    let staging_b = base.join("b");
    let publish_b = staging_b.join("pdf");
    fs::create_dir_all(&publish_a).unwrap();
    fs::create_dir_all(&publish_b).unwrap();

    fs::write(
        &cfg_path,
        format!(
            "<config><staging_dir>{}</staging_dir><publish_dir>{}</publish_dir><log_level>quiet</log_level></config>",
            staging_a.display(),
            publish_a.display()
        ),
    )
    .unwrap();

    fs::write(publish_b.join("only_here.pdf"), b"x").unwrap();

    let me = assert_cmd::cargo::cargo_bin!("pdfhub");
    let out = Command::new(me)
        .env("PDFHUB_CONFIG", &cfg_path)
        .arg("--staging-dir")
        .arg(&staging_b)
        .arg("--publish-dir")
        .arg(&publish_b)
        .arg("build")
        .output()
        .expect("spawn binary");
    assert!(out.status.success());

    // The flag-selected publish dir got the artifact, not the XML one
    assert!(publish_b.join("index.html").exists());
    assert!(!publish_a.join("index.html").exists());
    let html = fs::read_to_string(publish_b.join("index.html")).unwrap();
    assert!(html.contains("only_here.pdf"));
}
