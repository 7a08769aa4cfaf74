use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const MARKED: &str = "<html><body><p><mark>x</mark> *y*</p></body></html>";

#[test]
fn default_packs_apply() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.html");
    fs::write(&input_path, MARKED).unwrap();

    let mut cmd = cargo_bin_cmd!("unpage");
    cmd.arg(input_path.as_os_str());
    cmd.assert().success().stdout("==x== \\*y\\*\n");
}

#[test]
fn pack_order_from_config_file() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.html");
    fs::write(&input_path, MARKED).unwrap();

    let config_path = dir.path().join("unpage.toml");
    fs::write(
        &config_path,
        r#"[rules]
packs = ["commonmark"]
default_escapes = false
"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("unpage");
    cmd.arg("export")
        .arg(input_path.as_os_str())
        .arg("--config")
        .arg(config_path.as_os_str());
    cmd.assert().success().stdout("x *y*\n");
}

#[test]
fn extra_overrides_win_over_config() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.html");
    fs::write(&input_path, MARKED).unwrap();

    let mut cmd = cargo_bin_cmd!("unpage");
    cmd.arg(input_path.as_os_str())
        .arg("--extra-packs")
        .arg("commonmark")
        .arg("--extra-escapes")
        .arg("false");
    cmd.assert().success().stdout("x *y*\n");
}

#[test]
fn unknown_pack_fails() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.html");
    fs::write(&input_path, MARKED).unwrap();

    let mut cmd = cargo_bin_cmd!("unpage");
    cmd.arg(input_path.as_os_str())
        .arg("--extra-packs")
        .arg("commonmark,nope");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn unknown_extra_fails() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.html");
    fs::write(&input_path, MARKED).unwrap();

    let mut cmd = cargo_bin_cmd!("unpage");
    cmd.arg(input_path.as_os_str()).arg("--extra-colour").arg("red");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--extra-colour"));
}

#[test]
fn malformed_opaque_selector_is_a_warning() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.html");
    fs::write(&input_path, MARKED).unwrap();

    let config_path = dir.path().join("unpage.toml");
    fs::write(&config_path, "[rules]\nopaque = [\"p >\"]\n").unwrap();

    let mut cmd = cargo_bin_cmd!("unpage");
    cmd.arg(input_path.as_os_str())
        .arg("--config")
        .arg(config_path.as_os_str());
    cmd.assert()
        .success()
        .stdout("==x== \\*y\\*\n")
        .stderr(predicate::str::contains("warning: ignored malformed selector 'p >'"));
}

#[test]
fn list_packs() {
    let mut cmd = cargo_bin_cmd!("unpage");
    cmd.arg("--list-packs");
    cmd.assert().success().stdout(
        predicate::str::contains("commonmark")
            .and(predicate::str::contains("footnotes"))
            .and(predicate::str::contains("Default order")),
    );
}
