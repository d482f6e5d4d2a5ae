use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;


const CONTACT: &str = "mailto:data-team@example.com?subject=Hospital%20DB%20Insights";


fn hdbi(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("hdbi").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("HDBI_VARIANT")
        .env_remove("HDBI_EMBED_URL")
        .env_remove("HDBI_EXPORT_DIR");
    cmd
}


#[test]
fn test_contact_prints_mailto() {
    let home = TempDir::new().unwrap();
    hdbi(&home)
        .arg("contact")
        .assert()
        .success()
        .stdout(format!("{CONTACT}\n"));
}


#[test]
fn test_show_default_state() {
    let home = TempDir::new().unwrap();
    hdbi(&home)
        .args(["show", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[ Hide Atomicity Chart ]"))
        .stdout(predicate::str::contains("Attempted Inserts"))
        .stdout(predicate::str::contains("Departments"))
        .stdout(predicate::str::contains(CONTACT));
}


#[test]
fn test_show_hidden_state() {
    let home = TempDir::new().unwrap();
    hdbi(&home)
        .args(["show", "--no-color", "--hide-atomicity"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[ Show Atomicity Chart ]"))
        .stdout(predicate::str::contains("Attempted Inserts").not());
}


#[test]
fn test_show_embed_variant() {
    let home = TempDir::new().unwrap();
    hdbi(&home)
        .args(["show", "--no-color", "--variant", "embed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Embedded BI dashboard goes here."))
        .stdout(predicate::str::contains("Atomicity Chart").not());
}


#[test]
fn test_export_html_and_svg() {
    let home = TempDir::new().unwrap();
    let html = home.path().join("dashboard.html");
    let svg = home.path().join("dashboard.svg");

    hdbi(&home)
        .args(["export", "--format", "html", "--output"])
        .arg(&html)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to"));

    hdbi(&home)
        .args(["export", "--format", "svg", "--hide-atomicity", "--output"])
        .arg(&svg)
        .assert()
        .success();

    let html = std::fs::read_to_string(html).unwrap();
    assert!(html.contains("Hide Atomicity Chart"));
    assert!(html.contains(r#"data-alt-label="Show Atomicity Chart""#));
    assert!(html.contains("<script>"));
    assert!(html.contains(CONTACT));

    let svg = std::fs::read_to_string(svg).unwrap();
    assert!(svg.contains("Show Atomicity Chart"));
}


#[test]
fn test_export_json_to_default_dir() {
    let home = TempDir::new().unwrap();
    let export_dir = home.path().join("exports");

    hdbi(&home)
        .env("HDBI_EXPORT_DIR", &export_dir)
        .args(["export", "--format", "json"])
        .assert()
        .success();

    let files: Vec<_> = std::fs::read_dir(&export_dir).unwrap().flatten().collect();
    assert_eq!(files.len(), 1);
    let json = std::fs::read_to_string(files[0].path()).unwrap();
    assert!(json.contains("\"roomAvailability\""));
    assert!(json.contains("\"status\": \"Unavailable\""));
}


#[test]
fn test_unknown_variant_is_rejected() {
    let home = TempDir::new().unwrap();
    hdbi(&home)
        .args(["show", "--variant", "compact"])
        .assert()
        .failure();
}
