use std::fs;
use std::process::Command;
use tempfile::tempdir;

const PAGE: &str = "<!DOCTYPE html><html><body><p>cat and dog</p></body></html>";

fn multifind() -> Command {
    Command::new(env!("CARGO_BIN_EXE_multifind"))
}

#[test]
fn highlights_page_and_reports_counts() {
    let dir = tempdir().unwrap();
    let page = dir.path().join("page.html");
    let config = dir.path().join("config.toml");
    let out = dir.path().join("out.html");
    fs::write(&page, PAGE).unwrap();
    fs::write(
        &config,
        format!(
            "palette = [\"#A\", \"#B\"]\nstore_path = {:?}\n",
            dir.path().join("store.json").display().to_string()
        ),
    )
    .unwrap();

    let output = multifind()
        .arg(&page)
        .args(["-k", "cat", "-k", "dog", "--config"])
        .arg(&config)
        .arg("--out")
        .arg(&out)
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("cat: 1 matches"));
    assert!(stderr.contains("dog: 1 matches"));
    assert!(stderr.contains("2 total matches found"));

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert_eq!(html.matches("class=\"multifind-highlight\"").count(), 2);
    assert!(html.contains("background-color: #B"));
}

#[test]
fn clear_restores_the_page() {
    let dir = tempdir().unwrap();
    let page = dir.path().join("page.html");
    let config = dir.path().join("config.toml");
    fs::write(&page, PAGE).unwrap();
    fs::write(
        &config,
        format!(
            "store_path = {:?}\n",
            dir.path().join("store.json").display().to_string()
        ),
    )
    .unwrap();

    let output = multifind()
        .arg(&page)
        .args(["-k", "cat", "--clear", "--config"])
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");
    assert_eq!(String::from_utf8(output.stdout).unwrap(), PAGE);
}

#[test]
fn missing_page_fails() {
    let dir = tempdir().unwrap();
    let output = multifind()
        .arg(dir.path().join("absent.html"))
        .output()
        .unwrap();
    assert!(!output.status.success());
}
