// CLI integration tests for listing and exporting sheets.
use std::fs;
use std::path::Path;
use std::process::Command;

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_sheet-csv");
    Command::new(exe)
}

fn write_sheets(root: &Path) {
    fs::create_dir_all(root.join("bgm")).expect("mkdir");
    fs::write(
        root.join("Item.json"),
        r#"{
            "columns": [
                { "index": 0, "name": "Name", "type": "str" },
                { "index": 1, "name": "Price", "type": "uint32" }
            ],
            "rows": [
                { "key": 5, "values": ["hi", 3] },
                { "key": 2, "values": [null, 1] }
            ]
        }"#,
    )
    .expect("write Item");
    fs::write(
        root.join("bgm").join("track1.json"),
        r#"{ "columns": [{ "index": 0, "name": "File", "type": "str" }], "rows": [] }"#,
    )
    .expect("write track1");
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn list_prints_sheet_names() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_sheets(temp.path());

    let output = cmd()
        .args(["list", "--source", temp.path().to_str().unwrap()])
        .output()
        .expect("list");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "Item\nbgm/track1\n");
}

#[test]
fn export_writes_requested_file() {
    let temp = tempfile::tempdir().expect("tempdir");
    let data = temp.path().join("data");
    write_sheets(&data);
    let out = temp.path().join("Item.csv");

    let output = cmd()
        .args([
            "export",
            "--source",
            data.to_str().unwrap(),
            "--sheet",
            "Item",
            "--output",
            out.to_str().unwrap(),
        ])
        .output()
        .expect("export");
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("Exported 2 rows"));
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "key,0,1\n#,Name,Price\nint32,str,uint32\n2,,1\n5,\"hi\",3\n"
    );
}

#[test]
fn export_defaults_to_last_name_segment() {
    let temp = tempfile::tempdir().expect("tempdir");
    let data = temp.path().join("data");
    write_sheets(&data);
    let work = temp.path().join("work");
    fs::create_dir_all(&work).unwrap();

    let output = cmd()
        .current_dir(&work)
        .args([
            "export",
            "--source",
            data.to_str().unwrap(),
            "--sheet",
            "bgm/track1",
            "--crlf",
        ])
        .output()
        .expect("export");
    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(work.join("track1.csv")).unwrap(),
        "key,0\r\n#,File\r\nint32,str\r\n"
    );
}

#[test]
fn export_unknown_sheet_is_a_noop() {
    let temp = tempfile::tempdir().expect("tempdir");
    let data = temp.path().join("data");
    write_sheets(&data);
    let out = temp.path().join("Nope.csv");

    let output = cmd()
        .args([
            "export",
            "--source",
            data.to_str().unwrap(),
            "--sheet",
            "Nope",
            "--output",
            out.to_str().unwrap(),
        ])
        .output()
        .expect("export");
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("nothing exported"));
    assert!(!out.exists());
}

#[test]
fn export_all_and_batch_write_directories() {
    let temp = tempfile::tempdir().expect("tempdir");
    let data = temp.path().join("data");
    write_sheets(&data);

    let out = temp.path().join("all");
    let output = cmd()
        .args([
            "export-all",
            "--source",
            data.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ])
        .output()
        .expect("export-all");
    assert!(output.status.success());
    assert!(out.join("Item.csv").exists());
    assert!(out.join("bgm").join("track1.csv").exists());
    assert!(out.join("manifest.json").exists());

    let config = temp.path().join("export.json");
    let output = cmd()
        .args([
            "create-config",
            "--output",
            config.to_str().unwrap(),
            "--source",
            "data",
            "--export-dir",
            "batch-out",
            "--filter",
            "bgm/",
        ])
        .output()
        .expect("create-config");
    assert!(output.status.success());

    let output = cmd()
        .args(["batch", "--config", config.to_str().unwrap()])
        .output()
        .expect("batch");
    assert!(output.status.success());
    let batch_out = temp.path().join("batch-out");
    assert!(batch_out.join("bgm").join("track1.csv").exists());
    assert!(!batch_out.join("Item.csv").exists());
}

#[test]
fn missing_source_fails() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = cmd()
        .args(["list", "--source", temp.path().join("missing").to_str().unwrap()])
        .output()
        .expect("list");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Error:"));
}
