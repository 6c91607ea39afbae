use anyhow::Result;
use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;

const SCHEMATIC: &str = r#"(kicad_sch
	(version 20231120)
	(generator "eeschema")
	(uuid "5d1a4e0c-9f1b-4c7e-8a44-0c2b6f5a7e11")
	(paper "A4")
	(lib_symbols)
	(sheet_instances
		(path "/"
			(page "1")
		)
	)
)
"#;

fn setup(csv: &str) -> Result<TempDir> {
    let temp = TempDir::new()?;
    temp.child("board.kicad_sch").write_str(SCHEMATIC)?;
    temp.child("nets.csv").write_str(csv)?;
    Ok(temp)
}

fn netlabel(temp: &TempDir) -> Result<Command> {
    let mut cmd = Command::cargo_bin("netlabel")?;
    cmd.current_dir(temp.path())
        .env_remove("RUST_LOG")
        .args(["--schematic", "board.kicad_sch", "--csv", "nets.csv"]);
    Ok(cmd)
}

#[test]
fn test_inserts_labels_and_reports_count() -> Result<()> {
    let temp = setup("Ref,Label\nU1,led1\nU2,  \nU3,led2\n")?;

    let output = netlabel(&temp)?.arg("--yes").output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Inserted 2 labels into board.kicad_sch."), "{stdout}");

    let written = std::fs::read_to_string(temp.child("board.kicad_sch").path())?;
    assert!(written.contains("(label \"LED1\""));
    assert!(written.contains("(at -10 -10 0)"));
    assert!(written.contains("(label \"LED2\""));
    assert!(written.contains("(at -10 -12.54 0)"));
    temp.child("board.kicad_sch.bak").assert(SCHEMATIC);
    Ok(())
}

#[test]
fn test_global_metric_flags() -> Result<()> {
    let temp = setup("label\nsda\n")?;

    netlabel(&temp)?
        .args(["--yes", "--global", "--metric", "--pitch", "5"])
        .assert()
        .success();

    let written = std::fs::read_to_string(temp.child("board.kicad_sch").path())?;
    assert!(written.contains("(global_label \"SDA\""));
    assert!(!written.contains("(label \"SDA\""));
    Ok(())
}

#[test]
fn test_unit_option_accepts_aliases() -> Result<()> {
    let temp = setup("Label\na\nb\n")?;

    netlabel(&temp)?
        .args(["--yes", "--unit", "mm", "--pitch", "5"])
        .assert()
        .success();

    let written = std::fs::read_to_string(temp.child("board.kicad_sch").path())?;
    assert!(written.contains("(at -10 -15 0)"), "{written}");
    Ok(())
}

#[test]
fn test_unknown_unit_is_a_usage_error() -> Result<()> {
    let temp = setup("Label\nvcc\n")?;

    let output = netlabel(&temp)?.args(["--yes", "--unit", "inch"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("unknown unit 'inch'"), "{stderr}");
    temp.child("board.kicad_sch").assert(SCHEMATIC);
    Ok(())
}

#[test]
fn test_missing_column_exits_with_input_error() -> Result<()> {
    let temp = setup("Ref,Net\nU1,vcc\n")?;

    let output = netlabel(&temp)?.arg("--yes").output()?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("has no 'Label' column"), "{stderr}");
    temp.child("board.kicad_sch").assert(SCHEMATIC);
    temp.child("board.kicad_sch.bak").assert(SCHEMATIC);
    Ok(())
}

#[test]
fn test_missing_csv_is_rejected_before_backup() -> Result<()> {
    let temp = setup("Label\nvcc\n")?;

    let output = Command::cargo_bin("netlabel")?
        .current_dir(temp.path())
        .args(["--schematic", "board.kicad_sch", "--csv", "absent.csv", "--yes"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("absent.csv"), "{stderr}");
    assert!(!temp.child("board.kicad_sch.bak").path().exists());
    Ok(())
}

#[test]
fn test_requires_confirmation_when_not_interactive() -> Result<()> {
    let temp = setup("Label\nvcc\n")?;

    let output = netlabel(&temp)?.output()?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("--yes"), "{stderr}");
    temp.child("board.kicad_sch").assert(SCHEMATIC);
    assert!(!temp.child("board.kicad_sch.bak").path().exists());
    Ok(())
}

#[test]
fn test_config_file_supplies_paths() -> Result<()> {
    let temp = setup("Label\nvcc\n")?;
    temp.child("netlabel.toml").write_str(
        "visibility = \"global\"\nschematic = \"board.kicad_sch\"\ncsv = \"nets.csv\"\n",
    )?;

    Command::cargo_bin("netlabel")?
        .current_dir(temp.path())
        .args(["--config", "netlabel.toml", "--yes"])
        .assert()
        .success();

    let written = std::fs::read_to_string(temp.child("board.kicad_sch").path())?;
    assert!(written.contains("(global_label \"VCC\""));
    Ok(())
}
