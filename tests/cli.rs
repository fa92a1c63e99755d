use assert_cmd::{cargo_bin_cmd, Command};
use predicates::prelude::*;

fn pomodoro() -> Command {
    cargo_bin_cmd!("pomodoro-counter")
}

#[test]
fn help_lists_options() {
    pomodoro()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--workon"))
        .stdout(predicate::str::contains("--position"));
}

#[test]
fn workon_is_required() {
    pomodoro()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--workon"));
}

#[test]
fn workon_must_be_numeric() {
    pomodoro().args(["--workon", "abc"]).assert().failure();
}

#[cfg(unix)]
mod with_fake_task {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use tempfile::TempDir;

    /// Put an executable `task` in `bin` that prints `export` output.
    fn install_fake_task(bin: &Path, export: &str) {
        fs::create_dir_all(bin).unwrap();
        let script = bin.join("task");
        fs::write(&script, format!("#!/bin/sh\ncat <<'JSON'\n{export}\nJSON\n")).unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn path_with(bin: &Path) -> String {
        let old = std::env::var("PATH").unwrap_or_default();
        format!("{}:{old}", bin.display())
    }

    #[test]
    fn unknown_task_fails_without_creating_database() {
        let home = TempDir::new().unwrap();
        let bin = home.path().join("bin");
        install_fake_task(&bin, "[]");

        pomodoro()
            .args(["--workon", "42"])
            .env("HOME", home.path())
            .env("PATH", path_with(&bin))
            .write_stdin("")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not found"))
            .stderr(predicate::str::contains("42"));

        assert!(!home.path().join(".task/pomodoro/table.db").exists());
    }

    #[test]
    fn closed_stdin_ends_session_after_setup() {
        let home = TempDir::new().unwrap();
        let bin = home.path().join("bin");
        install_fake_task(
            &bin,
            r#"[{"id":7,"uuid":"0f6b1c1e-7d44-4c3a-9d61-3c1d2f0f5a11","description":"Write report","status":"pending"}]"#,
        );

        pomodoro()
            .args(["--workon", "7", "--position", "2"])
            .env("HOME", home.path())
            .env("PATH", path_with(&bin))
            .write_stdin("")
            .assert()
            .failure()
            .stdout(predicate::str::contains(
                "Starting our pomodoro break period: 2 on task:",
            ))
            .stdout(predicate::str::contains("Write report"))
            .stdout(predicate::str::contains("wrapping up jobs and terminating"));

        assert!(home.path().join(".task/pomodoro/table.db").exists());
    }
}
