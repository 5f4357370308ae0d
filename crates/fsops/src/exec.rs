//! Subprocess-backed tools: the test runner and the linter.

use std::path::Path;
use std::process::Command;

use assistant_protocol::types::{CommandOutput, LintOutput};

use crate::error::{FsError, Result};

/// Run `pytest -v` over a directory. The file pattern is advisory; the
/// runner discovers test files itself.
pub fn run_tests(directory: &str, pattern: &str) -> Result<CommandOutput> {
    if !Path::new(directory).is_dir() {
        return Err(FsError::not_found(
            format!("Directory not found: {directory}"),
            directory,
        ));
    }

    log::debug!("running pytest in {directory} (pattern {pattern})");
    run_command("pytest", &[directory, "-v"])
}

/// Lint one Python file with `flake8`.
pub fn lint_code(file_path: &str) -> Result<LintOutput> {
    if !file_path.ends_with(".py") {
        return Err(FsError::wrong_kind(
            "Only Python files are supported for linting".to_string(),
            file_path,
        ));
    }
    if !Path::new(file_path).is_file() {
        return Err(FsError::not_found(
            format!("File not found: {file_path}"),
            file_path,
        ));
    }

    let output = run_command("flake8", &[file_path])?;
    Ok(LintOutput {
        success: output.success,
        output: output.stdout,
        errors: output.stderr,
        returncode: output.returncode,
    })
}

/// Capture a command's full output. A non-zero exit is a well-formed reply,
/// not an error; only a failed spawn is.
fn run_command(program: &str, args: &[&str]) -> Result<CommandOutput> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| FsError::io(format!("Error executing command {program}"), None, e))?;

    Ok(CommandOutput {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        returncode: output.status.code().unwrap_or(-1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistant_protocol::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn lint_refuses_non_python_files() {
        let err = lint_code("notes.txt").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WrongKind);
        assert_eq!(
            err.to_string(),
            "Only Python files are supported for linting"
        );
        assert_eq!(err.path(), Some("notes.txt"));
    }

    #[test]
    fn lint_requires_an_existing_file() {
        let err = lint_code("/no/such/file.py").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn run_tests_requires_a_directory() {
        let err = run_tests("/no/such/dir", "test_*.py").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Directory not found: /no/such/dir");
    }

    #[test]
    fn missing_binaries_surface_as_spawn_errors() {
        let out = run_command("definitely-not-a-real-binary-48151623", &[]);
        assert!(out.is_err());
    }

    #[test]
    fn captured_output_keeps_exit_codes() {
        // `false` exists everywhere tests run and exits 1 with no output.
        let out = run_command("false", &[]).unwrap();
        assert!(!out.success);
        assert_eq!(out.returncode, 1);
        assert_eq!(out.stdout, "");
    }
}
