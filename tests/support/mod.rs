#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;

pub const HEADER: &str = "dpto,genero_col,ciencias,matematicas,lectura_critica,sociales,ingles,internet,tv,computer,microwave,car,washing machine,motorcycle,video games";

pub fn console_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_saber11"))
}

pub fn report_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_matrix-report"))
}

/// Write `rows` under the standard header into a temporary CSV file.
pub fn write_dataset(rows: &[&str]) -> Result<NamedTempFile> {
    write_raw(HEADER, rows, ',')
}

/// Write rows with an arbitrary header and delimiter.
pub fn write_raw(header: &str, rows: &[&str], delimiter: char) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .context("failed to allocate dataset file")?;
    let header = header.replace(',', &delimiter.to_string());
    writeln!(file, "{header}")?;
    for row in rows {
        writeln!(file, "{}", row.replace(',', &delimiter.to_string()))?;
    }
    file.flush()?;
    Ok(file)
}

/// One household row in header order.
pub fn row(region: &str, gender: &str, scores: [u32; 5], owned: [u8; 8]) -> String {
    let scores: Vec<String> = scores.iter().map(u32::to_string).collect();
    let owned: Vec<String> = owned.iter().map(u8::to_string).collect();
    format!("{region},{gender},{},{}", scores.join(","), owned.join(","))
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// Run `cmd` feeding `input` on stdin; the exit status is not checked.
pub fn run_with_stdin(mut cmd: Command, input: &str) -> Result<Output> {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to spawn {:?}", cmd))?;
    child
        .stdin
        .take()
        .context("stdin not captured")?
        .write_all(input.as_bytes())?;
    child.wait_with_output().context("waiting for child")
}
