use aggrecat_core::AppError;
use anyhow::{Context, Result};
use colored::*;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

pub fn write_result(content: &str, save_path: Option<&Path>, quiet: bool) -> Result<()> {
    match save_path {
        Some(path) => {
            write_to_file(path, content)?;
            if !quiet {
                println!(
                    "{} Output saved to: {}",
                    "✅".green(),
                    path.display().to_string().blue()
                );
            }
        }
        None => write_to_stdout(content)?,
    }
    Ok(())
}

fn write_to_file(path: &Path, content: &str) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| AppError::FileWrite {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }
    let mut file = File::create(path).map_err(|e| AppError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    file.write_all(content.as_bytes())
        .map_err(|e| AppError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok(())
}

fn write_to_stdout(content: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(content.as_bytes())
        .context("Failed to write to stdout")?;
    if !content.ends_with('\n') {
        handle
            .write_all(b"\n")
            .context("Failed to write trailing newline to stdout")?;
    }
    handle.flush().context("Failed to flush stdout")?;
    Ok(())
}
