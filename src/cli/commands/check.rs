//! File acceptance check.

use std::path::PathBuf;

use console::style;

use crate::cli::render;
use crate::config::Config;
use crate::models::SelectedFile;
use crate::services::Validator;

/// Validate files the way a drop would, without uploading.
pub async fn cmd_check(config: &Config, files: &[PathBuf]) -> anyhow::Result<()> {
    let validator = Validator::new(config.upload.max_file_bytes);

    let Some(path) = files.first() else {
        return Ok(());
    };
    if files.len() > 1 {
        println!(
            "{}",
            style(format!("Only the first of {} files is considered", files.len())).dim()
        );
    }

    let file = SelectedFile::load(path).await?;
    match validator.validate(&file) {
        Ok(file) => {
            println!("{} {}", style("✓").green(), render::file_line(&file));
            Ok(())
        }
        Err(e) => {
            println!("{}", style(e.to_string()).red());
            std::process::exit(1);
        }
    }
}
