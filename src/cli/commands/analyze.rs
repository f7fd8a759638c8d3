//! Standalone analysis of extracted text.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::AsyncReadExt;

use crate::cli::render;
use crate::config::Config;
use crate::http_client::HttpTransport;
use crate::llm::AnalysisFetcher;
use crate::models::ExtractedText;

/// Analyze text from a file (or stdin for `-`) and print the record.
pub async fn cmd_analyze(config: &Config, input: &Path, json: bool) -> anyhow::Result<()> {
    let content = if input == Path::new("-") {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("Failed to read stdin")?;
        buf
    } else {
        tokio::fs::read_to_string(input)
            .await
            .with_context(|| format!("Failed to read {}", input.display()))?
    };

    let transport = Arc::new(HttpTransport::new(
        &config.api.base_url,
        config.request_timeout(),
    )?);
    let fetcher = AnalysisFetcher::new(transport, &config.api.analysis_path);

    let record = fetcher.analyze(&ExtractedText { content }).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        render::print_analysis(&record);
    }
    Ok(())
}
