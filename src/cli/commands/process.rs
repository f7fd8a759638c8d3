//! Full pipeline: select, upload, poll for text, analyze.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;

use crate::cli::render;
use crate::config::Config;
use crate::http_client::HttpTransport;
use crate::models::SelectedFile;
use crate::orchestrator::Orchestrator;
use crate::state::{Event, Phase};

/// Run one document through the whole pipeline.
///
/// Stops once the analysis is shown, when the upload fails, or on Ctrl-C.
/// A failed analysis is not retried; the spinner keeps running until the
/// user interrupts.
pub async fn cmd_process(config: &Config, files: &[PathBuf], json: bool) -> anyhow::Result<()> {
    let Some(path) = files.first() else {
        return Ok(());
    };
    if files.len() > 1 {
        println!(
            "{}",
            style(format!("Only the first of {} files is considered", files.len())).dim()
        );
    }
    let file = SelectedFile::load(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let transport = Arc::new(HttpTransport::new(
        &config.api.base_url,
        config.request_timeout(),
    )?);
    let (poll_tx, mut poll_rx) = mpsc::channel(32);
    let mut orchestrator = Orchestrator::new(config, transport).with_poll_events(poll_tx);

    orchestrator.dispatch(Event::FilesDropped(vec![file]));
    render::print_form(&orchestrator.regions().form);
    if orchestrator.state().selected.is_none() {
        std::process::exit(1);
    }

    // Ctrl-C tears the pipeline down
    let tx = orchestrator.sender();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(Event::TornDown).await;
        }
    });

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    let progress = pb.clone();
    tokio::spawn(async move {
        while let Some(event) = poll_rx.recv().await {
            progress.set_message(render::poll_message(&event));
        }
    });

    orchestrator.dispatch(Event::UploadRequested);
    let mut last_phase = None;
    loop {
        let phase = orchestrator.state().phase;
        if last_phase != Some(phase) {
            match phase {
                Phase::Uploading => pb.set_message("Uploading..."),
                Phase::Polling => pb.set_message("Waiting for text extraction..."),
                Phase::Analyzing => pb.set_message("Analyzing document..."),
                _ => {}
            }
            last_phase = Some(phase);
        }

        if matches!(phase, Phase::Idle | Phase::Analyzed | Phase::Closed) {
            break;
        }
        if !orchestrator.step().await {
            break;
        }
    }
    pb.finish_and_clear();

    let regions = orchestrator.regions();
    match orchestrator.state().phase {
        Phase::Analyzed => {
            if let Some(record) = &regions.analysis {
                if json {
                    println!("{}", serde_json::to_string_pretty(record)?);
                } else {
                    render::print_analysis(record);
                }
            }
            if let Some(url) = &regions.viewer {
                render::print_viewer(url);
            }
        }
        Phase::Idle => {
            println!(
                "{}",
                style("Upload did not complete (run with -v for details)").yellow()
            );
        }
        _ => {
            println!("{}", style("Cancelled").dim());
        }
    }

    orchestrator.teardown();
    Ok(())
}
