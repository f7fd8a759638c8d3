//! Standalone results polling.

use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::cli::render;
use crate::config::Config;
use crate::http_client::HttpTransport;
use crate::models::UploadHandle;
use crate::services::ResultPoller;

/// Poll a results location and print the extracted text.
pub async fn cmd_poll(config: &Config, results_url: &str) -> anyhow::Result<()> {
    let transport = Arc::new(HttpTransport::new(
        &config.api.base_url,
        config.request_timeout(),
    )?);
    let poller = ResultPoller::new(transport, config.poll_interval());
    let handle = UploadHandle {
        results_location: results_url.to_string(),
    };

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Polling {}", results_url));

    let (tx, mut rx) = mpsc::channel(32);
    let progress = pb.clone();
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            progress.set_message(render::poll_message(&event));
        }
    });

    let text = poller.poll_with_events(&handle, cancel, tx).await;
    pb.finish_and_clear();

    match text {
        Some(text) => println!("{}", text.content),
        None => eprintln!("Cancelled"),
    }
    Ok(())
}
