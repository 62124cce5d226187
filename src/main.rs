use anyhow::Result;
use clap::Parser;
use indicatif::MultiProgress;
use std::io::Write;
use std::process;
use std::sync::Arc;
use stock_mail_tracker::auth;
use stock_mail_tracker::cli::{Cli, Commands, ProgressReporter};
use stock_mail_tracker::client::{GmailMailService, MailService};
use stock_mail_tracker::config::Config;
use stock_mail_tracker::error::TrackerError;
use stock_mail_tracker::pipeline;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// A writer that prints through MultiProgress to avoid progress bar conflicts
#[derive(Clone)]
struct MultiProgressWriter {
    multi: MultiProgress,
    buffer: Vec<u8>,
}

impl Write for MultiProgressWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if !self.buffer.is_empty() {
            let msg = String::from_utf8_lossy(&self.buffer);
            let msg = msg.trim_end_matches('\n');
            if !msg.is_empty() {
                let _ = self.multi.println(msg);
            }
            self.buffer.clear();
        }
        Ok(())
    }
}

impl Drop for MultiProgressWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// MakeWriter implementation for tracing
#[derive(Clone)]
struct MultiProgressMakeWriter {
    multi: MultiProgress,
}

impl<'a> MakeWriter<'a> for MultiProgressMakeWriter {
    type Writer = MultiProgressWriter;

    fn make_writer(&'a self) -> Self::Writer {
        MultiProgressWriter {
            multi: self.multi.clone(),
            buffer: Vec::new(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        display_error(&e);
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    #[cfg(not(windows))]
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install default crypto provider"))?;

    #[cfg(windows)]
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install default crypto provider"))?;

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("stock_mail_tracker=debug,info"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("stock_mail_tracker=info,warn"))
    };

    let multi_progress = MultiProgress::new();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(MultiProgressMakeWriter {
            multi: multi_progress.clone(),
        })
        .with_target(false)
        .init();

    let reporter = ProgressReporter::with_multi_progress(multi_progress);

    match cli.command() {
        Commands::InitConfig { output, force } => {
            if output.exists() && !force {
                return Err(TrackerError::ConfigError(format!(
                    "Configuration file already exists at {:?}. Use --force to overwrite.",
                    output
                ))
                .into());
            }

            Config::create_example(&output).await?;
            println!("Created example configuration file at: {:?}", output);
            Ok(())
        }

        Commands::Labels => {
            let (service, _) = connect(&cli, &reporter).await?;
            let labels = service.list_labels().await?;
            if labels.is_empty() {
                println!("No labels found.");
            }
            for label in labels {
                println!("--- {} ({})", label.name, label.id);
            }
            Ok(())
        }

        Commands::Export => {
            let (service, config) = connect(&cli, &reporter).await?;

            let pb = reporter.add_progress_bar(config.traversal.max_threads as u64, "Reading threads");
            let on_progress: pipeline::ProgressCallback = {
                let pb = pb.clone();
                Arc::new(move |visited: usize, total: usize| {
                    pb.set_length(total as u64);
                    pb.set_position(visited as u64);
                })
            };
            let report = pipeline::run_export(&service, &config, Some(on_progress)).await?;
            pb.finish_and_clear();

            println!(
                "{} of {} threads read ({} failed)",
                report.threads_visited, report.threads_listed, report.fetch_failures
            );
            println!(
                "Wrote {} rows to {:?}",
                report.records_written, report.output_path
            );
            Ok(())
        }
    }
}

/// Load config, apply CLI overrides and authenticate
async fn connect(cli: &Cli, reporter: &ProgressReporter) -> Result<(GmailMailService, Config)> {
    let mut config = Config::load(&cli.config).await?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    let auth_spinner = reporter.add_spinner("Authenticating with Gmail API...");
    let hub = auth::initialize_gmail_hub(&config.auth.credentials, &config.auth.token_cache).await?;
    reporter.finish_spinner(&auth_spinner, "Gmail API authenticated");

    let service = GmailMailService::new(hub, config.mail.user_id.clone());
    Ok((service, config))
}

/// Display error with context
fn display_error(error: &anyhow::Error) {
    eprintln!("Error: {}", error);

    let mut cause = error.source();
    while let Some(e) = cause {
        eprintln!("  Caused by: {}", e);
        cause = e.source();
    }

    if let Some(err) = error.downcast_ref::<TrackerError>() {
        match err {
            TrackerError::AuthError(_) => {
                eprintln!("\nHint: Make sure client_secret.json is a valid installed-app secret.");
                eprintln!("      You can download it from Google Cloud Console.");
            }
            TrackerError::ConfigError(_) => {
                eprintln!("\nHint: Check your configuration file for errors.");
                eprintln!("      Run: stock-mail-tracker init-config --force");
            }
            _ => {}
        }
    }
}
