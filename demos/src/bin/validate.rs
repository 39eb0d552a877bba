//! Email validation demo.
//!
//! Submits the addresses given on the command line, prints progress while
//! the job runs and the classification of each entry once it completes.
//!
//! # Running
//!
//! ```bash
//! export VERIFALIA_USERNAME="samantha"
//! export VERIFALIA_PASSWORD="42"
//!
//! cargo run --bin validate -- batman@gmail.com robin@gotham.com
//! ```
//!
//! Set `RUST_LOG=verifalia=debug` to see each attempt and failover.

use std::{env, process::ExitCode};

use verifalia::prelude::*;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let addresses: Vec<String> = env::args().skip(1).collect();
    if addresses.is_empty() {
        eprintln!("usage: validate <email>...");
        return ExitCode::FAILURE;
    }

    match run(addresses).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            for attempt in err.attempts() {
                eprintln!("  {} -> {}", attempt.endpoint(), attempt.reason());
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(addresses: Vec<String>) -> Result<()> {
    let (Ok(username), Ok(password)) = (env::var("VERIFALIA_USERNAME"), env::var("VERIFALIA_PASSWORD"))
    else {
        return Err(Error::configuration(
            "VERIFALIA_USERNAME and VERIFALIA_PASSWORD must be set",
        ));
    };

    let client = Client::builder()
        .credentials(UsernamePasswordConfig::new(username, password))
        .build()?;

    // Ctrl-C stops polling; the job keeps running on the service
    let cancellation = CancellationToken::new();
    let on_interrupt = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let wait = WaitOptions::default()
        .with_cancellation(cancellation)
        .with_progress(|overview: &ValidationOverview| {
            if let Some(progress) = &overview.progress {
                println!("{}: {:.0}%", overview.id, progress.percentage * 100.0);
            }
        });

    let request = ValidationRequest::new(addresses).with_quality(QualityLevel::High);
    let validation = client.email_validations().submit(request, wait).await?;

    if !validation.is_completed() {
        println!("job {} is still running", validation.id());
        return Ok(());
    }

    for entry in &validation.entries {
        println!("{:<40} {:?} ({:?})", entry.input_data, entry.classification, entry.status);
    }

    let stats = client.stats();
    println!("\n{} calls, {} attempts, {} failovers", stats.calls, stats.attempts, stats.failovers);
    Ok(())
}
