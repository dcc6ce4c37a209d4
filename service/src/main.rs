use anyhow::Context;
use bridge::http::ResultBridge;
use bridge::model::ResultModel;
use clap::Parser;
use classifier::RemoteClassifier;
use generator::synthetic::{build_ppg_signal, GeneratorConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod bridge;
mod classifier;
mod export;
mod generator;
mod ingest;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "PPG AF classification workflow driver")]
struct Args {
    /// PPG recording to classify: .mat with a `ppg` variable, or .csv with
    /// the signal in the first column
    input: Option<PathBuf>,
    /// Destination for the predictions CSV
    #[arg(long, default_value = "ppg_af_predictions.csv")]
    output: PathBuf,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Sampling rate in Hz
    #[arg(long, default_value_t = 125.0)]
    fs: f64,
    /// Window length in seconds
    #[arg(long, default_value_t = 5.0)]
    window_sec: f64,
    /// Window overlap in seconds
    #[arg(long, default_value_t = 2.5)]
    overlap_sec: f64,
    /// Base URL of the model server (TensorFlow-Serving style)
    #[arg(long, default_value = "http://127.0.0.1:8501/v1/models/ppg_af_lstm")]
    model_url: String,
    /// Classify a seeded synthetic recording instead of reading a file
    #[arg(long, default_value_t = false)]
    demo: bool,
    /// Keep the HTTP bridge alive for incoming requests
    #[arg(long, default_value_t = false)]
    serve: bool,
    /// Address the HTTP bridge listens on
    #[arg(long, default_value = "127.0.0.1:9000")]
    bind: SocketAddr,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(
            args.fs,
            args.window_sec,
            args.overlap_sec,
            args.model_url.clone(),
        )
    };
    config.validate().context("validating workflow config")?;

    let classifier = Arc::new(
        RemoteClassifier::new(config.model_url.clone()).context("building model client")?,
    );
    let runner = Runner::new(config, classifier);
    runner
        .validate_model()
        .context("probing the model endpoint")?;

    if args.input.is_none() && !args.demo && !args.serve {
        anyhow::bail!("nothing to do: pass a recording, --demo, or --serve");
    }

    let mut last_outcome = None;
    if args.demo || args.input.is_some() {
        let samples = if args.demo {
            build_ppg_signal(&GeneratorConfig::default())
        } else {
            let path = args.input.as_deref().context("input path missing")?;
            ingest::load_signal(path)?
        };
        log::info!("loaded {} samples", samples.len());

        let outcome = runner.execute(&samples)?;
        export::write_predictions_csv(&args.output, &outcome.predictions)
            .with_context(|| format!("writing predictions to {}", args.output.display()))?;
        println!(
            "AF windows {}/{} ({:.2}%), {} artifact samples repaired -> {}",
            outcome.summary.af_windows,
            outcome.summary.window_count,
            outcome.summary.af_percentage,
            outcome.repaired_samples,
            args.output.display()
        );
        last_outcome = Some(outcome);
    }

    if args.serve {
        let bridge = ResultBridge::new(Arc::new(runner), args.bind);
        if let Some(outcome) = last_outcome {
            bridge.publish(&ResultModel {
                summary: outcome.summary,
                predictions: outcome.predictions,
                repaired_samples: outcome.repaired_samples,
            });
        }
        bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
