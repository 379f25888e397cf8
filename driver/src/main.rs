use anyhow::Context;
use clap::Parser;
use matcore::MatrixEngine;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use workflow::config::WorkflowConfig;
use workflow::runner::{render, Runner};

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Runs integer matrix pipelines")]
struct Args {
    /// Load a workflow config from YAML; runs the Alpha x Beta demo otherwise
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Print displayed matrices as JSON instead of plain rows
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Append a one-line run summary to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow.as_ref() {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::demo()
    };

    let engine = MatrixEngine::new(workflow_config.engine.clone());
    let runner = Runner::new(workflow_config);
    let result = runner
        .execute(&engine)
        .context("running matrix workflow")?;

    if args.json {
        let rendered =
            serde_json::to_string_pretty(&result).context("serializing workflow result")?;
        println!("{}", rendered);
    } else {
        for matrix in &result.displayed {
            println!("matrix {} ({})", matrix.name(), matrix.shape());
            print!("{}", render(&engine, matrix));
        }
    }

    if let Some(report_path) = args.report {
        let report = format!(
            "displayed={} produced={:?} created={} processed={} errors={}\n",
            result.displayed.len(),
            result.produced,
            result.metrics.created,
            result.metrics.processed,
            result.metrics.errors
        );
        if let Some(parent) = report_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&report_path)
            .with_context(|| format!("opening report {}", report_path.display()))?;
        file.write_all(report.as_bytes())?;
    }

    Ok(())
}
