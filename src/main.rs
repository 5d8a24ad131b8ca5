//! `learnscope` - replays a JSON-lines event script through one
//! assessment session and prints the report.
//!
//! ```text
//! learnscope <script.jsonl> [--format json|markdown] [--out DIR]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use learnscope::adapters::{
    InMemorySessionStore, JsonReportExporter, MarkdownReportExporter, ReportFileWriter, RngJitter,
};
use learnscope::application::{JitterFactory, ReplayRunner};
use learnscope::config::AppConfig;
use learnscope::ports::{ExportFormat, JitterSource, ReportExporter};

const USAGE: &str = "usage: learnscope <script.jsonl> [--format json|markdown] [--out DIR]";

struct Args {
    script: PathBuf,
    format: ExportFormat,
    out: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut script = None;
    let mut format = ExportFormat::Json;
    let mut out = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--format" => {
                format = match args.next().as_deref() {
                    Some("json") => ExportFormat::Json,
                    Some("markdown") | Some("md") => ExportFormat::Markdown,
                    other => return Err(format!("unknown format {:?}", other)),
                }
            }
            "--out" => {
                out = Some(PathBuf::from(args.next().ok_or("--out needs a directory")?));
            }
            _ if script.is_none() => script = Some(PathBuf::from(arg)),
            _ => return Err(format!("unexpected argument {}", arg)),
        }
    }

    Ok(Args {
        script: script.ok_or(USAGE)?,
        format,
        out,
    })
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("failed to load configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = config.validate() {
        eprintln!("invalid configuration: {}", err);
        return ExitCode::FAILURE;
    }
    init_tracing(&config);

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(2);
        }
    };

    match run(&config, args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!(error = %message, "replay failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &AppConfig, args: Args) -> Result<(), String> {
    let script = tokio::fs::read_to_string(&args.script)
        .await
        .map_err(|e| format!("cannot read {}: {}", args.script.display(), e))?;
    let settings = config.difficulty.settings().map_err(|e| e.to_string())?;

    let jitter_factory: JitterFactory =
        Arc::new(|seed| Box::new(RngJitter::from_optional_seed(seed)) as Box<dyn JitterSource>);
    let runner = ReplayRunner::new(Arc::new(InMemorySessionStore::new()), jitter_factory);

    let outcome = runner
        .run(&script, settings, config.jitter.seed)
        .await
        .map_err(|e| e.to_string())?;
    info!(
        session_id = %outcome.session_id,
        applied = outcome.applied,
        rejected = outcome.rejected.len(),
        "script replayed"
    );

    let exporter: Box<dyn ReportExporter> = match args.format {
        ExportFormat::Json => Box::new(JsonReportExporter::pretty()),
        ExportFormat::Markdown => Box::new(MarkdownReportExporter::new()),
    };

    if let Some(dir) = args.out {
        let path = ReportFileWriter::new(dir)
            .write(&outcome.report, exporter.as_ref())
            .await
            .map_err(|e| e.to_string())?;
        info!(path = %path.display(), "report written");
    }

    let rendered = exporter
        .export(&outcome.report)
        .await
        .map_err(|e| e.to_string())?;
    println!("{}", String::from_utf8_lossy(&rendered));
    Ok(())
}
