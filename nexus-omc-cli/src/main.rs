//! omc-convert: entity documents <-> graph-text from the command line
//!
//! Reads one input file, auto-detects its representation, converts to the
//! other one (or the one forced with `--to`), and writes the result to stdout
//! or `--out`.

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Representation {
    /// Entity documents (JSON)
    Document,
    /// Graph-text (Turtle)
    Graph,
}

#[derive(Debug, Parser)]
#[command(name = "omc-convert", about = "Convert OMC entity documents to/from graph-text")]
struct Args {
    /// Input file (entity documents or graph-text)
    input: PathBuf,

    /// Target representation; defaults to the opposite of the input
    #[arg(long, value_enum)]
    to: Option<Representation>,

    /// Output file (stdout when omitted)
    #[arg(long)]
    out: Option<PathBuf>,
}

fn init_logging() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("omc_convert=info,nexus_omc=info"));
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact());
    let _ = tracing::dispatcher::set_global_default(tracing::Dispatch::new(subscriber));
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let input_is_graph = serde_json::from_str::<serde_json::Value>(&text).is_err();
    let target = args.to.unwrap_or(if input_is_graph {
        Representation::Document
    } else {
        Representation::Graph
    });

    let output = match target {
        Representation::Graph => {
            // Run the text through the importer first: it validates, splices
            // missing identifiers, and applies the per-type transforms.
            let result = nexus_omc::import_collection(&text);
            report(&result);
            if let Some(err) = result.error {
                bail!("import failed: {}", err);
            }
            let docs: Vec<_> = result.entities.into_iter().map(|e| e.content).collect();
            nexus_omc::export_collection(&docs)?
        }
        Representation::Document => {
            let result = nexus_omc::import_collection(&text);
            report(&result);
            if let Some(err) = result.error {
                bail!("import failed: {}", err);
            }
            serde_json::to_string_pretty(&result)?
        }
    };

    write_output(args.out.as_deref(), &output)
}

fn report(result: &nexus_omc::ImportResult) {
    for warning in &result.warnings {
        warn!("{}", warning);
    }
    info!(
        accepted = result.entities.len(),
        skipped = result.warnings.len(),
        "import pass finished"
    );
}

fn write_output(out: Option<&std::path::Path>, content: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("writing {}", path.display()))?,
        None => print!("{}", content),
    }
    Ok(())
}
