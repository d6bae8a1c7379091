use std::io::{self, BufWriter, IsTerminal, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use yit::config::{Config, OutputFormat};
use yit::document::tree::Tree;
use yit::file::loader::{load_yaml_file, load_yaml_from_stdin};
use yit::iter::Iter;
use yit::output::render;
use yit::query::Query;

/// yit - query YAML documents with lazy, merge-aware traversals
#[derive(Parser)]
#[command(name = "yit")]
#[command(version)]
#[command(about = "Query YAML documents with lazy, merge-aware traversals", long_about = None)]
struct Cli {
    /// YAML file to read (omit or use `-` to read from stdin)
    file: Option<String>,

    /// Query pipeline, e.g. `key:services | recurse | kind:scalar`
    #[arg(short, long)]
    query: Option<String>,

    /// Output format (default from config, otherwise `value`)
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Print `---` between the results of each document
    #[arg(long)]
    separators: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_input(file: Option<&str>) -> Result<Vec<Tree>> {
    match file {
        Some("-") | None => {
            if io::stdin().is_terminal() {
                anyhow::bail!("No input: pass a YAML file or pipe one into stdin");
            }
            load_yaml_from_stdin()
        }
        Some(path) => load_yaml_file(path),
    }
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = Config::load();

    let query_text = cli.query.unwrap_or_else(|| config.default_query.clone());
    let query: Query = query_text
        .parse()
        .with_context(|| format!("Invalid query `{}`", query_text))?;
    let format = cli.output.unwrap_or(config.output_format);
    let separators = cli.separators || config.document_separators;

    let trees = load_input(cli.file.as_deref())?;
    tracing::debug!(documents = trees.len(), steps = query.steps.len(), "running query");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let mut printed_document = false;
    for (index, tree) in trees.iter().enumerate() {
        // Empty documents have nothing to traverse.
        let Some(root) = tree.root() else {
            continue;
        };

        if separators && printed_document {
            writeln!(out, "---")?;
        }
        printed_document = true;

        for node in query.apply(Iter::from_node(root)) {
            let node = node.with_context(|| format!("Query failed in document {}", index + 1))?;
            writeln!(out, "{}", render(node, format)?)?;
        }
    }

    out.flush()?;
    Ok(())
}
