use billbot::prelude::*;
use clap::Parser;
use futures::StreamExt;
use std::io::{self, BufRead};
use std::path::PathBuf;

/// Normalize US Congress bill status documents into bill records
#[derive(Parser, Debug)]
#[command(name = "billbot")]
#[command(about = "Convert parsed BILLSTATUS documents into normalized bill records")]
#[command(version)]
struct Args {
    /// Directory containing parsed status documents (default: data, or BILLBOT_DIR env var)
    #[arg(long = "data-dir")]
    data_dir: Option<String>,

    /// Congress numbers to process (space-separated)
    #[arg(short, long, num_args = 0..)]
    congresses: Vec<String>,

    /// Sort order: ASC or DESC
    #[arg(long, default_value = "ASC", value_parser = ["ASC", "DESC"])]
    sort: String,

    /// Limit number of results
    #[arg(long)]
    limit: Option<usize>,

    /// Read document paths from stdin instead of discovering files
    /// Useful for stdio pipelines: find ... | billbot --stdin
    #[arg(long)]
    stdin: bool,
}

fn get_data_dir(data_dir: Option<String>) -> PathBuf {
    // Check flag first, then environment variable, then default
    if let Some(data_dir) = data_dir {
        PathBuf::from(data_dir)
    } else if let Ok(data_dir) = std::env::var("BILLBOT_DIR") {
        PathBuf::from(data_dir)
    } else {
        PathBuf::from("data")
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let data_dir = get_data_dir(args.data_dir);

    // Build configuration
    let mut builder = ConfigBuilder::new(&data_dir).sort_order_str(&args.sort);

    if let Some(limit) = args.limit {
        builder = builder.limit(limit);
    }

    if !args.congresses.is_empty() {
        builder = builder.congresses(args.congresses);
    }

    let config = builder.build()?;

    let processor = PipelineProcessor::new(config.clone());

    if args.stdin {
        // Read paths from stdin (one per line)
        let stdin = io::stdin();
        let paths = stdin
            .lock()
            .lines()
            .filter_map(|line| line.ok())
            .filter(|line| !line.trim().is_empty());

        let mut stream = PipelineProcessor::process_from_stdin(&config, paths);

        // Write JSON to stdout (one record per line)
        while let Some(result) = stream.next().await {
            match result {
                Ok(record) => {
                    let json = serde_json::to_string(&record)?;
                    println!("{}", json);
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                }
            }
        }
    } else {
        // Discover and process documents from the data directory
        let mut stream = processor.process();

        // Write JSON to stdout (one record per line)
        while let Some(result) = stream.next().await {
            match result {
                Ok(record) => {
                    let json = serde_json::to_string(&record)?;
                    println!("{}", json);
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                }
            }
        }
    }

    Ok(())
}
