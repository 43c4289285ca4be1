use std::io::{self, BufRead};

use anyhow::Context;
use clap::Parser;
use ftsq::{
    cli::{Args, Command},
    config::Config,
    search_query::{Conjunction, QueryConverter},
    stop_words::StopWords,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_conversion(converter: &QueryConverter, input: &str, as_json: bool) -> anyhow::Result<()> {
    let output = converter.convert(input);
    if as_json {
        println!("{}", serde_json::to_string(&json!({ "input": input, "output": output }))?);
    } else {
        println!("{output}");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let base_path = Config::base_path()?;
    let config = Config::load_with(&base_path)
        .with_context(|| format!("failed to load config from {base_path}"))?;
    tracing::debug!(%base_path, "config loaded");

    let mut converter = config.converter().context("failed to load stop words")?;
    if let Some(path) = &args.stop_words {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        converter = converter.with_stop_words(StopWords::from_list(&text).iter());
    }
    if args.or {
        converter = converter.with_default_conjunction(Conjunction::Or);
    }

    match args.command {
        Command::Convert { query, json } => {
            if query.is_empty() {
                for line in io::stdin().lock().lines() {
                    print_conversion(&converter, &line?, json)?;
                }
            } else {
                print_conversion(&converter, &query.join(" "), json)?;
            }
        }
        Command::Tree { query, raw } => {
            let input = query.join(" ");
            let tree = if raw {
                converter.parse(&input)
            } else {
                converter.tree(&input)
            };
            println!("{}", serde_json::to_string_pretty(&tree)?);
        }
        Command::StopWords {} => {
            for word in converter.stop_words().sorted() {
                println!("{word}");
            }
        }
    }

    Ok(())
}
