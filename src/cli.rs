use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Extra stop-word file, one word per line
    #[clap(long, global = true)]
    pub stop_words: Option<PathBuf>,

    /// Join adjacent terms with OR instead of the configured conjunction
    #[clap(long, global = true, default_value = "false")]
    pub or: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Convert a search expression into a full-text query.
    /// Reads one query per line from stdin when no query is given.
    Convert {
        /// Search expression
        #[clap(trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,

        /// Print {"input", "output"} json records
        #[clap(long, default_value = "false")]
        json: bool,
    },
    /// Print the expression tree as json
    Tree {
        /// Search expression
        #[clap(trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,

        /// Skip normalization
        #[clap(long, default_value = "false")]
        raw: bool,
    },
    /// List effective stop words
    StopWords {},
}
