//! Translate human-friendly search expressions (bare words, quoted phrases,
//! `+`/`-`/`~` modifiers, wildcards, AND/OR/NEAR, grouping) into queries
//! accepted by a full-text engine's boolean grammar.

pub mod cli;
pub mod config;
pub mod errors;
pub mod scanner;
pub mod search_query;
pub mod stop_words;
mod storage;

#[cfg(test)]
mod tests;
