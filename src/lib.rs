//! Developer profile analysis over local Claude Code conversation history.
//!
//! Data flows one way: `projects`/`parser` load sessions and their logs,
//! `extractor` pulls out user text and touched files, `classifier`,
//! `temporal` and `metrics` analyze them, `profile` assembles the result
//! and `output`/`charts` render it.

pub mod charts;
pub mod classifier;
pub mod config;
pub mod extractor;
pub mod frequency;
pub mod metrics;
pub mod output;
pub mod parser;
pub mod profile;
pub mod projects;
pub mod taxonomy;
pub mod temporal;
