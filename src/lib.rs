pub mod anonymize;
pub mod cli;
pub mod collect;
pub mod config;
pub mod fetch;
pub mod output;
pub mod schedule;
