// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Output format for query results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    #[value(alias = "id")]
    Ids,
}

/// Entity kinds that can be queried directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Agent,
    Build,
    Change,
}

#[derive(Parser, Debug)]
#[command(name = "lok")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Query a build catalog with locators")]
#[command(long_about = "Query a build catalog with locators.\n\n\
    A locator is a comma separated list of name:value dimensions, for example\n\
    'buildType:web,status:failure,count:5'. Values may be parenthesized nested\n\
    locators, and a bare value names a single item.")]
pub struct Cli {
    /// Read configuration from <path> instead of ./lok.toml
    #[arg(long, global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Catalog to query (overrides LOK_CATALOG and the config file)
    #[arg(long, global = true, value_name = "path")]
    pub catalog: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List items matching a locator
    #[command(after_help = "\
Examples:
  lok list build                                   Newest builds, default filter applied
  lok list build 'buildType:web_build,count:5'     Five newest builds of one type
  lok list build 'startDate:-1d,status:failure'    Failures started in the last day
  lok list agent 'pool:Linux,connected:true'       Connected agents of a pool
  lok list change 'vcsRoot:r1,sinceChange:120'     Root history after a change")]
    List {
        /// What to list
        kind: Kind,

        /// Locator; omitted means the finder's defaults
        #[arg(value_parser = non_empty_string)]
        locator: Option<String>,

        /// Output format (text, json, ids)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Find exactly one item
    #[command(after_help = "\
Examples:
  lok get build 42                  Build by id
  lok get agent linux-1             Agent by name
  lok get build 'number:17,buildType:web_build'")]
    Get {
        /// What to find
        kind: Kind,

        /// Locator matching exactly one item
        #[arg(value_parser = non_empty_string)]
        locator: String,

        /// Output format (text, json, ids)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// List the tags of one build
    #[command(after_help = "\
Examples:
  lok tags 42                       Public tags of build 42
  lok tags 42 private:any           Public and private tags
  lok tags 42 private:true,owner:alice")]
    Tags {
        /// Locator matching exactly one build
        #[arg(value_parser = non_empty_string)]
        build: String,

        /// Tag locator
        #[arg(value_parser = non_empty_string)]
        locator: Option<String>,

        /// Output format (text, json, ids)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Show how a locator is parsed
    Parse {
        /// Locator text
        #[arg(value_parser = non_empty_string)]
        locator: String,
    },
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
