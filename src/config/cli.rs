use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "extpipes")]
#[command(about = "Manage Cognite Data Fusion extraction pipelines")]
pub struct Cli {
    /// TOML client config; environment variables are used when omitted
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List pipelines matching the given filters
    List {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        external_id_prefix: Option<String>,
        #[arg(long, value_delimiter = ',')]
        data_set_ids: Vec<i64>,
        #[arg(long)]
        created_by: Option<String>,
    },
    /// Retrieve pipelines by id / external id
    Retrieve {
        #[arg(long, value_delimiter = ',')]
        ids: Vec<i64>,
        #[arg(long, value_delimiter = ',')]
        external_ids: Vec<String>,
        #[arg(long)]
        ignore_unknown: bool,
    },
    /// Create or update pipelines declared in a TOML file
    Upsert {
        #[arg(long)]
        file: String,
    },
    /// Delete pipelines by id / external id
    Delete {
        #[arg(long, value_delimiter = ',')]
        ids: Vec<i64>,
        #[arg(long, value_delimiter = ',')]
        external_ids: Vec<String>,
        #[arg(long)]
        ignore_unknown: bool,
    },
    /// Work with extraction pipeline runs
    Runs {
        #[command(subcommand)]
        command: RunsCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum RunsCommand {
    /// List runs for one pipeline
    List {
        #[arg(long)]
        external_id: String,
        #[arg(long, value_delimiter = ',')]
        statuses: Vec<String>,
    },
    /// Report a run for one pipeline
    Create {
        #[arg(long)]
        external_id: String,
        #[arg(long)]
        status: String,
        #[arg(long)]
        message: Option<String>,
    },
}
