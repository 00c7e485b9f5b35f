//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CFP supply-chain console
#[derive(Parser, Debug)]
#[command(name = "cfp-console")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Session file (JSON); overrides config and environment
    #[arg(short, long, global = true)]
    pub session: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store an access token and the operator it belongs to
    Login {
        /// Access token issued by the authentication service
        #[arg(long, env = "CFP_ACCESS_TOKEN", hide_env_values = true)]
        token: String,
    },

    /// Clear the whole session
    Logout,

    /// Show the logged-in operator
    Whoami,

    /// List own products
    Products(ListArgs),

    /// List own parts that can be linked to a received request
    LinkParts(ListArgs),

    /// List CFP requests received from downstream partners
    Responses(ListArgs),

    /// List CFP requests sent to upstream partners
    Requests(ListArgs),

    /// Parts structure (bill of materials)
    PartsStructure {
        #[command(subcommand)]
        action: PartsStructureAction,
    },

    /// Outgoing CFP requests
    Request {
        #[command(subcommand)]
        action: RequestAction,
    },

    /// Answers to received CFP requests
    Response {
        #[command(subcommand)]
        action: ResponseAction,
    },

    /// CFP values
    Cfp {
        #[command(subcommand)]
        action: CfpAction,
    },

    /// List registered material names
    Materials {
        /// Ignore the cached list and fetch again
        #[arg(long)]
        refresh: bool,
    },
}

/// Navigation flags shared by the list commands
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct ListArgs {
    /// Move one page forward from the stored position
    #[arg(long, conflicts_with = "first")]
    pub next: bool,

    /// Return to the first page
    #[arg(long)]
    pub first: bool,
}

#[derive(Subcommand, Debug)]
pub enum PartsStructureAction {
    /// Show a product and its direct components
    Show {
        /// Trace ID of the parent part
        trace_id: String,
    },

    /// Register a parts structure from a JSON file
    Register {
        /// JSON file with `parentPart` and `childrenParts`
        #[arg(long)]
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum RequestAction {
    /// Ask an upstream partner for the CFP of a component
    Submit {
        /// Trace ID of the own component
        #[arg(long)]
        trace_id: String,

        /// Operator ID of the supplier
        #[arg(long)]
        upstream_operator_id: String,

        /// Message for the supplier
        #[arg(long)]
        message: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ResponseAction {
    /// Answer a received request with one of the own parts
    Link {
        /// Trade ID of the received request
        #[arg(long)]
        trade_id: String,

        /// Trace ID of the own part
        #[arg(long)]
        trace_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum CfpAction {
    /// Show CFP values of parts
    Show {
        /// Trace IDs (comma-separated)
        #[arg(required = true, value_delimiter = ',')]
        trace_ids: Vec<String>,
    },

    /// Register CFP values from a JSON file
    Register {
        /// JSON file holding an array of CFP values
        #[arg(long)]
        file: PathBuf,
    },

    /// Export CFP values of parts to CSV
    Export {
        /// Trace IDs (comma-separated)
        #[arg(required = true, value_delimiter = ',')]
        trace_ids: Vec<String>,

        /// Output file; defaults to a timestamped name in the working directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Prefix the file with a UTF-8 byte order mark
        #[arg(long)]
        bom: bool,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned text tables
    Table,
    /// Pretty-printed JSON
    Json,
}
