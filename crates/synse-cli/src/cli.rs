//! Command-line argument parsing with clap.

use clap::{Args, Parser, Subcommand};

/// Synse CLI - command-line client for the Synse platform.
#[derive(Parser, Debug, Clone)]
#[command(name = "synse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Synse Server address to connect to.
    #[arg(long, env = "SYNSE_SERVER", default_value = "localhost:5000", global = true)]
    pub host: String,

    /// Output as indented JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Output as YAML.
    #[arg(long, global = true)]
    pub yaml: bool,

    /// Suppress the header line in table output.
    #[arg(long = "no-header", global = true)]
    pub no_header: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show server liveness status.
    Status,

    /// Show server version info.
    Version,

    /// Dump the server's unified configuration.
    Config,

    /// Plugin inspection commands.
    Plugin {
        /// Plugin subcommand to execute.
        #[command(subcommand)]
        command: PluginCommands,
    },

    /// Enumerate the devices the server knows about.
    Scan(ScanArgs),

    /// List the tags currently known to the server.
    Tags(TagsArgs),

    /// Show full info for a device.
    Info {
        /// Device ID or alias to inspect.
        device: String,
    },

    /// Read current values from devices.
    Read(ReadArgs),

    /// Write to a device.
    Write(WriteArgs),

    /// Inspect write transactions.
    Transaction {
        /// Transaction ID; omit to list cached transaction IDs.
        id: Option<String>,
    },

    /// Stream readings into a live-updating table.
    Stream(StreamArgs),
}

/// Plugin subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum PluginCommands {
    /// List registered plugins.
    List,

    /// Show detailed info for a plugin.
    Info {
        /// Plugin ID to inspect.
        id: String,
    },

    /// Show the plugin health rollup.
    Health,
}

/// Arguments for the scan command.
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Default tag namespace for tags without an explicit namespace.
    #[arg(long)]
    pub ns: Option<String>,

    /// Only include devices matching this tag. Repeatable; repeated tags
    /// must all match.
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,

    /// Sort keys applied in order, comma-separated.
    #[arg(long, default_value = "plugin,id")]
    pub sort: String,

    /// Filter spec, a single key=value pair (e.g. "type=led").
    #[arg(long)]
    pub filter: Option<String>,

    /// Force the server to rebuild its device cache first.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the tags command.
#[derive(Args, Debug, Clone)]
pub struct TagsArgs {
    /// Default tag namespace.
    #[arg(long)]
    pub ns: Option<String>,
}

/// Arguments for the read command.
#[derive(Args, Debug, Clone)]
pub struct ReadArgs {
    /// Device ID or alias to read; omit to read by tag selection.
    pub device: Option<String>,

    /// Default tag namespace for tags without an explicit namespace.
    #[arg(long)]
    pub ns: Option<String>,

    /// Only read devices matching this tag. Repeatable.
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,

    /// Sort keys applied in order, comma-separated.
    #[arg(long, default_value = "device,type")]
    pub sort: String,

    /// Filter spec, a single key=value pair (e.g. "type=temperature").
    #[arg(long)]
    pub filter: Option<String>,
}

/// Arguments for the write command.
#[derive(Args, Debug, Clone)]
pub struct WriteArgs {
    /// Device ID or alias to write to.
    pub device: String,

    /// Write action, e.g. "color" or "state".
    pub action: String,

    /// Action data, e.g. "ff0000". Optional for data-less actions.
    pub data: Option<String>,

    /// Wait for the write to complete instead of returning transactions.
    #[arg(short, long)]
    pub wait: bool,
}

/// Arguments for the stream command.
#[derive(Args, Debug, Clone)]
pub struct StreamArgs {
    /// Only stream readings from this device ID. Repeatable.
    #[arg(long = "id")]
    pub ids: Vec<String>,

    /// Only stream readings from devices matching this tag. Repeatable;
    /// each occurrence forms its own tag group.
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,

    /// Redraw interval in milliseconds.
    #[arg(long, default_value_t = 100)]
    pub interval: u64,
}
