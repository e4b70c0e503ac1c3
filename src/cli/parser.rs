use crate::config::Config;
use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for Caixa Tulsi
/// Daily cash-register ledger for a restaurant/hotel
#[derive(Parser)]
#[command(
    name = "caixa",
    version = env!("CARGO_PKG_VERSION"),
    about = "Daily cash-register ledger: record sales per service period, get totals, reports and exports",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Use the JSON file store at this path instead of the database
    #[arg(global = true, long = "json-store", value_name = "FILE")]
    pub json_store: Option<String>,

    /// Name recorded in the audit log (default: `default_user` from config)
    #[arg(global = true, long = "user")]
    pub user: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn username(&self, cfg: &Config) -> String {
        self.user
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(&cfg.default_user)
            .to_string()
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the storage and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Maintain the SQLite database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Record sales of a day
    Entry {
        #[command(subcommand)]
        action: EntryCommands,
    },

    /// General, per-period and per-person reports
    Report {
        #[command(subcommand)]
        action: ReportCommands,
    },

    /// Read or change settings (unit prices, summary toggles, clients...)
    Settings {
        #[command(subcommand)]
        action: SettingsCommands,
    },

    /// Manage users
    User {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Print the audit log
    Log {
        #[arg(long = "print", help = "Print the audit log")]
        print: bool,

        #[arg(long = "limit", help = "Only the most recent N records")]
        limit: Option<usize>,
    },

    /// Export the general report
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Serve the JSON HTTP API
    Serve {
        #[arg(long, help = "Bind address (default from config)")]
        host: Option<String>,

        #[arg(long, help = "Port (default from config)")]
        port: Option<u16>,
    },
}

#[derive(Subcommand)]
pub enum EntryCommands {
    /// Merge a JSON patch into the entry of a day
    Save {
        /// Date of the entry (YYYY-MM-DD)
        date: String,

        #[arg(long, value_name = "FILE", help = "JSON patch file, or - for stdin")]
        file: String,
    },

    /// Set quantity and value of a sales channel
    Channel {
        date: String,
        /// Period id (e.g. jantar, roomService)
        period: String,
        channel: String,
        quantity: i64,
        /// Total value; defaults to quantity x configured unit price
        value: Option<String>,

        #[arg(long, help = "Sub-tab of the period (e.g. primeiroTurno)")]
        tab: Option<String>,
    },

    /// Add a billed (faturado) item
    Faturado {
        date: String,
        period: String,
        client: String,
        quantity: i64,
        value: String,

        #[arg(long)]
        tab: Option<String>,

        #[arg(long, default_value = "other", help = "hotel, employee or other")]
        category: String,

        #[arg(long, default_value = "")]
        note: String,
    },

    /// Add an internal consumption item
    Consumo {
        date: String,
        period: String,
        client: String,
        quantity: i64,
        value: String,

        #[arg(long)]
        tab: Option<String>,

        #[arg(long, default_value = "")]
        note: String,
    },

    /// Add an event sub-event
    Event {
        date: String,
        name: String,
        /// on-site or off-site
        location: String,
        service: String,
        quantity: i64,
        value: String,
    },

    /// Show the totals of a day
    Show {
        date: String,

        #[arg(long, help = "Print raw JSON")]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Per-day breakdown and summary (default range: current month)
    General {
        #[arg(long, value_name = "RANGE")]
        range: Option<String>,

        #[arg(long, help = "Print raw JSON")]
        json: bool,
    },

    /// Channel-level detail of one period
    Period {
        period: String,

        #[arg(long, value_name = "RANGE")]
        range: Option<String>,

        #[arg(long, help = "Print raw JSON")]
        json: bool,
    },

    /// Billed and internal consumption grouped by client
    Person {
        #[arg(long, value_name = "RANGE")]
        range: Option<String>,

        #[arg(long, help = "Only this client (exact name)")]
        client: Option<String>,

        #[arg(long, help = "Print raw JSON")]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// List every setting
    List,

    /// Print one setting
    Get { key: String },

    /// Store a setting; the value is JSON (bare words are taken as strings)
    Set { key: String, value: String },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Add or update a user
    Add {
        username: String,

        #[arg(long, default_value = "operator", help = "administrator or operator")]
        role: String,

        #[arg(long = "shift", help = "Shift assigned to an operator (repeatable)")]
        shifts: Vec<String>,

        #[arg(long = "page", help = "Page the user may open (repeatable)")]
        pages: Vec<String>,
    },

    /// List users
    List,

    /// Delete a user
    Del { username: String },
}
