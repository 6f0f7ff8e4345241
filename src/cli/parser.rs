use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rAttendance.
/// Turns chat-export check-ins into daily attendance records stored in SQLite.
#[derive(Parser)]
#[command(
    name = "rattendance",
    version = env!("CARGO_PKG_VERSION"),
    about = "Attendance ledger fed by chat-group check-in messages, backed by SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Report missing or invalid configuration keys")]
        check: bool,

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

    /// Manage the database (migrations, integrity checks, etc.)
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

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "op", help = "Only rows with this operation (e.g. ingest, remap)")]
        operation: Option<String>,
    },

    /// Ingest a chat export and reconcile it into the attendance ledger
    Ingest {
        #[arg(long, value_name = "FILE", conflicts_with = "inbox", help = "Chat export (.txt or .zip)")]
        file: Option<String>,

        #[arg(long, help = "Pick the newest matching export from the configured inbox_dir")]
        inbox: bool,

        #[arg(long, value_name = "PATTERN", help = "Override subject_pattern for --inbox")]
        subject: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Only inbox files received on this date")]
        date: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Override cutoff_date for this run")]
        since: Option<String>,

        #[arg(long = "dry-run", help = "Compute and report without writing")]
        dry_run: bool,

        #[arg(long, help = "Print the per-date breakdown")]
        details: bool,
    },

    /// Manage the people directory
    People {
        #[command(subcommand)]
        action: PeopleAction,
    },

    /// Manage holidays
    Holiday {
        #[command(subcommand)]
        action: HolidayAction,
    },

    /// Leave requests and approvals
    Leave {
        #[command(subcommand)]
        action: LeaveAction,
    },

    /// Manual attendance entries and listings
    Attendance {
        #[command(subcommand)]
        action: AttendanceAction,
    },

    /// Senders that matched nobody in the directory
    Unmatched {
        #[command(subcommand)]
        action: UnmatchedAction,
    },

    /// Monthly per-person attendance summary
    Summary {
        #[arg(long, value_name = "YYYY-MM")]
        month: String,

        #[arg(long, help = "Print the summary as JSON")]
        json: bool,
    },

    /// Export attendance records or the unmatched log
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

        #[arg(long, short = 'u', help = "Export the unmatched-sender log instead")]
        unmatched: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum PeopleAction {
    /// Add a person; pending unmatched senders are re-checked
    Add {
        name: String,

        #[arg(long, help = "Name as it appears in the chat export")]
        alias: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },

    /// Edit a person; pending unmatched senders are re-checked
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, help = "Chat alias; an empty value clears it")]
        alias: Option<String>,

        #[arg(long, help = "Phone number; an empty value clears it")]
        phone: Option<String>,

        #[arg(long, help = "Email; an empty value clears it")]
        email: Option<String>,

        #[arg(long, help = "Reactivate a deactivated person")]
        activate: bool,
    },

    /// List people
    List {
        #[arg(long, help = "Include inactive people")]
        all: bool,
    },

    /// Deactivate a person (kept for history, ignored by matching)
    Deactivate { id: i64 },
}

#[derive(Subcommand)]
pub enum HolidayAction {
    Add {
        #[arg(value_name = "YYYY-MM-DD")]
        date: String,

        name: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long)]
        optional: bool,
    },

    List {
        #[arg(long)]
        year: Option<i32>,
    },

    Del {
        #[arg(value_name = "YYYY-MM-DD")]
        date: String,
    },
}

#[derive(Subcommand)]
pub enum LeaveAction {
    /// File a leave request (starts as pending)
    Apply {
        person: i64,

        #[arg(long, value_name = "YYYY-MM-DD")]
        from: String,

        #[arg(long, value_name = "YYYY-MM-DD")]
        to: String,

        #[arg(long, default_value = "")]
        reason: String,

        #[arg(long = "type", default_value = "casual")]
        leave_type: String,
    },

    Approve {
        id: i64,

        #[arg(long, default_value = "")]
        remarks: String,
    },

    Reject {
        id: i64,

        #[arg(long, default_value = "")]
        remarks: String,
    },

    List {
        #[arg(long, value_parser = ["pending", "approved", "rejected"])]
        status: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum AttendanceAction {
    /// Set a record by hand; ingestion will not overwrite it
    Set {
        person: i64,

        #[arg(value_name = "YYYY-MM-DD")]
        date: String,

        #[arg(long, help = "O=on-site, R=remote, L=on leave, H=holiday, A=absent")]
        status: String,

        #[arg(long = "in", value_name = "HH:MM")]
        in_time: Option<String>,

        #[arg(long = "out", value_name = "HH:MM")]
        out_time: Option<String>,

        #[arg(long, default_value = "")]
        remarks: String,
    },

    /// List records for a day or range (default: today)
    List {
        #[arg(long, short, value_name = "RANGE")]
        period: Option<String>,

        #[arg(long)]
        person: Option<i64>,
    },
}

#[derive(Subcommand)]
pub enum UnmatchedAction {
    List {
        #[arg(long, help = "Include resolved rows")]
        all: bool,
    },

    /// Re-run matching for every active person
    Resolve,
}
