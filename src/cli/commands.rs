use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dp", about = concat!("daypad v", env!("CARGO_PKG_VERSION"), " - notes and todos for every day"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data file (overrides $DAYPAD_DATA and the config file)
    #[arg(long, global = true, value_name = "FILE")]
    pub data: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the calendar for a month
    Month(MonthArgs),
    /// Show the note and todos of a day
    Show(ShowArgs),
    /// Set the note of a day (an empty string clears it)
    Note(NoteArgs),
    /// Add, toggle or remove todos
    Todo(TodoCmd),
    /// List days that have a note or todos
    List,
    /// View or prune the recovery log
    Recovery(RecoveryCmd),
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct MonthArgs {
    /// Month as YYYY-MM (default: current month)
    pub month: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Date as YYYY-MM-DD, or `today`
    pub date: String,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct NoteArgs {
    /// Date as YYYY-MM-DD, or `today`
    pub date: String,
    /// Note text
    pub text: String,
}

#[derive(Args)]
pub struct TodoCmd {
    #[command(subcommand)]
    pub action: TodoAction,
}

#[derive(Subcommand)]
pub enum TodoAction {
    /// Append a todo
    Add(TodoAddArgs),
    /// Flip a todo between done and not done
    Toggle(TodoIndexArgs),
    /// Remove a todo
    Rm(TodoIndexArgs),
}

#[derive(Args)]
pub struct TodoAddArgs {
    /// Date as YYYY-MM-DD, or `today`
    pub date: String,
    /// Todo text
    pub text: String,
}

#[derive(Args)]
pub struct TodoIndexArgs {
    /// Date as YYYY-MM-DD, or `today`
    pub date: String,
    /// Todo number as shown by `dp show` (1-based)
    pub index: usize,
}

// ---------------------------------------------------------------------------
// Recovery log
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct RecoveryCmd {
    #[command(subcommand)]
    pub action: Option<RecoveryAction>,
    /// Maximum number of entries to show (default: 10)
    #[arg(long)]
    pub limit: Option<usize>,
    /// Show entries after this timestamp (RFC 3339)
    #[arg(long)]
    pub since: Option<String>,
}

#[derive(Subcommand)]
pub enum RecoveryAction {
    /// Remove old entries
    Prune(RecoveryPruneArgs),
    /// Print the absolute path to the recovery log
    Path,
}

#[derive(Args)]
pub struct RecoveryPruneArgs {
    /// Remove entries older than this timestamp (default: 30 days ago)
    #[arg(long)]
    pub before: Option<String>,
    /// Remove all entries
    #[arg(long)]
    pub all: bool,
}
