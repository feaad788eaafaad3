use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for studylog
/// CLI application to track study time with SQLite
#[derive(Parser)]
#[command(
    name = "studylog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A personal study tracker: timers, goals and weekly reports backed by SQLite",
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

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
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

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Log a study session manually
    Add {
        /// Subject studied
        subject: String,

        /// Minutes spent (positive integer)
        minutes: i64,

        #[arg(long, help = "Date of the session (YYYY-MM-DD, default today)")]
        date: Option<String>,
    },

    /// List study-log entries
    List {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long, short, help = "Filter by subject")]
        subject: Option<String>,
    },

    /// Delete a study-log entry by id
    Del {
        id: i32,

        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },

    /// Manage study-time goals
    Goal {
        #[command(subcommand)]
        action: GoalCommands,
    },

    /// Run the study timer (free or Pomodoro)
    Timer {
        #[command(subcommand)]
        action: TimerCommands,
    },

    /// Manage the todo list
    Todo {
        #[command(subcommand)]
        action: TodoCommands,
    },

    /// Record mock exam results
    Exam {
        #[command(subcommand)]
        action: ExamCommands,
    },

    /// Manage mock exam score goals
    Examgoal {
        #[command(subcommand)]
        action: ExamGoalCommands,
    },

    /// Generate the weekly PDF report
    Report {
        #[arg(long, help = "Last day of the 7-day window (YYYY-MM-DD, default today)")]
        end: Option<String>,

        #[arg(long, value_name = "DIR", help = "Output directory (default current)")]
        output: Option<String>,
    },

    /// Show study-time distribution charts
    Stats {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,
    },

    /// Export study-log data
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "PERIOD",
            help = "Filter export by year/month/day or a custom range"
        )]
        period: Option<String>,

        #[arg(long, short, help = "Filter by subject")]
        subject: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'y', help = "Overwrite an existing backup without asking")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum GoalCommands {
    /// Set (or replace) a goal for the current period
    Set {
        /// Goal type: daily or weekly
        goal_type: String,

        /// Subject, or "All" for every subject
        subject: String,

        /// Target minutes for the period
        target: i64,

        #[arg(long, help = "Any day inside the period (YYYY-MM-DD, default today)")]
        date: Option<String>,

        #[arg(long, default_value = "", help = "Free-form notes")]
        notes: String,
    },

    /// List all goals
    List,

    /// Delete a goal by id
    Del {
        id: i32,

        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },

    /// Show progress towards a goal
    Progress {
        /// Goal type: daily or weekly
        goal_type: String,

        /// Subject, or "All"
        subject: String,

        #[arg(long, help = "Reference date (YYYY-MM-DD, default today)")]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum TimerCommands {
    /// Start a session
    Start {
        #[arg(long, help = "Subject to study (default from config)")]
        subject: Option<String>,

        #[arg(long, help = "Run a Pomodoro session instead of a free timer")]
        pomodoro: bool,
    },

    /// Pause the free timer
    Pause,

    /// Resume a paused free timer
    Resume,

    /// Stop the session (free timer awaits save/discard, Pomodoro aborts)
    Stop,

    /// Save the stopped free-timer session to the study log
    Save,

    /// Discard the stopped free-timer session
    Discard,

    /// Show the current timer state
    Status,

    /// Follow the timer in the terminal, driving Pomodoro transitions
    Watch,
}

#[derive(Subcommand)]
pub enum TodoCommands {
    /// Add a task
    Add { task: String },

    /// List all tasks
    List,

    /// Toggle a task done/undone
    Toggle { id: i32 },

    /// Delete a task by id
    Del {
        id: i32,

        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ExamCommands {
    /// Record a mock exam result
    Add {
        /// Exam date (YYYY-MM-DD)
        date: String,

        /// Subject
        subject: String,

        /// Exam name
        name: String,

        #[arg(long, help = "Score achieved")]
        score: Option<i64>,

        #[arg(long = "max-score", help = "Maximum possible score")]
        max_score: Option<i64>,

        #[arg(long, help = "Deviation value")]
        deviation: Option<f64>,
    },

    /// List recorded mock exams
    List,

    /// Delete a mock exam by id
    Del {
        id: i32,

        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ExamGoalCommands {
    /// Add a target score for an upcoming exam
    Add {
        /// Subject
        subject: String,

        /// Exam name
        name: String,

        /// Exam date (YYYY-MM-DD)
        date: String,

        /// Target score
        target: i64,

        #[arg(long, default_value = "", help = "Free-form notes")]
        notes: String,
    },

    /// List exam goals
    List,

    /// Update the status of an exam goal
    Status {
        id: i32,

        /// New status: active, achieved or missed
        status: String,
    },

    /// Delete an exam goal by id
    Del {
        id: i32,

        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },
}
