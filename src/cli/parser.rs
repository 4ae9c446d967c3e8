use clap::{Parser, Subcommand};

/// Command-line interface definition for rCompanion
/// CLI companion for students: timetable, assignments, attendance and notices
#[derive(Parser)]
#[command(
    name = "rcompanion",
    version = env!("CARGO_PKG_VERSION"),
    about = "A student companion CLI: timetable, assignments, attendance and notices with reminders",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Act as this user instead of the logged-in one
    #[arg(global = true, long = "user", short = 'u')]
    pub user: Option<String>,

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

    /// Log in: make USER the active user for the next commands
    Login {
        /// User identifier (e.g. student id)
        user: String,
    },

    /// Log out the active user
    Logout,

    /// Show the active user and the users with stored data
    Whoami,

    /// Manage the weekly timetable
    Class {
        #[command(subcommand)]
        action: ClassAction,
    },

    /// Manage assignments
    Assignment {
        #[command(subcommand)]
        action: AssignmentAction,
    },

    /// Manage subjects and attendance
    Subject {
        #[command(subcommand)]
        action: SubjectAction,
    },

    /// Manage notices
    Notice {
        #[command(subcommand)]
        action: NoticeAction,
    },

    /// Show stored data (everything when no section is selected)
    List {
        #[arg(long, short = 't', help = "Show the timetable")]
        timetable: bool,

        #[arg(long, short = 'a', help = "Show assignments (sorted by due date)")]
        assignments: bool,

        #[arg(long = "attendance", short = 's', help = "Show subjects and attendance")]
        attendance: bool,

        #[arg(long, short = 'n', help = "Show notices (newest first)")]
        notices: bool,
    },

    /// Run a single reminder scan and print its notifications
    Scan {
        /// Pretend the scan runs at this instant (YYYY-MM-DDTHH:MM or RFC 3339)
        #[arg(long = "at", value_name = "INSTANT")]
        at: Option<String>,
    },

    /// Keep scanning for reminders until interrupted
    Watch {
        /// Seconds between scans (default from config, 60)
        #[arg(long, value_name = "SECS")]
        interval: Option<u64>,

        /// Stop after N scans
        #[arg(long, value_name = "N")]
        ticks: Option<u64>,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum ClassAction {
    /// Add a class to the timetable
    Add {
        /// Subject name
        subject: String,
        /// Day (monday..saturday)
        day: String,
        /// Start time (HH:MM)
        time: String,
        #[arg(long, default_value = "")]
        room: String,
        #[arg(long, default_value = "")]
        professor: String,
    },
    /// Delete a class by id
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum AssignmentAction {
    /// Add an assignment
    Add {
        title: String,
        subject: String,
        /// Due date (YYYY-MM-DDTHH:MM, YYYY-MM-DD HH:MM or RFC 3339)
        due: String,
        #[arg(long, short = 'd', default_value = "")]
        description: String,
    },
    /// Delete an assignment by id
    Del { id: i64 },
    /// Mark an assignment complete / incomplete
    Toggle { id: i64 },
}

#[derive(Subcommand)]
pub enum SubjectAction {
    /// Add a subject to track attendance for
    Add {
        name: String,
        /// Classes already held before tracking started
        #[arg(long, default_value_t = 0)]
        total: u32,
    },
    /// Delete a subject by id
    Del { id: i64 },
    /// Mark attendance: present or absent
    Mark { id: i64, outcome: String },
}

#[derive(Subcommand)]
pub enum NoticeAction {
    /// Post a notice
    Add {
        title: String,
        content: String,
        /// low, medium or high
        #[arg(long, short = 'p', default_value = "medium")]
        priority: String,
    },
    /// Delete a notice by id
    Del { id: i64 },
}
