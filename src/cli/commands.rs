use clap::{Parser, Subcommand};

const VERSION: &str = env!("GIT_VERSION");

#[derive(Parser)]
#[command(
    name = "prodiflow",
    version = VERSION,
    about = "Gamified task tracker CLI",
    after_help = "\
NOTE:
  Requires a git repository. DB is stored at <git-root>/.prodiflow/prodiflow.db
  Run `prodiflow init` before any other command.

EXIT CODES:
  0  Success
  1  Error (DB, validation, invalid input, etc.)

CONTAINER RULES:
  A section holds direct tasks XOR subsections.
  `task add` into a section with subsections requires --sub.
  `sub add` is rejected for a section that already holds direct tasks.
  Deleting a section or subsection cascades to everything inside it.

COMPLETION RULES:
  Completing a task is one-way; a completed task cannot be re-completed.
  Each completion awards 50 points; newly unlocked achievements award
  their bonus exactly once. All stats are recomputed from the store on
  every command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize prodiflow in this repository
    Init,

    /// Section management
    #[command(subcommand)]
    Section(SectionCommands),

    /// Subsection management
    #[command(subcommand)]
    Sub(SubCommands),

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Tasks applicable on a date, with its completed/total pair
    Day {
        /// Date (YYYY-MM-DD)
        date: String,
    },

    /// Month heatmap data (days without tasks are omitted, not 0%)
    Calendar {
        year: i32,
        month: u32,
    },

    /// Overall stats snapshot plus trailing-week heatmap data
    Stats,

    /// Achievement catalog with unlocked state
    Rewards,
}

#[derive(Subcommand)]
pub enum SectionCommands {
    /// Create a section
    Add {
        /// Section title
        title: String,
        /// Display glyph (opaque to the engine)
        #[arg(long, default_value = "📁")]
        icon: String,
    },
    /// List sections with completion percentages
    List,
    /// Show a section's full tree
    Show {
        /// Section title, ID, or ID prefix
        reference: String,
    },
    /// Delete a section and everything inside it
    Delete {
        /// Section title, ID, or ID prefix
        reference: String,
    },
}

#[derive(Subcommand)]
pub enum SubCommands {
    /// Create a subsection inside a section
    Add {
        /// Owning section (title, ID, or ID prefix)
        section: String,
        /// Subsection title
        title: String,
    },
    /// Delete a subsection and its tasks
    Delete {
        /// Owning section (title, ID, or ID prefix)
        section: String,
        /// Subsection title, ID, or ID prefix
        reference: String,
    },
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task
    Add {
        /// Task title
        title: String,
        /// Owning section (title, ID, or ID prefix)
        #[arg(long)]
        section: String,
        /// Owning subsection (required when the section has subsections)
        #[arg(long)]
        sub: Option<String>,
        /// Task kind: daily or deadline
        #[arg(long, default_value = "daily")]
        kind: String,
        /// Applicable date (YYYY-MM-DD); due date for deadline tasks,
        /// target day for daily tasks (defaults to today)
        #[arg(long)]
        due: Option<String>,
        /// Priority: low, medium, or high
        #[arg(long, default_value = "medium")]
        priority: String,
        /// Tag (repeatable)
        #[arg(long)]
        tag: Vec<String>,
    },
    /// List every task
    List,
    /// Show task details
    Show {
        /// Task ID or prefix
        id: String,
    },
    /// Complete a task (one-way), awarding points and achievements
    Complete {
        /// Task ID or prefix
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID or prefix
        id: String,
    },
}
