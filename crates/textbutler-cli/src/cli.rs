use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    version = env!("CARGO_PKG_VERSION"),
    about = "textbutler - background text expansion",
    long_about = "textbutler watches your typing and replaces configured shortcuts \
                  with their expansion text, system-wide."
)]
pub struct TextButler {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new snippet
    Add {
        #[clap(long, short = 's', help = "Shortcut that triggers the expansion")]
        shortcut: String,

        #[clap(long, short = 't', help = "Replacement text")]
        text: String,
    },
    /// Delete a snippet by shortcut
    Delete {
        #[clap(long, short, help = "Shortcut of the snippet to delete")]
        shortcut: String,
    },
    /// Update an existing snippet by shortcut
    Update {
        #[clap(long, short = 's', help = "Shortcut of the snippet to update")]
        shortcut: String,

        #[clap(long, short = 't', help = "New replacement text")]
        text: String,
    },
    /// List all configured snippets
    List,
    /// Start the background expansion daemon
    Start,
    /// Stop the textbutler daemon
    Stop,
    /// Check the status of the textbutler daemon
    Status,
    // Hidden command used internally to run the daemon worker
    #[clap(hide = true)]
    DaemonWorker,
}
