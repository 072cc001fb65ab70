use crate::cli::Commands;
use textbutler_core::{
    add_snippet, delete_snippet, find_snippet, load_snippets, update_snippet, Result,
    TextButlerError,
};
use textbutler_daemon::{daemon_status, run_daemon_worker, start_daemon, stop_daemon};

pub fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Add { shortcut, text } => {
            add_snippet(shortcut, text).map(|_| println!("Snippet added successfully"))
        }
        Commands::Delete { shortcut } => {
            let snippets = load_snippets()?;
            if find_snippet(&snippets, &shortcut).is_none() {
                println!("No snippet with shortcut '{}'", shortcut);
                return Ok(());
            }
            delete_snippet(&shortcut).map(|_| println!("Snippet deleted successfully"))
        }
        Commands::Update { shortcut, text } => {
            update_snippet(&shortcut, text).map(|_| println!("Snippet updated successfully"))
        }
        Commands::List => list_snippets(),
        Commands::Start => start_daemon(),
        Commands::Stop => stop_daemon(),
        Commands::Status => daemon_status(),
        Commands::DaemonWorker => run_daemon_worker(),
    }
}

fn list_snippets() -> Result<()> {
    let snippets = match load_snippets() {
        Ok(snippets) => snippets,
        Err(TextButlerError::SnippetsNotFound(_)) => vec![],
        Err(e) => return Err(e),
    };

    if snippets.is_empty() {
        println!("No snippets configured. Add one with 'textbutler add'.");
        return Ok(());
    }

    let width = snippets
        .iter()
        .map(|s| s.shortcut.chars().count())
        .max()
        .unwrap_or(0);

    for snippet in &snippets {
        // Show only the first line of multi-line replacements
        let preview = snippet.text.lines().next().unwrap_or("");
        let ellipsis = if snippet.text.lines().count() > 1 {
            " ..."
        } else {
            ""
        };
        println!("{:width$}  {}{}", snippet.shortcut, preview, ellipsis);
    }

    Ok(())
}
