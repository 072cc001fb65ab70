use notify_debouncer_mini::new_debouncer;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{info, warn};

use textbutler_core::config::SNIPPETS_FILENAME;
use textbutler_core::storage::read_snippets;
use textbutler_core::{
    get_config_dir, get_snippets_file_path, ExpansionEngine, Result, SnippetTable, TextButlerError,
};

// Coalesces editor save bursts into a single reload.
const DEBOUNCE: Duration = Duration::from_millis(200);

/// Build the table for the snippets file at `path`.
///
/// An unreadable or unparsable file degrades to an empty table so the
/// daemon stays up; the next successful reload restores matching.
pub fn rebuild_table(path: &Path) -> SnippetTable {
    let snippets = match read_snippets(path) {
        Ok(snippets) => snippets,
        Err(e) => {
            warn!("snippets file unreadable, running with an empty table: {}", e);
            Vec::new()
        }
    };
    SnippetTable::build(&snippets)
}

/// Rebuild the snippet table from disk and swap it into the engine.
pub fn reload_engine(engine: &Mutex<ExpansionEngine>) {
    let table = rebuild_table(&get_snippets_file_path());
    info!(
        "loaded {} snippets (longest shortcut: {} chars)",
        table.len(),
        table.max_shortcut_len()
    );

    if let Ok(mut engine) = engine.lock() {
        engine.reload(table);
    }
}

/// True for events that touch the snippets file itself.
pub fn is_snippets_event(path: &Path) -> bool {
    path.file_name()
        .map(|name| name == SNIPPETS_FILENAME)
        .unwrap_or(false)
}

/// Watch the config directory and reload the engine whenever the snippets
/// file changes. The watcher lives on its own thread for the daemon's
/// lifetime; reloads are applied as atomic table swaps.
pub fn start_snippet_watcher(
    engine: Arc<Mutex<ExpansionEngine>>,
    running: Arc<AtomicBool>,
) -> Result<JoinHandle<()>> {
    let (tx, rx) = mpsc::channel();

    let mut debouncer =
        new_debouncer(DEBOUNCE, tx).map_err(|e| TextButlerError::Watch(e.to_string()))?;

    // Watch the directory, not the file: editors that replace the file on
    // save would otherwise detach a file-level watch.
    let config_dir = get_config_dir();
    debouncer
        .watcher()
        .watch(&config_dir, notify::RecursiveMode::NonRecursive)
        .map_err(|e| TextButlerError::Watch(e.to_string()))?;

    info!("watching {} for snippet changes", config_dir.display());

    Ok(thread::spawn(move || {
        // The debouncer stops watching when dropped; tie it to this thread.
        let _debouncer = debouncer;

        while running.load(Ordering::SeqCst) {
            match rx.recv_timeout(Duration::from_millis(500)) {
                Ok(Ok(events)) => {
                    if events.iter().any(|event| is_snippets_event(&event.path)) {
                        reload_engine(&engine);
                    }
                }
                Ok(Err(e)) => warn!("snippets watcher error: {:?}", e),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }))
}
