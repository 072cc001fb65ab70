pub mod buffer;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod ports;
pub mod storage;
pub mod table;

// Re-export common items for convenience
pub use buffer::MatchBuffer;
pub use config::{ensure_config_dir, get_config_dir, get_snippets_file_path, is_daemon_running};
pub use engine::{Expansion, ExpansionEngine};
pub use error::{Result, TextButlerError};
pub use models::Snippet;
pub use ports::{perform_expansion, InputPort, OutputAction, OutputPort};
pub use storage::{add_snippet, delete_snippet, find_snippet, load_snippets, update_snippet};
pub use table::SnippetTable;
