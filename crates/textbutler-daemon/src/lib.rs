pub mod daemon_manager;
pub mod injector;
pub mod keyboard;
pub mod keyboard_listener;
pub mod permissions;
pub mod process;
pub mod watcher;

pub use daemon_manager::{daemon_status, run_daemon_worker, start_daemon, stop_daemon};
pub use permissions::check_and_request_permissions;
