use std::fs::{self, File};
use std::io::Write;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use textbutler_core::config::{get_daemon_log_path, get_pid_file_path};
use textbutler_core::{
    ensure_config_dir, get_snippets_file_path, is_daemon_running, ExpansionEngine, Result,
    SnippetTable, TextButlerError,
};

use crate::keyboard_listener::start_keyboard_listener;
use crate::permissions::{check_and_request_permissions, verify_capture_permission};
use crate::process::verify_process_running;
use crate::watcher::{reload_engine, start_snippet_watcher};

/// Start the daemon as a detached background process
pub fn start_daemon() -> Result<()> {
    if let Some(pid) = is_daemon_running()? {
        if verify_process_running(pid) {
            return Err(TextButlerError::DaemonAlreadyRunning(pid));
        }
        // PID file exists but the process is gone: clean up and restart
        println!("Found stale PID file. Cleaning up and starting a new daemon...");
        let _ = fs::remove_file(get_pid_file_path());
    }

    ensure_config_dir()?;

    // Fail closed: no monitoring without capture/injection authorization
    check_and_request_permissions()?;

    println!("Starting textbutler daemon...");
    spawn_detached_worker()?;

    // Wait for the worker to come up and write its PID file
    for _ in 0..20 {
        thread::sleep(Duration::from_millis(100));
        if is_daemon_running()?.is_some() {
            break;
        }
    }

    match is_daemon_running()? {
        Some(pid) if verify_process_running(pid) => {
            println!("Daemon started successfully with PID {}.", pid);
            Ok(())
        }
        _ => Err(TextButlerError::Other(format!(
            "Daemon failed to start. Check logs at {}",
            get_daemon_log_path().display()
        ))),
    }
}

#[cfg(unix)]
fn spawn_detached_worker() -> Result<()> {
    use std::process::Command;

    let current_exe = std::env::current_exe()?;
    let cmd = format!(
        "nohup {} daemon-worker > {} 2>&1 &",
        current_exe.to_string_lossy(),
        get_daemon_log_path().to_string_lossy()
    );

    Command::new("sh").arg("-c").arg(&cmd).status()?;
    Ok(())
}

#[cfg(windows)]
fn spawn_detached_worker() -> Result<()> {
    use std::process::Command;

    let current_exe = std::env::current_exe()?;
    let cmd = format!(
        "START /B \"textbutler daemon\" \"{}\" daemon-worker > \"{}\" 2>&1",
        current_exe.to_string_lossy(),
        get_daemon_log_path().to_string_lossy()
    );

    Command::new("cmd").arg("/C").arg(&cmd).status()?;
    Ok(())
}

#[cfg(not(any(unix, windows)))]
fn spawn_detached_worker() -> Result<()> {
    Err(TextButlerError::Other(
        "Starting the daemon is not supported on this platform".to_string(),
    ))
}

/// Stop the daemon if it's running
pub fn stop_daemon() -> Result<()> {
    let pid_file = get_pid_file_path();

    if !pid_file.exists() {
        return Err(TextButlerError::DaemonNotRunning);
    }

    let pid_str = match fs::read_to_string(&pid_file) {
        Ok(content) => content,
        Err(e) => {
            let _ = fs::remove_file(&pid_file);
            return Err(TextButlerError::Other(format!(
                "Failed to read PID file: {}",
                e
            )));
        }
    };

    let pid = match pid_str.trim().parse::<u32>() {
        Ok(pid) => pid,
        Err(_) => {
            let _ = fs::remove_file(&pid_file);
            return Err(TextButlerError::InvalidPid);
        }
    };

    if !verify_process_running(pid) {
        println!("Process with PID {} is not running.", pid);
        let _ = fs::remove_file(&pid_file);
        return Ok(());
    }

    terminate_process(pid);

    let _ = fs::remove_file(&pid_file);
    println!("Daemon stopped.");
    Ok(())
}

#[cfg(unix)]
fn terminate_process(pid: u32) {
    use std::process::Command;

    // SIGTERM first for a graceful shutdown
    let _ = Command::new("kill").arg(pid.to_string()).status();

    thread::sleep(Duration::from_millis(500));
    if verify_process_running(pid) {
        println!("Daemon didn't terminate gracefully, using force kill...");
        let _ = Command::new("kill").args(["-9", &pid.to_string()]).status();
    }
}

#[cfg(windows)]
fn terminate_process(pid: u32) {
    use std::process::Command;

    let _ = Command::new("taskkill")
        .args(["/PID", &pid.to_string()])
        .status();

    thread::sleep(Duration::from_millis(500));
    if verify_process_running(pid) {
        println!("Daemon didn't terminate gracefully, using force kill...");
        let _ = Command::new("taskkill")
            .args(["/F", "/T", "/PID", &pid.to_string()])
            .status();
    }
}

#[cfg(not(any(unix, windows)))]
fn terminate_process(_pid: u32) {}

/// Report daemon status to stdout
pub fn daemon_status() -> Result<()> {
    match is_daemon_running()? {
        Some(pid) if verify_process_running(pid) => {
            println!("textbutler daemon is running with PID {}", pid);
            println!("Snippets file: {}", get_snippets_file_path().display());
        }
        Some(pid) => {
            println!("PID file exists but process {} is not running", pid);
            println!("The daemon may have crashed; run 'textbutler stop' then 'textbutler start'");
        }
        None => {
            println!("textbutler daemon is not running");
        }
    }
    Ok(())
}

/// The daemon worker: loads the snippet table, starts the snippets-file
/// watcher and the keystroke listener, and parks until stopped.
pub fn run_daemon_worker() -> Result<()> {
    init_logging();

    // Re-check authorization inside the worker; a denial here means the
    // grant was revoked between spawn and startup. Fail closed.
    verify_capture_permission()?;

    ensure_config_dir()?;

    // Record our PID so start/stop/status can find us
    let pid_file = get_pid_file_path();
    let mut file = File::create(&pid_file)?;
    write!(file, "{}", process::id())?;

    let engine = Arc::new(Mutex::new(ExpansionEngine::new(SnippetTable::empty())));
    reload_engine(&engine);

    let running = Arc::new(AtomicBool::new(true));

    let _watcher = start_snippet_watcher(Arc::clone(&engine), Arc::clone(&running))?;
    let _listener = start_keyboard_listener(Arc::clone(&engine), Arc::clone(&running));

    info!("textbutler daemon up (pid {})", process::id());

    // Park until stopped; removal of the PID file doubles as a shutdown
    // request if the stop signal never lands.
    while running.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_secs(1));
        if !pid_file.exists() {
            info!("PID file removed, shutting down");
            running.store(false, Ordering::SeqCst);
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("TEXTBUTLER_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
