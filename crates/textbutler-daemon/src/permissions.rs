use textbutler_core::{Result, TextButlerError};

/// Interactive gate run before the daemon is spawned: verifies the process
/// may observe global keystrokes and inject synthetic input, walking the
/// user through granting access where the platform supports it.
///
/// Monitoring never starts without authorization; a denial is an error,
/// not a degraded mode.
pub fn check_and_request_permissions() -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        if !has_capture_permission() {
            return request_macos_permissions();
        }
    }

    #[cfg(target_os = "linux")]
    {
        if !has_capture_permission() {
            return Err(TextButlerError::PermissionDenied(
                "cannot read /dev/input; add your user to the 'input' group \
                 (usermod -aG input $USER) and log in again"
                    .to_string(),
            ));
        }
    }

    Ok(())
}

/// Non-interactive re-check used by the worker process itself, so a daemon
/// started without authorization fails closed instead of running blind.
pub fn verify_capture_permission() -> Result<()> {
    if has_capture_permission() {
        Ok(())
    } else {
        Err(TextButlerError::PermissionDenied(
            "keystroke capture is not authorized for this process".to_string(),
        ))
    }
}

#[cfg(target_os = "macos")]
fn has_capture_permission() -> bool {
    use std::process::Command;

    // Accessibility access is what gates both the event tap and synthetic
    // events; scripting System Events only succeeds when it is granted.
    Command::new("osascript")
        .arg("-e")
        .arg("tell application \"System Events\" to return name of first process")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

#[cfg(target_os = "macos")]
fn request_macos_permissions() -> Result<()> {
    use std::process::Command;

    println!("textbutler needs accessibility access to read global keystrokes.");
    println!("--------------------------------------------------------------");
    println!("1. Open System Settings > Privacy & Security > Accessibility");
    println!("2. Enable the entry for your terminal (or the textbutler app)");
    println!("3. On macOS 14+ also grant Input Monitoring");
    println!();
    println!("Open the settings pane now? (y/n)");

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    if input.trim().eq_ignore_ascii_case("y") {
        let _ = Command::new("open")
            .arg("x-apple.systempreferences:com.apple.preference.security?Privacy_Accessibility")
            .status();
    }

    println!("\nPress Enter once you've granted permission...");
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    if has_capture_permission() {
        Ok(())
    } else {
        Err(TextButlerError::PermissionDenied(
            "accessibility access was not granted; textbutler cannot monitor keystrokes"
                .to_string(),
        ))
    }
}

#[cfg(target_os = "linux")]
fn has_capture_permission() -> bool {
    use std::fs::{self, File};

    // rdev needs read access to the evdev devices. Root always has it;
    // otherwise probe the first keyboard-capable event node.
    if let Ok(entries) = fs::read_dir("/dev/input") {
        for entry in entries.flatten() {
            let path = entry.path();
            let is_event_node = path
                .file_name()
                .map(|name| name.to_string_lossy().starts_with("event"))
                .unwrap_or(false);
            if is_event_node {
                return File::open(&path).is_ok();
            }
        }
    }
    false
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
fn has_capture_permission() -> bool {
    // Windows installs a low-level hook without a separate permission grant.
    true
}
