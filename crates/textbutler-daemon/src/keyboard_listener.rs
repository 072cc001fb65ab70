use rdev::{self, EventType};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, warn};

use textbutler_core::{Expansion, ExpansionEngine, InputPort, Result, TextButlerError};

use crate::injector::replay_expansion;
use crate::keyboard::key_event_to_char;

/// Global keystroke capture via rdev's OS hook.
pub struct RdevInput;

impl InputPort for RdevInput {
    fn listen(self, mut on_key: Box<dyn FnMut(Option<char>) + Send>) -> Result<()> {
        rdev::listen(move |event| {
            if let EventType::KeyPress(key) = event.event_type {
                on_key(key_event_to_char(&key, &event));
            }
        })
        .map_err(|e| TextButlerError::Keyboard(format!("{:?}", e)))
    }
}

/// Keeps our own synthetic keystrokes out of the match buffer.
///
/// The OS queues the injected backspaces and replacement characters while
/// the callback is still running and only delivers them to the hook after
/// it returns, so a flag held across the injection call would already be
/// lowered by then. Instead the callback is told exactly how many synthetic
/// key presses are in flight and swallows that many before feeding the
/// engine again.
struct SyntheticGate {
    pending: AtomicUsize,
}

impl SyntheticGate {
    fn new() -> Self {
        Self {
            pending: AtomicUsize::new(0),
        }
    }

    /// Announce `count` synthetic key presses about to be injected.
    fn expect(&self, count: usize) {
        self.pending.fetch_add(count, Ordering::SeqCst);
    }

    /// Forget any outstanding synthetic events, so a failed injection does
    /// not swallow the user's real keystrokes.
    fn clear(&self) {
        self.pending.store(0, Ordering::SeqCst);
    }

    /// Consume one expected synthetic event. Returns true when the current
    /// event was synthetic and must not reach the engine.
    fn absorb(&self) -> bool {
        self.pending
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

/// Key presses the injector will generate for this expansion: one backspace
/// per deleted character, one press per replacement character (a line feed
/// is a single Return press).
fn synthetic_event_count(expansion: &Expansion) -> usize {
    expansion.delete_count + expansion.insert.chars().count()
}

/// One keystroke through the suppression gate and the engine. Returns the
/// expansion to inject, with the gate already armed for its echo.
fn process_key_event(
    key: Option<char>,
    engine: &Mutex<ExpansionEngine>,
    gate: &SyntheticGate,
) -> Option<Expansion> {
    if gate.absorb() {
        return None;
    }
    let c = key?;

    let expansion = engine.lock().ok()?.on_char(c)?;

    // Arm before injecting: the echoed events can start arriving as soon
    // as the first synthetic press is posted.
    gate.expect(synthetic_event_count(&expansion));
    Some(expansion)
}

/// Starts the capture thread: one serialized stream of characters driving
/// the engine, with matched expansions replayed through the injector.
pub fn start_keyboard_listener(
    engine: Arc<Mutex<ExpansionEngine>>,
    running: Arc<AtomicBool>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let gate = Arc::new(SyntheticGate::new());

        let make_callback = || {
            let engine = Arc::clone(&engine);
            let running = Arc::clone(&running);
            let gate = Arc::clone(&gate);

            Box::new(move |key: Option<char>| {
                if !running.load(Ordering::SeqCst) {
                    return;
                }

                if let Some(expansion) = process_key_event(key, &engine, &gate) {
                    debug!(
                        delete_count = expansion.delete_count,
                        "shortcut matched, replaying expansion"
                    );
                    if let Err(e) = replay_expansion(&expansion) {
                        warn!("failed to inject expansion: {}", e);
                        gate.clear();
                    }
                }
            }) as Box<dyn FnMut(Option<char>) + Send>
        };

        // The OS hook should block forever; returning means it failed to
        // attach or was torn down, so retry a few times before giving up.
        let max_retries = 5;
        for attempt in 1..=max_retries {
            if !running.load(Ordering::SeqCst) {
                return;
            }
            match RdevInput.listen(make_callback()) {
                Ok(_) => return,
                Err(e) => {
                    warn!(
                        "keyboard capture stopped ({}), retrying ({}/{})",
                        e, attempt, max_retries
                    );
                    thread::sleep(Duration::from_secs(1));
                }
            }
        }

        error!(
            "failed to keep keyboard capture alive after {} attempts",
            max_retries
        );
    })
}
