use std::collections::VecDeque;

/// Bounded trailing window of the most recently typed characters.
///
/// The cap tracks the longest shortcut of the active table, which keeps the
/// per-keystroke matching cost independent of how long the user has been
/// typing.
#[derive(Debug, Clone, Default)]
pub struct MatchBuffer {
    chars: VecDeque<char>,
    cap: usize,
}

impl MatchBuffer {
    pub fn new(cap: usize) -> Self {
        Self {
            chars: VecDeque::with_capacity(cap),
            cap,
        }
    }

    /// Append one character, dropping the oldest past the cap.
    /// A cap of 0 keeps the buffer permanently empty.
    pub fn push(&mut self, c: char) {
        if self.cap == 0 {
            return;
        }
        self.chars.push_back(c);
        while self.chars.len() > self.cap {
            self.chars.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.chars.clear();
    }

    /// Adopt a new cap when the active table changes, trimming the oldest
    /// characters immediately so the window never holds more than the
    /// longest shortcut needs.
    pub fn resize(&mut self, new_cap: usize) {
        self.cap = new_cap;
        while self.chars.len() > self.cap {
            self.chars.pop_front();
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Current window contents, oldest character first.
    pub fn contents(&self) -> String {
        self.chars.iter().collect()
    }

    /// Occurrence anywhere in the window, not only as a suffix.
    pub fn contains(&self, needle: &str) -> bool {
        self.contents().contains(needle)
    }
}
