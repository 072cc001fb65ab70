use serde::{Deserialize, Serialize};

/// One shortcut/replacement pair as persisted in the snippets file:
/// a JSON object with exactly the keys `"shortcut"` and `"text"`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub shortcut: String,
    pub text: String,
}

impl Snippet {
    pub fn new(shortcut: String, text: String) -> Self {
        Self { shortcut, text }
    }
}
