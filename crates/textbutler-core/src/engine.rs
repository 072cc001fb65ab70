use crate::buffer::MatchBuffer;
use crate::table::SnippetTable;

/// The delete+insert pair produced when a shortcut is recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Number of characters to erase: the shortcut's character count.
    pub delete_count: usize,
    /// Replacement text to type in its place.
    pub insert: String,
}

/// Reactive shortcut matcher. Feed it one character per keystroke; it
/// returns an [`Expansion`] whenever the trailing window contains one of
/// the active table's shortcuts.
///
/// The engine is single-writer by design: one serialized stream of
/// characters drives it, and a reload is just an atomic swap of the table
/// between two keystrokes.
#[derive(Debug, Clone, Default)]
pub struct ExpansionEngine {
    table: SnippetTable,
    buffer: MatchBuffer,
}

impl ExpansionEngine {
    pub fn new(table: SnippetTable) -> Self {
        let buffer = MatchBuffer::new(table.max_shortcut_len());
        Self { table, buffer }
    }

    /// Process one typed character.
    ///
    /// At most one expansion fires per character; on a hit the window is
    /// cleared before returning so the replacement cannot re-trigger.
    pub fn on_char(&mut self, c: char) -> Option<Expansion> {
        self.buffer.push(c);

        let window = self.buffer.contents();
        let (shortcut, replacement) = self.table.best_match(&window)?;
        let expansion = Expansion {
            delete_count: shortcut.chars().count(),
            insert: replacement.to_string(),
        };

        self.buffer.clear();
        Some(expansion)
    }

    /// Swap in a freshly built table. The window cap follows the new
    /// longest shortcut; surplus characters are trimmed from the front and
    /// the rest of the window is kept.
    pub fn reload(&mut self, table: SnippetTable) {
        self.buffer.resize(table.max_shortcut_len());
        self.table = table;
    }

    pub fn table(&self) -> &SnippetTable {
        &self.table
    }

    pub fn buffer(&self) -> &MatchBuffer {
        &self.buffer
    }
}
