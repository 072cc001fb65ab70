use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use std::thread;
use std::time::Duration;

use textbutler_core::{
    perform_expansion, Expansion, OutputAction, OutputPort, Result, TextButlerError,
};

/// Synthetic-keyboard output backed by enigo.
pub struct EnigoOutput {
    enigo: Enigo,
    last: Option<OutputAction>,
}

impl EnigoOutput {
    pub fn new() -> Result<Self> {
        let settings = Settings::default();
        let enigo = Enigo::new(&settings).map_err(|err| {
            TextButlerError::Enigo(format!("Failed to create keyboard controller: {}", err))
        })?;
        Ok(Self { enigo, last: None })
    }
}

impl OutputPort for EnigoOutput {
    fn emit(&mut self, action: OutputAction) -> Result<()> {
        // Pause once between the delete burst and the first insertion so the
        // focused application has flushed the erasures before text arrives.
        if matches!(self.last, Some(OutputAction::DeleteOne))
            && !matches!(action, OutputAction::DeleteOne)
        {
            thread::sleep(Duration::from_millis(10));
        }
        self.last = Some(action);

        match action {
            OutputAction::DeleteOne => {
                thread::sleep(Duration::from_millis(2));
                self.enigo
                    .key(Key::Backspace, Direction::Click)
                    .map_err(|err| {
                        TextButlerError::Enigo(format!("Failed to send backspace: {}", err))
                    })
            }
            OutputAction::Char(c) => {
                let mut buf = [0u8; 4];
                self.enigo
                    .text(c.encode_utf8(&mut buf))
                    .map_err(|err| TextButlerError::Enigo(format!("Failed to type text: {}", err)))
            }
            OutputAction::Newline => {
                let result = self
                    .enigo
                    .key(Key::Return, Direction::Click)
                    .map_err(|err| {
                        TextButlerError::Enigo(format!("Failed to type newline: {}", err))
                    });
                // Let the newline register before more text follows.
                thread::sleep(Duration::from_millis(15));
                result
            }
        }
    }
}

/// Erase the matched shortcut and type the replacement in its place.
pub fn replay_expansion(expansion: &Expansion) -> Result<()> {
    let mut out = EnigoOutput::new()?;
    perform_expansion(expansion, &mut out)
}
