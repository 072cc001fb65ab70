use crate::engine::Expansion;
use crate::error::Result;

/// One atomic action on the emission side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputAction {
    /// Erase exactly one character before the insertion point.
    DeleteOne,
    /// Type one literal character.
    Char(char),
    /// Press the dedicated newline/submit key.
    Newline,
}

/// Source of typed characters.
///
/// `listen` blocks for the lifetime of the capture and invokes the callback
/// once per physical keystroke: `Some(char)` for a printable key, `None`
/// for keys that carry no printable character.
pub trait InputPort {
    fn listen(self, on_key: Box<dyn FnMut(Option<char>) + Send>) -> Result<()>;
}

/// Sink for synthetic keyboard actions.
pub trait OutputPort {
    fn emit(&mut self, action: OutputAction) -> Result<()>;
}

/// Replay an expansion into an output port.
///
/// Ordering is a hard contract: the full shortcut is erased first, then the
/// replacement is typed character by character, with line feeds translated
/// to the newline action instead of a literal character.
pub fn perform_expansion(expansion: &Expansion, out: &mut dyn OutputPort) -> Result<()> {
    for _ in 0..expansion.delete_count {
        out.emit(OutputAction::DeleteOne)?;
    }
    for c in expansion.insert.chars() {
        if c == '\n' {
            out.emit(OutputAction::Newline)?;
        } else {
            out.emit(OutputAction::Char(c))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingOutput {
        actions: Vec<OutputAction>,
    }

    impl OutputPort for RecordingOutput {
        fn emit(&mut self, action: OutputAction) -> Result<()> {
            self.actions.push(action);
            Ok(())
        }
    }

    #[test]
    fn deletes_before_inserting() {
        let expansion = Expansion {
            delete_count: 3,
            insert: "ok".to_string(),
        };
        let mut out = RecordingOutput::default();
        perform_expansion(&expansion, &mut out).unwrap();
        assert_eq!(
            out.actions,
            vec![
                OutputAction::DeleteOne,
                OutputAction::DeleteOne,
                OutputAction::DeleteOne,
                OutputAction::Char('o'),
                OutputAction::Char('k'),
            ]
        );
    }

    #[test]
    fn line_feed_becomes_the_newline_action() {
        let expansion = Expansion {
            delete_count: 2,
            insert: "thank you\n".to_string(),
        };
        let mut out = RecordingOutput::default();
        perform_expansion(&expansion, &mut out).unwrap();

        let mut expected = vec![OutputAction::DeleteOne, OutputAction::DeleteOne];
        expected.extend("thank you".chars().map(OutputAction::Char));
        expected.push(OutputAction::Newline);
        assert_eq!(out.actions, expected);
    }

    #[test]
    fn empty_insert_only_deletes() {
        let expansion = Expansion {
            delete_count: 1,
            insert: String::new(),
        };
        let mut out = RecordingOutput::default();
        perform_expansion(&expansion, &mut out).unwrap();
        assert_eq!(out.actions, vec![OutputAction::DeleteOne]);
    }
}
