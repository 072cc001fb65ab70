use crate::config::{ensure_config_dir, get_snippets_file_path};
use crate::error::{Result, TextButlerError};
use crate::models::Snippet;
use std::fs;
use std::path::Path;

/// Read snippets from an explicit path. An empty file is an empty list.
pub fn read_snippets(path: &Path) -> Result<Vec<Snippet>> {
    if !path.exists() {
        return Err(TextButlerError::SnippetsNotFound(
            path.to_string_lossy().to_string(),
        ));
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(vec![]);
    }

    serde_json::from_str(&content).map_err(|e| e.into())
}

/// Write the full snippet list to an explicit path
pub fn write_snippets(path: &Path, snippets: &[Snippet]) -> Result<()> {
    let serialized = serde_json::to_string_pretty(snippets)?;
    fs::write(path, serialized)?;
    Ok(())
}

/// Load all snippets from the configured snippets file
pub fn load_snippets() -> Result<Vec<Snippet>> {
    read_snippets(&get_snippets_file_path())
}

/// Save snippets to the configured snippets file
pub fn save_snippets(snippets: &[Snippet]) -> Result<()> {
    ensure_config_dir()?;
    write_snippets(&get_snippets_file_path(), snippets)
}

/// Add a new snippet. An existing shortcut is not an error; the entry is
/// appended and resolves last-write-wins when the table is built.
pub fn add_snippet(shortcut: String, text: String) -> Result<()> {
    let mut snippets = match load_snippets() {
        Ok(s) => s,
        Err(TextButlerError::SnippetsNotFound(_)) => vec![],
        Err(e) => return Err(e),
    };

    snippets.push(Snippet::new(shortcut, text));
    save_snippets(&snippets)
}

/// Delete a snippet by shortcut
pub fn delete_snippet(shortcut: &str) -> Result<()> {
    let mut snippets = load_snippets()?;
    snippets.retain(|entry| entry.shortcut != shortcut);
    save_snippets(&snippets)
}

/// Update an existing snippet's replacement text
pub fn update_snippet(shortcut: &str, new_text: String) -> Result<()> {
    let mut snippets = load_snippets()?;
    let mut updated = false;

    for entry in &mut snippets {
        if entry.shortcut == shortcut {
            entry.text = new_text.clone();
            updated = true;
        }
    }

    if !updated {
        return Err(TextButlerError::Other(format!(
            "Shortcut '{}' not found",
            shortcut
        )));
    }

    save_snippets(&snippets)
}

/// Find a snippet by shortcut
pub fn find_snippet<'a>(snippets: &'a [Snippet], shortcut: &str) -> Option<&'a Snippet> {
    snippets.iter().find(|entry| entry.shortcut == shortcut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn snippet(shortcut: &str, text: &str) -> Snippet {
        Snippet::new(shortcut.to_string(), text.to_string())
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snippets.json");

        let snippets = vec![snippet("brb", "be right back"), snippet("ty", "thank you\n")];
        write_snippets(&path, &snippets).unwrap();

        let loaded = read_snippets(&path).unwrap();
        assert_eq!(loaded, snippets);
    }

    #[test]
    fn empty_file_is_an_empty_list() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snippets.json");
        fs::write(&path, "  \n").unwrap();

        assert_eq!(read_snippets(&path).unwrap(), vec![]);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.json");

        match read_snippets(&path) {
            Err(TextButlerError::SnippetsNotFound(p)) => assert!(p.contains("nope.json")),
            other => panic!("expected SnippetsNotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snippets.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            read_snippets(&path),
            Err(TextButlerError::Json(_))
        ));
    }

    #[test]
    fn duplicate_shortcuts_survive_storage() {
        // Storage keeps duplicates as written; the table build resolves
        // them last-write-wins.
        let dir = tempdir().unwrap();
        let path = dir.path().join("snippets.json");

        let snippets = vec![snippet("a", "1"), snippet("a", "2")];
        write_snippets(&path, &snippets).unwrap();
        assert_eq!(read_snippets(&path).unwrap().len(), 2);
    }

    #[test]
    fn find_snippet_matches_exact_shortcut() {
        let snippets = vec![snippet("brb", "be right back"), snippet("br", "bounce rate")];
        assert_eq!(find_snippet(&snippets, "br").unwrap().text, "bounce rate");
        assert!(find_snippet(&snippets, "b").is_none());
    }
}
