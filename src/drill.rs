//! Terminal presentation for the interactive drill
//!
//! Items are numbered from 1 on screen and from 0 on the board.

use std::fmt::Write as _;

use crate::trainer::ItemView;

/// Shown in place of a hidden number
pub const MASK: &str = "? ? ?";

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    /// Single click on a board index
    Click(usize),
    /// Double click on a board index
    DoubleClick(usize),
    /// Draw new numbers
    Regenerate,
    /// Switch language
    Language(String),
    /// Print the help text
    Help,
    /// Leave the drill
    Quit,
}

/// Help text for the drill
pub const HELP: &str = "\
  c N    click item N (speak it)
  d N    double-click item N (reveal it)
  g      generate new numbers
  l TAG  switch language (e.g. en-US, zh-TW)
  h      show this help
  q      quit";

/// Parse one input line
///
/// # Errors
///
/// Returns a message describing why the line was not understood
pub fn parse_gesture(line: &str) -> Result<Gesture, String> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Err("empty input".to_string());
    };
    let arg = parts.next();

    match (verb.to_lowercase().as_str(), arg) {
        ("c" | "click", Some(n)) => item_index(n).map(Gesture::Click),
        ("d" | "double", Some(n)) => item_index(n).map(Gesture::DoubleClick),
        ("c" | "click" | "d" | "double", None) => Err(format!("{verb} needs an item number")),
        ("g" | "generate", _) => Ok(Gesture::Regenerate),
        ("l" | "lang", Some(tag)) => Ok(Gesture::Language(tag.to_string())),
        ("l" | "lang", None) => Err("lang needs a language tag".to_string()),
        ("h" | "help" | "?", _) => Ok(Gesture::Help),
        ("q" | "quit" | "exit", _) => Ok(Gesture::Quit),
        _ => Err(format!("unknown command: {verb}")),
    }
}

/// Convert a 1-based item number to a board index
fn item_index(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("not an item number: {raw}")),
    }
}

/// Render the board, masking hidden items
#[must_use]
pub fn render(items: &[ItemView]) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        let text = if item.revealed { item.text.as_str() } else { MASK };
        let _ = writeln!(out, "{:>3}. {text}", i + 1);
    }
    out
}
