// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::{
    app::{AppState, Focus},
    theme::Theme,
};

/// A parsed, validated command ready to be executed by the app shell.
///
/// | Command | Action |
/// |---------|--------|
/// | `q`, `quit` | Quit |
/// | `q!`, `quit!` | Quit |
/// | `help` | Toggle the help popup |
/// | `theme <name>` | Switch theme (`default`, `gruvbox`) |
/// | `clear` | Empty the search |
/// | `reload` | Load the flats again from the source |
/// | `page <n>` | Jump to page `n` |
/// | `fields` | Show or hide the field palette |
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    // Same as quit; kept for muscle memory
    Exit,
    Help,
    Theme(String),
    Clear,
    Reload,
    Page(usize),
    TogglePalette,
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "q!" | "quit!" => Ok(Command::Exit),
            "help" => Ok(Command::Help),
            "clear" => Ok(Command::Clear),
            "reload" => Ok(Command::Reload),
            "fields" | "palette" => Ok(Command::TogglePalette),
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            "page" => match rest.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(Command::Page(n)),
                _ => Err("usage: page <n>, n ≥ 1".to_string()),
            },
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit | Command::Exit => {
            s.quit = true;
        }
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Theme(name) => {
            s.theme = Theme::by_name(&name);
        }
        Command::Clear => s.clear_query(),
        Command::Reload => s.request_reload(),
        Command::Page(n) => s.list.go_to_page(n),
        Command::TogglePalette => {
            s.show_palette = !s.show_palette;
            // A hidden palette must not keep the keyboard.
            if !s.show_palette && s.focus == Focus::Palette {
                s.focus = Focus::List;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
