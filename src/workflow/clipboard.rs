use std::io::{self, Write};

use crossterm::{clipboard::CopyToClipboard, execute};

use crate::app::Result;

/// Destination for "copy hook text".
pub trait Clipboard {
    fn copy(&self, text: &str) -> Result<()>;
}

/// Copies through the terminal with an OSC 52 escape sequence, which works
/// over SSH and inside tmux when the terminal allows it.
pub struct TerminalClipboard;

impl Clipboard for TerminalClipboard {
    fn copy(&self, text: &str) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(stdout, CopyToClipboard::to_clipboard_from(text))?;
        stdout.flush()?;
        Ok(())
    }
}
