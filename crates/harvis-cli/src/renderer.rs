//! Terminal rendering for markdown output.
//!
//! Uses termimad for rich display, with a plain-text fallback for
//! `--no-color` and for piping.

use anyhow::Result;
use harvis_core::Notification;
use termimad::{MadSkin, crossterm::style::Color};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
    alert_skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.quote_mark.set_fg(Color::Cyan);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        let mut alert_skin = skin.clone();
        alert_skin.bold.set_fg(Color::Red);
        alert_skin.paragraph.set_fg(Color::Red);

        Self {
            rich_enabled,
            skin,
            alert_skin,
        }
    }

    /// Render markdown text to the terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        self.render_with(&self.skin, markdown);
        Ok(())
    }

    /// Render a notification, highlighting destructive ones
    pub fn notify(&self, notification: &Notification) -> Result<()> {
        let skin = if notification.is_destructive() {
            &self.alert_skin
        } else {
            &self.skin
        };
        self.render_with(skin, &notification.to_string());
        Ok(())
    }

    fn render_with(&self, skin: &MadSkin, markdown: &str) {
        if !self.rich_enabled {
            print!("{markdown}");
            return;
        }

        // Tables need the full text; everything else goes line by line so
        // header hashes stay visible
        if markdown.lines().any(|line| line.starts_with('|')) {
            skin.print_text(markdown);
            return;
        }
        for line in markdown.lines() {
            if line.starts_with('#') {
                println!("\x1b[34m{line}\x1b[0m");
            } else {
                skin.print_inline(line);
                println!();
            }
        }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
        assert!(renderer.notify(&Notification::approved()).is_ok());
    }

    #[test]
    fn test_default_is_rich() {
        let renderer = TerminalRenderer::default();
        assert!(renderer.rich_enabled);
    }
}
