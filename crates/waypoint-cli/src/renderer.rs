//! Terminal rendering of plan documents
//!
//! Rich output styles headers and checklist lines with termimad and prints
//! the embedded state block verbatim. Plain output prints the document as is.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

/// How a single document line should be printed.
#[derive(Debug, PartialEq, Eq)]
enum LineStyle {
    Header,
    Done,
    Verbatim,
    Inline,
}

impl TerminalRenderer {
    /// Create a new terminal renderer
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render a markdown plan document to the terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        let mut in_fence = false;
        for line in markdown.lines() {
            match classify(line, &mut in_fence) {
                LineStyle::Header => println!("\x1b[34m{line}\x1b[0m"),
                LineStyle::Done => println!("\x1b[32m{line}\x1b[0m"),
                LineStyle::Verbatim => println!("\x1b[2m{line}\x1b[0m"),
                LineStyle::Inline => {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

fn classify(line: &str, in_fence: &mut bool) -> LineStyle {
    if line.starts_with("```") {
        *in_fence = !*in_fence;
        return LineStyle::Verbatim;
    }
    if *in_fence || line.starts_with("<!--") {
        return LineStyle::Verbatim;
    }
    if line.starts_with('#') {
        return LineStyle::Header;
    }
    if line.contains("] (completed) ") {
        return LineStyle::Done;
    }
    LineStyle::Inline
}
