//! Startup banner and the rotating suggestion list.

use std::io::{self, Write};

use ratatui::crossterm::style::{Color, Stylize};

use crate::core::session::SessionId;
use crate::ui::status::random_index;

const BLUE: Color = Color::Rgb { r: 0xb8, g: 0xd4, b: 0xe3 };
const CORAL: Color = Color::Rgb { r: 0xc4, g: 0x78, b: 0x5a };
const SMILE: Color = Color::Rgb { r: 0x8a, g: 0x80, b: 0x76 };

pub const SUGGESTIONS: &[&str] = &[
    "Create an AEP acquisition journey for Miami",
    "What's the difference between a D-SNP and C-SNP?",
    "Explain the Medicare enrollment periods",
    "Build a retention journey for rural Texas",
    "What channels work best for low-income seniors?",
    "Create an OEP winback campaign for Southern California",
    "How should I approach dual-eligible members?",
    "What compliance rules should I know about?",
];

pub fn random_suggestion() -> &'static str {
    SUGGESTIONS[random_index(SUGGESTIONS.len())]
}

/// Dim hint shown in an empty chat prompt.
pub fn prompt_placeholder(suggestion: &str) -> String {
    format!("Ask me to {}...", suggestion.to_lowercase())
}

pub fn print_splash<W: Write>(out: &mut W, session: &SessionId, suggestion: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "  {}{}", "▄████▄".with(BLUE), "▄████▄".with(CORAL))?;
    writeln!(out, " {}{}", "████████".with(BLUE), "████████".with(CORAL))?;
    writeln!(out, "  {}{}", "▀████▀".with(BLUE), "▀████▀".with(CORAL))?;
    writeln!(out, "    {}", "╰──────╯".with(SMILE))?;
    writeln!(out)?;

    writeln!(out, "  {}", "TerryAnn".bold())?;
    writeln!(out, "  {}", "Medicare Journey Intelligence".dim())?;
    writeln!(out)?;
    writeln!(out, "  {}", "─".repeat(30).dim())?;
    writeln!(out)?;

    writeln!(
        out,
        "  {}  {}  {} {}",
        format!("v{}", env!("CARGO_PKG_VERSION")).dim(),
        "│".dim(),
        "Session:".dim(),
        session.short()
    )?;
    writeln!(out)?;

    writeln!(out, "  {}", "Type 'exit' to end  •  Ctrl+C to interrupt".dim())?;
    writeln!(out, "  {}{}{}", "Type ".dim(), "?".dim().bold(), " for help".dim())?;
    writeln!(out)?;

    writeln!(out, "  {}", format!("Try: {suggestion}").dim().italic())?;
    writeln!(out)?;
    out.flush()
}
