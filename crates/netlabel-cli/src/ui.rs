use std::io::IsTerminal;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::{Confirm, InquireError};

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏✓";

pub const DISCLAIMER: &str = "\
This tool modifies the native KiCad schematic file (.kicad_sch) directly.
A backup (.bak) will be saved alongside the original.
Run this tool outside your project root to minimize corruption risk.
Labels are placed outside the title block at the top-left of the sheet.";

/// Status icons
pub mod icons {
    use colored::Colorize;

    pub fn success() -> String {
        "✓".green().to_string()
    }

    pub fn error() -> String {
        "✗".red().to_string()
    }

    pub fn warning() -> String {
        "!".yellow().to_string()
    }
}

/// Show the disclaimer and ask whether to go ahead. Escape or Ctrl-C count as
/// "no".
pub fn confirm_disclaimer() -> Result<bool> {
    if !std::io::stdin().is_terminal() {
        anyhow::bail!(
            "Refusing to modify the schematic without confirmation; pass --yes to run non-interactively"
        );
    }

    eprintln!("{} {}", icons::warning(), "Disclaimer".yellow().bold());
    eprintln!("{DISCLAIMER}");
    eprintln!();

    match Confirm::new("Proceed?")
        .with_default(false)
        .with_help_message("Answer 'n' to cancel without touching any file")
        .prompt()
    {
        Ok(answer) => Ok(answer),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Spinner counting labels as they are placed.
pub struct LabelProgress {
    bar: ProgressBar,
}

impl LabelProgress {
    pub fn start(message: impl Into<String>) -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{pos}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(TICK_CHARS);
        bar.set_style(style);
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    pub fn placed(&self, text: &str) {
        self.bar.inc(1);
        self.bar.set_message(format!("Placed {text}"));
    }

    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}
