// ============================================================================
// audex-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL OUTPUT: UI Components and Styling
//
// Section headers, status lines and the success/error messages printed by the
// CLI. Colors come from `console`, which already honours NO_COLOR and
// disables styling when the stream is not a terminal.

use console::style;

/// Styling constants for terminal output
pub mod styling {
    pub const SUCCESS_SYMBOL: &str = "✓";
    pub const ERROR_SYMBOL: &str = "✗";
    pub const WARNING_SYMBOL: &str = "!";

    pub const STATUS_INDENT: &str = "      ";
    pub const LABEL_WIDTH: usize = 15;
}

/// Pads `label:` to a fixed column so values line up.
pub fn status_line(label: &str, value: &str) -> String {
    let padding = styling::LABEL_WIDTH.saturating_sub(label.len()).max(1);
    format!("{}{}:{}{}", styling::STATUS_INDENT, label, " ".repeat(padding), value)
}

/// Print a section header (cyan, upper case)
pub fn print_section(title: &str) {
    println!();
    println!("===== {} =====", style(title.to_uppercase()).cyan().bold());
    println!();
}

/// Print a status line, optionally with the value in bold
pub fn print_status(label: &str, value: &str, highlight: bool) {
    if highlight {
        println!("{}", status_line(label, &style(value).bold().to_string()));
    } else {
        println!("{}", status_line(label, value));
    }
}

pub fn print_success(message: &str) {
    println!();
    println!("  {} {}", styling::SUCCESS_SYMBOL, style(message).green());
}

pub fn print_warning(message: &str) {
    eprintln!("  {} {}", style(styling::WARNING_SYMBOL).yellow().bold(), style(message).yellow());
}

/// Print an error title and detail to stderr
pub fn print_error(title: &str, message: &str) {
    eprintln!();
    eprintln!(
        "  {} {}",
        style(styling::ERROR_SYMBOL).bold().red(),
        style(title).bold().red()
    );
    eprintln!("    {}", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_alignment() {
        assert_eq!(status_line("Source", "a.mp4"), "      Source:         a.mp4");
        assert_eq!(
            status_line("A very long label here", "x"),
            "      A very long label here: x"
        );
    }
}
