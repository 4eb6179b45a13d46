use colored::*;
use tracing::info;
use unicode_width::UnicodeWidthStr;

use crate::terminal::format::Detail;
use crate::terminal::{colors, logging::PRINT_TARGET};

pub const TOTAL_WIDTH: usize = 64;

#[macro_export]
macro_rules! mprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

pub fn banner(no_banner: bool, q_level: u8) {
    if no_banner || q_level > 0 {
        return;
    }

    let title: String = format!("⟦ SWEEP v{} ⟧", env!("CARGO_PKG_VERSION"));
    let pad: usize = TOTAL_WIDTH.saturating_sub(title.width()) / 2;
    let sep: ColoredString = "═".repeat(pad).bright_black();

    print(&format!("{sep}{}{sep}", title.bright_green().bold()));
}

/// Section title centred in a thin rule, hidden from `-q` on.
pub fn header(title: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }

    let label: String = format!("⟦ {} ⟧", title.to_uppercase());
    let dashes: usize = TOTAL_WIDTH.saturating_sub(label.width());
    let left: String = "─".repeat(dashes / 2);
    let right: String = "─".repeat(dashes - dashes / 2);

    print(&format!(
        "{}{}{}",
        left.bright_black(),
        label.bright_green(),
        right.bright_black()
    ));
}

pub fn fat_separator() {
    print(&format!("{}", "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR)));
}

/// Prints `rows` as `> Key.....: value`, keys padded to the longest one.
pub fn details(rows: &[Detail]) {
    let key_width: usize = key_width(rows);

    for (key, value) in rows {
        let dots: String = leader(key, key_width);
        print(&format!(
            "{} {}{}{} {}",
            ">".color(colors::SEPARATOR),
            key.color(colors::PRIMARY),
            dots.color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        ));
    }
}

/// One numbered port entry followed by its detail rows as a tree.
pub fn port_entry(idx: usize, label: &str, rows: &[Detail]) {
    print(&format!(
        "{}{}{} {}",
        "[".color(colors::SEPARATOR),
        idx.to_string().color(colors::ACCENT),
        "]".color(colors::SEPARATOR),
        label.color(colors::PRIMARY)
    ));

    let key_width: usize = key_width(rows);
    for (i, (key, value)) in rows.iter().enumerate() {
        let branch: &str = if i + 1 == rows.len() { "└─" } else { "├─" };
        let dots: String = leader(key, key_width);
        print(&format!(
            " {} {}{}{} {}",
            branch.bright_black(),
            key.color(colors::TEXT_DEFAULT),
            dots.color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        ));
    }
}

fn key_width(rows: &[Detail]) -> usize {
    rows.iter().map(|(key, _)| key.width()).max().unwrap_or(0)
}

/// Dots between `key` and its colon for a column `key_width` wide.
fn leader(key: &str, key_width: usize) -> String {
    ".".repeat((key_width + 1).saturating_sub(key.width()))
}

pub fn centerln(msg: &str) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{space}{msg}{space}"));
}

pub fn no_results(what: &str) {
    centerln(&format!("{}", format!("no {what} found").red().bold()));
}

pub fn end_of_program(q_level: u8) {
    if q_level == 0 {
        fat_separator();
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
