// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal output for the phrasematch CLI.
//!
//! Boxed sections with a OneDark palette, or One Light when
//! `PHRASEMATCH_THEME=light`. Colors are dropped when `NO_COLOR` is set or
//! stdout is not a terminal, so piped output stays plain.

use std::sync::OnceLock;

/// Width between the `│` borders.
pub const BOX_WIDTH: usize = 64;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    match std::env::var("PHRASEMATCH_THEME").as_deref() {
        Ok("light") | Ok("l") => Theme::Light,
        _ => Theme::Dark,
    }
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

/// Palette entry: (dark, light).
type Rgb = (u8, u8, u8);
const GREEN: (Rgb, Rgb) = ((152, 195, 121), (80, 161, 79));
const YELLOW: (Rgb, Rgb) = ((229, 192, 123), (193, 132, 1));
const CYAN: (Rgb, Rgb) = ((86, 182, 194), (1, 132, 188));
const GRAY: (Rgb, Rgb) = ((92, 99, 112), (160, 161, 167));

fn escape((dark, light): (Rgb, Rgb)) -> String {
    let (r, g, b) = match theme() {
        Theme::Dark => dark,
        Theme::Light => light,
    };
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

/// Check if colors should be used (TTY detection).
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

fn paint(palette: (Rgb, Rgb), bold: bool, text: &str) -> String {
    if !use_colors() {
        return text.to_string();
    }
    let weight = if bold { BOLD } else { "" };
    format!("{}{}{}{}", weight, escape(palette), text, RESET)
}

fn border(text: &str) -> String {
    paint(GRAY, false, text)
}

/// Display width, ignoring ANSI escapes.
pub fn visible_len(s: &str) -> usize {
    let mut len = 0;
    let mut in_escape = false;
    for c in s.chars() {
        match (in_escape, c) {
            (false, '\x1b') => in_escape = true,
            (true, 'm') => in_escape = false,
            (true, _) => {}
            (false, _) => len += 1,
        }
    }
    len
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let label = format!("─ {} ", paint(CYAN, true, label));
    let rest = BOX_WIDTH.saturating_sub(visible_len(&label));
    println!("{}{}{}", border("┌"), label, border(&format!("{}┐", "─".repeat(rest))));
}

/// Print content line: │ text          │
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content) + 1);
    println!("{} {}{}{}", border("│"), content, " ".repeat(pad), border("│"));
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    println!("{}", border(&format!("└{}┘", "─".repeat(BOX_WIDTH))));
}

/// Key/value row with the key dimmed.
pub fn field_row(key: &str, value: &str) {
    row(&format!("{} {}", paint(GRAY, false, &pad_right(key, 14)), value));
}

pub fn score(score: f32) -> String {
    let text = format!("{:.4}", score);
    if score > 0.0 {
        paint(GREEN, true, &text)
    } else {
        paint(YELLOW, false, &text)
    }
}

/// Right-pad a string to `width` characters (visible width).
pub fn pad_right(s: &str, width: usize) -> String {
    let len = visible_len(s);
    if len >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - len))
    }
}
