//! Terminal capability detection and styled output

use globetrotter::TripStatus;
use owo_colors::{OwoColorize, colors::css};

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Check if terminal is narrow (< 60 columns)
pub fn is_narrow() -> bool {
    terminal_size::terminal_size().is_some_and(|(width, _)| width.0 < 60)
}

#[derive(Debug, Clone, Copy)]
enum Tone {
    Success,
    Warning,
    Info,
    Accent,
    Dim,
    Bold,
}

fn paint(text: &str, tone: Tone) -> String {
    if !supports_color() {
        return text.to_string();
    }
    match tone {
        Tone::Success => text.fg::<css::Green>().to_string(),
        Tone::Warning => text.fg::<css::Orange>().to_string(),
        Tone::Info => text.fg::<css::LightBlue>().to_string(),
        Tone::Accent => text.fg::<css::Orchid>().to_string(),
        Tone::Dim => text.dimmed().to_string(),
        Tone::Bold => OwoColorize::bold(&text).to_string(),
    }
}

/// Extension trait for colorizing output
pub trait Colorize {
    /// Color as success (green)
    fn success(&self) -> String;
    /// Color as warning (amber)
    fn warning(&self) -> String;
    /// Color as info (blue)
    fn info(&self) -> String;
    /// Dim the text
    fn dim(&self) -> String;
    /// Embolden the text
    fn strong(&self) -> String;
}

impl<T: AsRef<str> + ?Sized> Colorize for T {
    fn success(&self) -> String {
        paint(self.as_ref(), Tone::Success)
    }

    fn warning(&self) -> String {
        paint(self.as_ref(), Tone::Warning)
    }

    fn info(&self) -> String {
        paint(self.as_ref(), Tone::Info)
    }

    fn dim(&self) -> String {
        paint(self.as_ref(), Tone::Dim)
    }

    fn strong(&self) -> String {
        paint(self.as_ref(), Tone::Bold)
    }
}

/// A status badge colored by lifecycle stage.
pub fn status_badge(status: TripStatus) -> String {
    let tone = match status {
        TripStatus::Planning => Tone::Warning,
        TripStatus::Upcoming => Tone::Info,
        TripStatus::Ongoing => Tone::Success,
        TripStatus::Completed => Tone::Dim,
    };
    paint(status.as_str(), tone)
}

/// A horizontal bar `width` cells wide, filled to `percent`.
pub fn bar(percent: f64, width: usize) -> String {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!(
        "{}{}",
        paint(&"█".repeat(filled), Tone::Accent),
        paint(&"░".repeat(width - filled), Tone::Dim)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(s: &str) -> String {
        // drop ANSI escape sequences in case the test runner has a color tty
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(strip(&bar(50.0, 10)), "█████░░░░░");
        assert_eq!(strip(&bar(0.0, 4)), "░░░░");
        assert_eq!(strip(&bar(150.0, 4)), "████");
    }

    #[test]
    fn status_badge_shows_name() {
        assert_eq!(strip(&status_badge(TripStatus::Upcoming)), "upcoming");
    }
}
