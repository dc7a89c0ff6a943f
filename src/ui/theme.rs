use ratatui::style::Color;

pub const SELECTED_BG: Color = Color::Rgb(50, 50, 80);
pub const STATUS_BG: Color = Color::Rgb(30, 30, 40);
pub const ACCENT: Color = Color::Rgb(140, 115, 200);
pub const HEADER_BG: Color = Color::Rgb(25, 25, 38);
pub const BORDER_COLOR: Color = Color::Rgb(70, 70, 95);
pub const ACTIVE_BORDER: Color = Color::Rgb(120, 120, 180);
pub const FILTER_COLOR: Color = Color::Cyan;
pub const DIM_TEXT: Color = Color::Rgb(100, 100, 120);
pub const ERROR_FG: Color = Color::LightRed;
pub const README_BADGE: Color = Color::Green;
pub const STAR_COLOR: Color = Color::Yellow;
pub const CODE_FG: Color = Color::Rgb(170, 200, 170);

pub fn language_color(language: &str) -> Color {
    match language {
        "Rust" => Color::Rgb(222, 165, 132),
        "Go" => Color::Cyan,
        "Python" => Color::Rgb(53, 114, 165),
        "JavaScript" => Color::Yellow,
        "TypeScript" => Color::Rgb(49, 120, 198),
        "Ruby" | "Scala" => Color::LightRed,
        "C" | "C++" => Color::Rgb(140, 140, 160),
        "Shell" => Color::Green,
        crate::github::types::UNKNOWN_LANGUAGE => DIM_TEXT,
        _ => Color::White,
    }
}
