use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 94, g: 196, b: 255 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 184, b: 76 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 210, g: 210, b: 210 };

pub const PORT_OPEN: Color = Color::BrightGreen;
pub const PORT_CLOSED: Color = Color::BrightBlack;
pub const PORT_ERROR: Color = Color::BrightRed;
pub const LATENCY: Color = Color::Yellow;
