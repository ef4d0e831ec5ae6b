use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 129, g: 200, b: 190 };
pub const ACCENT: Color = Color::TrueColor { r: 229, g: 192, b: 123 };
pub const SEPARATOR: Color = Color::TrueColor { r: 92, g: 99, b: 112 };
pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 220, g: 223, b: 228 };
pub const IPV4_ADDR: Color = Color::TrueColor { r: 97, g: 175, b: 239 };
pub const LINK: Color = Color::TrueColor { r: 152, g: 195, b: 121 };
