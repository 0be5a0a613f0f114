//! Topic color palettes and color helpers.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

/// One selectable palette: the solid color, a translucent tint used behind
/// topic icons, and a darker shade for hover states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorTheme {
    pub name: &'static str,
    pub color: &'static str,
    pub bg_color: &'static str,
    pub hover_color: &'static str,
}

/// Palettes offered for topics and as UI accents, in display order.
pub const COLOR_THEMES: [ColorTheme; 8] = [
    ColorTheme { name: "blue", color: "#3b82f6", bg_color: "rgba(59, 130, 246, 0.13)", hover_color: "#2563eb" },
    ColorTheme { name: "violet", color: "#8b5cf6", bg_color: "rgba(139, 92, 246, 0.13)", hover_color: "#7c3aed" },
    ColorTheme { name: "pink", color: "#ec4899", bg_color: "rgba(236, 72, 153, 0.13)", hover_color: "#db2777" },
    ColorTheme { name: "amber", color: "#f59e0b", bg_color: "rgba(245, 158, 11, 0.13)", hover_color: "#d97706" },
    ColorTheme { name: "emerald", color: "#10b981", bg_color: "rgba(16, 185, 129, 0.13)", hover_color: "#059669" },
    ColorTheme { name: "cyan", color: "#06b6d4", bg_color: "rgba(6, 182, 212, 0.13)", hover_color: "#0891b2" },
    ColorTheme { name: "red", color: "#ef4444", bg_color: "rgba(239, 68, 68, 0.13)", hover_color: "#dc2626" },
    ColorTheme { name: "indigo", color: "#6366f1", bg_color: "rgba(99, 102, 241, 0.13)", hover_color: "#4f46e5" },
];

/// Alpha of the icon background tint.
pub const TINT_ALPHA: f64 = 0.13;

pub fn theme_by_name(name: &str) -> Option<&'static ColorTheme> {
    COLOR_THEMES.iter().find(|t| t.name == name)
}

/// Parse `#RGB` or `#RRGGBB` values into RGB channels.
pub fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            Some((r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// `rgba(r, g, b, alpha)` tint of a hex color, or `None` if it does not parse.
pub fn tint(hex: &str, alpha: f64) -> Option<String> {
    let (r, g, b) = parse_hex_rgb(hex)?;
    Some(format!("rgba({r}, {g}, {b}, {alpha})"))
}

/// First letter of a name, uppercased, for avatar placeholders.
pub fn initial(name: &str) -> String {
    name.trim().chars().next().map_or_else(|| "?".to_owned(), |c| c.to_uppercase().collect())
}
