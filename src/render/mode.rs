//! Render mode selection
//!
//! Picks between plain ASCII, Unicode box drawing and coloured Unicode
//! output based on what the terminal advertises.

use std::env;
use std::fmt;
use std::str::FromStr;

/// Available rendering modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Plain ASCII characters (# . , *)
    /// Works everywhere, safe for logs and files
    #[default]
    Ascii,

    /// Box-drawing wall glyphs and dotted floors
    Unicode,

    /// Unicode glyphs with 24-bit foreground colours
    Color,
}

impl RenderMode {
    /// Get a human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            RenderMode::Ascii => "ASCII",
            RenderMode::Unicode => "Unicode",
            RenderMode::Color => "Color",
        }
    }

    pub fn uses_unicode(&self) -> bool {
        !matches!(self, RenderMode::Ascii)
    }

    pub fn uses_color(&self) -> bool {
        matches!(self, RenderMode::Color)
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ascii" => Ok(RenderMode::Ascii),
            "unicode" => Ok(RenderMode::Unicode),
            "color" | "colour" => Ok(RenderMode::Color),
            other => Err(format!("unknown render mode '{}' (expected ascii, unicode or color)", other)),
        }
    }
}

/// Detect the best rendering mode for the current terminal
pub fn detect_render_mode() -> RenderMode {
    if !is_unicode_supported() {
        log::info!("Falling back to ASCII rendering mode");
        return RenderMode::Ascii;
    }

    if detect_true_color() {
        log::info!("Detected true colour support");
        return RenderMode::Color;
    }

    log::info!("Using Unicode rendering mode");
    RenderMode::Unicode
}

/// Check if Unicode is well-supported
fn is_unicode_supported() -> bool {
    ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find(|v| !v.is_empty())
        .map(|v| v.to_uppercase().contains("UTF"))
        .unwrap_or(false)
}

/// Check if true color (24-bit) is supported
fn detect_true_color() -> bool {
    if let Ok(colorterm) = env::var("COLORTERM") {
        let ct = colorterm.to_lowercase();
        if ct.contains("truecolor") || ct.contains("24bit") {
            return true;
        }
    }

    // Kitty, Ghostty and WezTerm all do 24-bit colour
    if let Ok(term) = env::var("TERM") {
        let term = term.to_lowercase();
        if term.contains("kitty") || term.contains("ghostty") || term.contains("wezterm") {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modes() {
        assert_eq!("ascii".parse::<RenderMode>(), Ok(RenderMode::Ascii));
        assert_eq!("Unicode".parse::<RenderMode>(), Ok(RenderMode::Unicode));
        assert_eq!("colour".parse::<RenderMode>(), Ok(RenderMode::Color));
        assert!("kitty".parse::<RenderMode>().is_err());
    }

    #[test]
    fn test_mode_capabilities() {
        assert!(!RenderMode::Ascii.uses_unicode());
        assert!(RenderMode::Unicode.uses_unicode());
        assert!(!RenderMode::Unicode.uses_color());
        assert!(RenderMode::Color.uses_color());
        assert_eq!(RenderMode::default(), RenderMode::Ascii);
    }
}
