//! Built-in colour themes.

use serde::Serialize;

/// Five-colour palette, as CSS hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
}

impl Palette {
    /// `(css custom property, colour)` pairs, e.g. `("--primary-color", "#FF6B9D")`.
    pub fn css_properties(&self) -> [(&'static str, &'static str); 5] {
        [
            ("--primary-color", self.primary),
            ("--secondary-color", self.secondary),
            ("--accent-color", self.accent),
            ("--success-color", self.success),
            ("--warning-color", self.warning),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub key: &'static str,
    pub name: &'static str,
    pub colors: Palette,
}

pub const DEFAULT_THEME: &str = "default";

pub static THEMES: [Theme; 4] = [
    Theme {
        key: "default",
        name: "Arcoíris Mágico",
        colors: Palette {
            primary: "#FF6B9D",
            secondary: "#4ECDC4",
            accent: "#FFE66D",
            success: "#6BCF7F",
            warning: "#FF8E53",
        },
    },
    Theme {
        key: "ocean",
        name: "Océano Profundo",
        colors: Palette {
            primary: "#0077BE",
            secondary: "#00A8CC",
            accent: "#FFD700",
            success: "#00CC88",
            warning: "#FF6B35",
        },
    },
    Theme {
        key: "sunset",
        name: "Atardecer Dorado",
        colors: Palette {
            primary: "#FF6B35",
            secondary: "#F7931E",
            accent: "#FFD23F",
            success: "#6BCF7F",
            warning: "#FF1744",
        },
    },
    Theme {
        key: "forest",
        name: "Bosque Encantado",
        colors: Palette {
            primary: "#4CAF50",
            secondary: "#8BC34A",
            accent: "#FFEB3B",
            success: "#2E7D32",
            warning: "#FF5722",
        },
    },
];

pub fn find(key: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|theme| theme.key == key)
}

pub fn default_theme() -> &'static Theme {
    &THEMES[0]
}
