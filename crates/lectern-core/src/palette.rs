//! Ribbon colors for bookmarks.
//!
//! New bookmarks draw a brown shade at random; the brighter theme colors are
//! only offered when the user recolors a ribbon by hand.

use once_cell::sync::Lazy;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use regex::Regex;
use std::sync::{Mutex, PoisonError};

/// Palette for automatic assignment.
pub const BROWN_SHADES: [&str; 8] = [
    "#8B4513", // saddle brown
    "#A0522D", // sienna
    "#964B00", // traditional brown
    "#654321", // dark brown
    "#8B7355", // burlywood4
    "#826644", // raw umber
    "#7B3F00", // chocolate
    "#80461B", // russet
];

/// Palette offered by the color picker.
pub const THEME_COLORS: [&str; 7] = [
    "#8B4513", // saddle brown
    "#CD5C5C", // indian red
    "#4682B4", // steel blue
    "#6B8E23", // olive drab
    "#9370DB", // medium purple
    "#FF8C00", // dark orange
    "#DAA520", // goldenrod
];

static RE_HEX_COLOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#?([0-9A-Fa-f]{6})$").unwrap());

/// Pick one entry of `palette`, or its first entry if the pick fails.
pub fn pick_shade<R: rand::Rng + ?Sized>(palette: &[&'static str], rng: &mut R) -> &'static str {
    palette
        .choose(rng)
        .copied()
        .or_else(|| palette.first().copied())
        .unwrap_or(BROWN_SHADES[0])
}

/// Seedable source of ribbon colors.
#[derive(Debug)]
pub struct ColorAssigner {
    rng: Mutex<StdRng>,
}

impl Default for ColorAssigner {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl ColorAssigner {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic sequence of picks, for tests and reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn random_brown_shade(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        pick_shade(&BROWN_SHADES, &mut *rng).to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#RRGGBB` (the `#` is optional, surrounding whitespace ignored).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let caps = RE_HEX_COLOR.captures(hex.trim())?;
        let value = u32::from_str_radix(&caps[1], 16).ok()?;
        Some(Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
