//! Class palette supplied by the hosting application.

use peniko::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Palette ingestion errors.
#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("Invalid color '{0}': expected #RGB, #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse a CSS hex color (`#RGB`, `#RRGGBB` or `#RRGGBBAA`).
    pub fn from_hex(hex: &str) -> Result<Self, PaletteError> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| PaletteError::InvalidColor(hex.to_string()))?
            .trim();

        let channel = |range: &str| {
            u8::from_str_radix(range, 16).map_err(|_| PaletteError::InvalidColor(hex.to_string()))
        };

        match digits.len() {
            3 => {
                // #rgb -> #rrggbb
                let r = channel(&digits[0..1])? * 17;
                let g = channel(&digits[1..2])? * 17;
                let b = channel(&digits[2..3])? * 17;
                Ok(Self::opaque(r, g, b))
            }
            6 => {
                let r = channel(&digits[0..2])?;
                let g = channel(&digits[2..4])?;
                let b = channel(&digits[4..6])?;
                Ok(Self::opaque(r, g, b))
            }
            8 => {
                let r = channel(&digits[0..2])?;
                let g = channel(&digits[2..4])?;
                let b = channel(&digits[4..6])?;
                let a = channel(&digits[6..8])?;
                Ok(Self::new(r, g, b, a))
            }
            _ => Err(PaletteError::InvalidColor(hex.to_string())),
        }
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

/// Identifier of a class definition, assigned by the hosting application.
pub type ClassId = i64;

/// A single labeling class. Read-only to the editing engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub id: ClassId,
    pub name: String,
    pub color: Rgba,
}

impl ClassDefinition {
    /// Build a class definition from the hex color string the hosting
    /// application carries.
    pub fn from_hex(id: ClassId, name: impl Into<String>, hex: &str) -> Result<Self, PaletteError> {
        Ok(Self {
            id,
            name: name.into(),
            color: Rgba::from_hex(hex)?,
        })
    }
}

/// Ordered class palette for one labeling project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassPalette {
    classes: Vec<ClassDefinition>,
}

impl ClassPalette {
    /// Create an empty palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a palette from an ordered class list.
    pub fn from_classes(classes: Vec<ClassDefinition>) -> Self {
        Self { classes }
    }

    /// Look up a class by id.
    pub fn get(&self, id: ClassId) -> Option<&ClassDefinition> {
        self.classes.iter().find(|c| c.id == id)
    }

    /// Check whether a class id is known.
    pub fn contains(&self, id: ClassId) -> bool {
        self.get(id).is_some()
    }

    /// The first class in palette order, if any. New sessions select it by
    /// default.
    pub fn first(&self) -> Option<&ClassDefinition> {
        self.classes.first()
    }

    /// Iterate the classes in palette order.
    pub fn iter(&self) -> impl Iterator<Item = &ClassDefinition> {
        self.classes.iter()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
