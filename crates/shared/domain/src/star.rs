//! Star value types.
//!
//! Every enum carries a short display token (`"S"`, `"Red"`, `"Not so much"`, ...).
//! The token, not the variant identifier, is what `Display`, `FromStr` and serde use,
//! so persisted skies stay readable across versions.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Implements the token accessors, `Display` and `FromStr` for a token enum.
macro_rules! star_tokens {
    ($ty:ident, $kind:literal, { $($variant:ident => $token:literal),+ $(,)? }) => {
        impl $ty {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            #[must_use]
            pub const fn token(self) -> &'static str {
                match self {
                    $(Self::$variant => $token),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.token())
            }
        }

        impl FromStr for $ty {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, DomainError> {
                match s {
                    $($token => Ok(Self::$variant),)+
                    other => Err(DomainError::UnknownToken {
                        kind: $kind,
                        message: other.to_owned().into(),
                        context: None,
                    }),
                }
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StarSize {
    #[serde(rename = "S")]
    Small,
    #[serde(rename = "B")]
    Big,
}

star_tokens!(StarSize, "size", { Small => "S", Big => "B" });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StarColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Gray,
}

star_tokens!(StarColor, "color", {
    Red => "Red",
    Blue => "Blue",
    Green => "Green",
    Yellow => "Yellow",
    Purple => "Purple",
    Gray => "Gray",
});

impl StarColor {
    const SMALL_PALETTE: [Self; 3] = [Self::Red, Self::Blue, Self::Green];
    const BIG_PALETTE: [Self; 3] = [Self::Yellow, Self::Purple, Self::Gray];

    /// The colors a star of `size` may take. Small stars are red, blue or green;
    /// big stars are yellow, purple or gray.
    #[must_use]
    pub const fn palette(size: StarSize) -> &'static [Self] {
        match size {
            StarSize::Small => &Self::SMALL_PALETTE,
            StarSize::Big => &Self::BIG_PALETTE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StarBrightness {
    #[serde(rename = "Bright")]
    Bright,
    /// The dim variant; persisted as `"Not so much"`.
    #[serde(rename = "Not so much")]
    NotSoMuch,
}

star_tokens!(StarBrightness, "brightness", { Bright => "Bright", NotSoMuch => "Not so much" });

impl StarBrightness {
    #[must_use]
    pub const fn is_bright(self) -> bool {
        matches!(self, Self::Bright)
    }
}

/// A single star. Immutable once created.
///
/// Serialized field order is `size`, `color`, `brightness`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Star {
    size: StarSize,
    color: StarColor,
    brightness: StarBrightness,
}

impl Star {
    #[must_use]
    pub const fn new(size: StarSize, color: StarColor, brightness: StarBrightness) -> Self {
        Self { size, color, brightness }
    }

    #[must_use]
    pub const fn size(&self) -> StarSize {
        self.size
    }

    #[must_use]
    pub const fn color(&self) -> StarColor {
        self.color
    }

    #[must_use]
    pub const fn brightness(&self) -> StarBrightness {
        self.brightness
    }
}

impl fmt::Display for Star {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Star(Size: {}, Color: {}, Brightness: {})", self.size, self.color, self.brightness)
    }
}
