//! Packed 32-bit ARGB colors and the channel arithmetic the citrus uses to
//! derive its peel shades.
//!
//! Channels are extracted with shifts and masks: alpha in bits 24..32, red
//! 16..24, green 8..16, blue 0..8.
//!
//! A few functions here reproduce long-standing quirks bit for bit so that
//! rendered output stays identical to existing sketches:
//!
//! - [`dominant_channel`] picks green whenever red loses and `g >= r`, even
//!   if blue is strictly the largest channel.
//! - [`darken`] clamps with `max(x - amt, 255)`, so the non-dominant
//!   channels always come out as 255.
//! - [`set_green`] clears the blue byte instead of the green byte.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CitrusError;

/// A packed `0xAARRGGBB` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Argb(pub u32);

/// One of the three color channels (alpha is never dominant).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    R,
    G,
    B,
}

impl Argb {
    /// Opaque white, used for the central column.
    pub const WHITE: Argb = Argb(0xFFFF_FFFF);
    /// Fully transparent black.
    pub const TRANSPARENT: Argb = Argb(0);

    /// Packs four 8-bit channels.
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Argb((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub const fn alpha(self) -> u8 {
        ((self.0 >> 24) & 0xFF) as u8
    }

    pub const fn red(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    pub const fn blue(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Unpacks into `[r, g, b, a]` byte order for RGBA8 buffers.
    pub const fn to_rgba8(self) -> [u8; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }

    /// Parses `"#rrggbb"` (opaque) or `"#aarrggbb"`. The `#` is optional and
    /// digits are case insensitive.
    ///
    /// Returns `CitrusError::InvalidColor` for any other length or non-hex digits.
    pub fn from_hex(hex: &str) -> Result<Argb, CitrusError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let packed = match digits.len() {
            6 => 0xFF00_0000 | parse_hex_digits(digits)?,
            8 => parse_hex_digits(digits)?,
            n => {
                return Err(CitrusError::InvalidColor(format!(
                    "expected 6 or 8 hex digits, got {n}"
                )))
            }
        };
        Ok(Argb(packed))
    }

    /// Formats as `"#aarrggbb"`.
    pub fn to_hex(self) -> String {
        format!("#{:08x}", self.0)
    }
}

fn parse_hex_digits(digits: &str) -> Result<u32, CitrusError> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CitrusError::InvalidColor(format!(
            "invalid hex '{digits}': non-hex digit"
        )));
    }
    u32::from_str_radix(digits, 16)
        .map_err(|e| CitrusError::InvalidColor(format!("invalid hex '{digits}': {e}")))
}

impl Serialize for Argb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Accepts either a hex string or a packed integer.
#[derive(Deserialize)]
#[serde(untagged)]
enum ArgbRepr {
    Hex(String),
    Packed(u32),
}

impl<'de> Deserialize<'de> for Argb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match ArgbRepr::deserialize(deserializer)? {
            ArgbRepr::Hex(s) => Argb::from_hex(&s).map_err(serde::de::Error::custom),
            ArgbRepr::Packed(v) => Ok(Argb(v)),
        }
    }
}

/// Returns the channel with the highest 8-bit value.
///
/// Red wins whenever it is `>=` both others. Past that point green wins as
/// soon as `g >= r`, without looking at blue. Blue only wins when it beats
/// both and green is below red.
pub fn dominant_channel(c: Argb) -> Channel {
    let (r, g, b) = (c.red(), c.green(), c.blue());

    if r >= g && r >= b {
        return Channel::R;
    }
    if g >= r {
        return Channel::G;
    }
    if b >= g && b >= r {
        return Channel::B;
    }
    Channel::R
}

/// Returns `c` with its two non-dominant channels raised by `amt`,
/// saturating at 255. Alpha and the dominant channel are untouched.
pub fn lighten(c: Argb, amt: u8) -> Argb {
    let (a, mut r, mut g, mut b) = (c.alpha(), c.red(), c.green(), c.blue());
    match dominant_channel(c) {
        Channel::R => {
            g = g.saturating_add(amt);
            b = b.saturating_add(amt);
        }
        Channel::G => {
            r = r.saturating_add(amt);
            b = b.saturating_add(amt);
        }
        Channel::B => {
            r = r.saturating_add(amt);
            g = g.saturating_add(amt);
        }
    }
    Argb::from_argb(a, r, g, b)
}

/// Returns `c` with its two non-dominant channels "darkened" by `amt`.
///
/// The clamp is `max(x - amt, 255)`, which pins every non-dominant channel
/// to 255 for any `amt`. Existing output depends on it, so it stays.
pub fn darken(c: Argb, amt: u8) -> Argb {
    let (a, mut r, mut g, mut b) = (c.alpha(), c.red(), c.green(), c.blue());
    match dominant_channel(c) {
        Channel::R => {
            g = inverted_floor(g, amt);
            b = inverted_floor(b, amt);
        }
        Channel::G => {
            r = inverted_floor(r, amt);
            b = inverted_floor(b, amt);
        }
        Channel::B => {
            r = inverted_floor(r, amt);
            g = inverted_floor(g, amt);
        }
    }
    Argb::from_argb(a, r, g, b)
}

fn inverted_floor(x: u8, amt: u8) -> u8 {
    let v = (i32::from(x) - i32::from(amt)).max(255);
    u8::try_from(v).unwrap_or(u8::MAX)
}

pub fn set_alpha(c: Argb, a: u8) -> Argb {
    Argb((c.0 & 0x00FF_FFFF) | u32::from(a) << 24)
}

pub fn set_red(c: Argb, r: u8) -> Argb {
    Argb((c.0 & 0xFF00_FFFF) | u32::from(r) << 16)
}

/// Clears with the blue mask: blue is zeroed and `g` is OR-ed over the old
/// green byte.
pub fn set_green(c: Argb, g: u8) -> Argb {
    Argb((c.0 & 0xFFFF_FF00) | u32::from(g) << 8)
}

pub fn set_blue(c: Argb, b: u8) -> Argb {
    Argb((c.0 & 0xFFFF_FF00) | u32::from(b))
}
