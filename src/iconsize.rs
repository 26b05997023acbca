#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

//===========================================================================//

/// The icon sizes written to every ICO file, in directory order.
pub const ICON_SIZES: [IconSize; 4] =
    [IconSize::S16, IconSize::S32, IconSize::S48, IconSize::S256];

//===========================================================================//

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
/// One of the square icon resolutions supported in an ICO file.
pub enum IconSize {
    /// 16x16 pixels
    S16,
    /// 32x32 pixels
    S32,
    /// 48x48 pixels
    S48,
    /// 256x256 pixels
    S256,
}

impl IconSize {
    /// Returns the icon size with the given side length, or `None` if that
    /// length isn't one of the supported sizes.
    pub fn from_pixels(pixels: u32) -> Option<IconSize> {
        match pixels {
            16 => Some(IconSize::S16),
            32 => Some(IconSize::S32),
            48 => Some(IconSize::S48),
            256 => Some(IconSize::S256),
            _ => None,
        }
    }

    /// Returns the side length of this icon size, in pixels.
    pub fn pixels(&self) -> u32 {
        match *self {
            IconSize::S16 => 16,
            IconSize::S32 => 32,
            IconSize::S48 => 48,
            IconSize::S256 => 256,
        }
    }
}

impl fmt::Display for IconSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pixels())
    }
}

//===========================================================================//


//===========================================================================//
