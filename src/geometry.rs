/*

`genesis-display` is free software: you can redistribute it and/or modify it under the terms of one
of the following licenses:

* GNU Lesser General Public License as published by the Free Software Foundation, either
  version 3 of the License, or (at your option) any later version.
* Mozilla Public License as published by the Mozilla Foundation, version 2.

`genesis-display` is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
GNU Lesser General Public License and the Mozilla Public License for more details.

You should have received a copy of the GNU Lesser General Public License and the Mozilla
Public License along with `genesis-display`. If not, see <https://www.gnu.org/licenses/>.

*/

//! Display extents, cutout insets and the usable area derived from them.
//!
//! All values are in hardware pixels. Nothing here is cached: a [`DisplayInfo`] is built fresh
//! for every report and handed straight to whoever is listening.

use std::fmt;

/// The extent of a display, in hardware pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DisplaySize {
    pub width: i32,
    pub height: i32,
}

impl DisplaySize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for DisplaySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Safe-area insets reported by a display cutout.
///
/// Each field is the margin along one edge that content must not be placed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SafeInsets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl SafeInsets {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Whether every edge is zero.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn clamped(self) -> Self {
        Self {
            left: self.left.max(0),
            top: self.top.max(0),
            right: self.right.max(0),
            bottom: self.bottom.max(0),
        }
    }
}

impl fmt::Display for SafeInsets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "left: {}, top: {}, right: {}, bottom: {}",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// The payload delivered to the native side once per report.
///
/// The field order matches the argument order of [`NativeCallback`].
///
/// [`NativeCallback`]: crate::native::NativeCallback
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DisplayInfo {
    pub display_width: i32,
    pub display_height: i32,
    pub usable_width: i32,
    pub usable_height: i32,
    pub usable_x_offset: i32,
    pub usable_y_offset: i32,
}

impl DisplayInfo {
    /// The whole display is usable, with no offset.
    pub fn full(size: DisplaySize) -> Self {
        Self::with_insets(size, SafeInsets::default())
    }

    /// Subtract cutout insets from the display extent.
    ///
    /// Negative insets count as zero and the usable extent never drops below zero, so every
    /// field of the result is non-negative for a non-negative display size.
    pub fn with_insets(size: DisplaySize, insets: SafeInsets) -> Self {
        let insets = insets.clamped();
        let width = size.width.max(0);
        let height = size.height.max(0);

        Self {
            display_width: width,
            display_height: height,
            usable_width: width
                .saturating_sub(insets.left)
                .saturating_sub(insets.right)
                .max(0),
            usable_height: height
                .saturating_sub(insets.top)
                .saturating_sub(insets.bottom)
                .max(0),
            usable_x_offset: insets.left.min(width),
            usable_y_offset: insets.top.min(height),
        }
    }

    /// Build from the six raw integers, in callback order.
    pub const fn from_raw(raw: [i32; 6]) -> Self {
        Self {
            display_width: raw[0],
            display_height: raw[1],
            usable_width: raw[2],
            usable_height: raw[3],
            usable_x_offset: raw[4],
            usable_y_offset: raw[5],
        }
    }

    /// The six integers, in callback order.
    pub const fn into_raw(self) -> [i32; 6] {
        [
            self.display_width,
            self.display_height,
            self.usable_width,
            self.usable_height,
            self.usable_x_offset,
            self.usable_y_offset,
        ]
    }

    pub fn display_size(&self) -> DisplaySize {
        DisplaySize::new(self.display_width, self.display_height)
    }

    pub fn usable_size(&self) -> DisplaySize {
        DisplaySize::new(self.usable_width, self.usable_height)
    }

    /// Whether the usable area covers the entire display.
    pub fn is_full(&self) -> bool {
        self.display_size() == self.usable_size()
            && self.usable_x_offset == 0
            && self.usable_y_offset == 0
    }
}

impl fmt::Display for DisplayInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "display {}x{}, usable {}x{} at offset ({}, {})",
            self.display_width,
            self.display_height,
            self.usable_width,
            self.usable_height,
            self.usable_x_offset,
            self.usable_y_offset
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn top_notch() {
        let info = DisplayInfo::with_insets(
            DisplaySize::new(2400, 1080),
            SafeInsets::new(0, 48, 0, 0),
        );
        assert_eq!(info.into_raw(), [2400, 1080, 2400, 1032, 0, 48]);
        assert!(!info.is_full());
    }

    #[test]
    fn no_cutout() {
        let info = DisplayInfo::full(DisplaySize::new(1920, 1080));
        assert_eq!(info.into_raw(), [1920, 1080, 1920, 1080, 0, 0]);
        assert!(info.is_full());
    }

    #[test]
    fn oversized_insets_saturate() {
        let info = DisplayInfo::with_insets(
            DisplaySize::new(100, 50),
            SafeInsets::new(80, 40, 80, 40),
        );
        assert_eq!(info.usable_width, 0);
        assert_eq!(info.usable_height, 0);
        assert_eq!(info.usable_x_offset, 80);
        assert_eq!(info.usable_y_offset, 40);
    }

    #[test]
    fn negative_insets_are_ignored() {
        let info = DisplayInfo::with_insets(
            DisplaySize::new(1000, 500),
            SafeInsets::new(-10, -1, 0, 0),
        );
        assert!(info.is_full());
    }

    proptest! {
        #[test]
        fn zero_insets_give_full_display(w in 0i32..10_000, h in 0i32..10_000) {
            let size = DisplaySize::new(w, h);
            let info = DisplayInfo::with_insets(size, SafeInsets::default());
            prop_assert_eq!(info, DisplayInfo::full(size));
            prop_assert_eq!(info.usable_size(), size);
            prop_assert_eq!((info.usable_x_offset, info.usable_y_offset), (0, 0));
        }

        #[test]
        fn insets_are_subtracted(
            (w, h, l, t, r, b) in (1i32..10_000, 1i32..10_000).prop_flat_map(|(w, h)| {
                (
                    Just(w),
                    Just(h),
                    0..(w + 1) / 2,
                    0..(h + 1) / 2,
                    0..(w + 1) / 2,
                    0..(h + 1) / 2,
                )
            }),
        ) {
            let info = DisplayInfo::with_insets(DisplaySize::new(w, h), SafeInsets::new(l, t, r, b));
            prop_assert_eq!(info.usable_width, w - l - r);
            prop_assert_eq!(info.usable_height, h - t - b);
            prop_assert_eq!((info.usable_x_offset, info.usable_y_offset), (l, t));
        }

        #[test]
        fn fields_never_negative(
            w in 0i32..4_000,
            h in 0i32..4_000,
            l in -100i32..5_000,
            t in -100i32..5_000,
            r in -100i32..5_000,
            b in -100i32..5_000,
        ) {
            let info = DisplayInfo::with_insets(DisplaySize::new(w, h), SafeInsets::new(l, t, r, b));
            prop_assert!(info.into_raw().iter().all(|v| *v >= 0));
        }
    }
}
