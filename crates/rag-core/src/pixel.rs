use core::fmt::Debug;

/// Unsigned integer pixel types the segmentation and overlay stages accept.
///
/// `level` maps a pixel to a gray level for flooding order and `from_level`
/// maps back, saturating at the type's maximum. `from_stamp` converts an overlay stamp into
/// a pixel value and fails when the stamp does not fit.
pub trait Pixel: Copy + Ord + Default + Debug {
    fn level(self) -> u32;

    fn from_level(level: u32) -> Self;

    fn from_stamp(stamp: usize) -> Option<Self>;
}

macro_rules! impl_pixel {
    ($($t:ty),*) => {
        $(
            impl Pixel for $t {
                #[inline]
                fn level(self) -> u32 {
                    u32::from(self)
                }

                #[inline]
                fn from_level(level: u32) -> Self {
                    <$t>::try_from(level).unwrap_or(<$t>::MAX)
                }

                #[inline]
                fn from_stamp(stamp: usize) -> Option<Self> {
                    <$t>::try_from(stamp).ok()
                }
            }
        )*
    };
}

impl_pixel!(u8, u16, u32);

#[cfg(test)]
mod tests {
    use super::Pixel;

    #[test]
    fn stamp_conversion_respects_pixel_range() {
        assert_eq!(u8::from_stamp(255), Some(255u8));
        assert_eq!(u8::from_stamp(256), None);
        assert_eq!(u16::from_stamp(256), Some(256u16));
        assert_eq!(u32::from_stamp(70_000), Some(70_000u32));
    }

    #[test]
    fn level_is_widening() {
        assert_eq!(200u8.level(), 200);
        assert_eq!(u16::MAX.level(), 65_535);
        assert_eq!(u8::from_level(300), 255);
        assert_eq!(u16::from_level(300), 300);
    }
}
