//! Packed ARGB8888 colors, the pixel format of the framebuffer and the SDL
//! streaming texture.

pub const WHITE: u32 = 0xFFFF_FFFF;
pub const BLACK: u32 = 0xFF00_0000;
pub const RED: u32 = 0xFFFF_0000;
pub const GREEN: u32 = 0xFF00_FF00;
pub const BLUE: u32 = 0xFF00_00FF;

pub const BACKGROUND: u32 = 0xFF1E_1E1E;

/// Packs 8-bit channels into `0xAARRGGBB`.
#[inline]
pub const fn pack(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Opaque color from RGB channels.
#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> u32 {
    pack(r, g, b, 0xFF)
}

/// Splits `0xAARRGGBB` into `(r, g, b, a)`.
#[inline]
pub const fn unpack(color: u32) -> (u8, u8, u8, u8) {
    (
        (color >> 16) as u8,
        (color >> 8) as u8,
        color as u8,
        (color >> 24) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack() {
        let c = pack(0x12, 0x34, 0x56, 0x78);
        assert_eq!(c, 0x7812_3456);
        assert_eq!(unpack(c), (0x12, 0x34, 0x56, 0x78));
        assert_eq!(rgb(255, 0, 0), RED);
        assert_eq!(rgb(0, 0, 0), BLACK);
    }
}
