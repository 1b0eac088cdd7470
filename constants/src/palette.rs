/// Scene colours as 0xRRGGBB sRGB values.
pub const BACKGROUND: u32 = 0xfaf9f7;
pub const FRUSTUM_EDGE: u32 = 0x1e40af;
pub const FRUSTUM_FACE: u32 = 0x93c5fd;
pub const RAY: u32 = 0x1d4ed8;
pub const TARGET_POINT: u32 = 0xdc2626;
pub const GRID_CENTER_LINE: u32 = 0x94a3b8;
pub const GRID_LINE: u32 = 0xcbd5e1;

/// Split a packed colour into its 8-bit channels.
pub const fn rgb_channels(hex: u32) -> [u8; 3] {
    [
        ((hex >> 16) & 0xff) as u8,
        ((hex >> 8) & 0xff) as u8,
        (hex & 0xff) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_unpack_in_rgb_order() {
        assert_eq!(rgb_channels(TARGET_POINT), [0xdc, 0x26, 0x26]);
        assert_eq!(rgb_channels(BACKGROUND), [0xfa, 0xf9, 0xf7]);
    }
}
