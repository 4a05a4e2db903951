//! Grayscale packing encoder
//!
//! The TLC5940 takes 12 bits per output, MSB first, with no padding between
//! outputs. Two codes therefore occupy exactly three bytes:
//!
//! ```text
//!  byte0           byte1           byte2
//!  a11 .. a4       a3 .. a0 b11 .. b8   b7 .. b0
//! ```
//!
//! A packed row holds every green code first, then every red code.
//!
//! Codes are `intensity * scale` reduced modulo 4096 by the masks above.
//! Out-of-range products wrap instead of saturating.

use crate::config::{
    BYTES_PER_PAIR, CHANNEL_BYTES, COLUMN_COUNT, FRAME_ROWS, GRAYSCALE_MAX, ROW_BYTES,
};
use crate::frame::{Channel, LogicalFrame, Orientation, Pixel};

/// One row of packed grayscale data, ready to shift out
pub type PackedRow = [u8; ROW_BYTES];

/// Packed rows for the whole frame
///
/// Published to the scan engine as a unit and replaced wholesale on the
/// next encoding pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedFrame<const ROWS: usize = FRAME_ROWS> {
    rows: [PackedRow; ROWS],
}

impl<const ROWS: usize> Default for PackedFrame<ROWS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const ROWS: usize> PackedFrame<ROWS> {
    /// All-zero (dark) frame
    pub const fn new() -> Self {
        Self {
            rows: [[0; ROW_BYTES]; ROWS],
        }
    }

    /// Number of buffered rows
    pub const fn len(&self) -> usize {
        ROWS
    }

    pub const fn is_empty(&self) -> bool {
        ROWS == 0
    }

    /// Packed bytes for a scan row
    ///
    /// The scan may cycle over more physical rows than are buffered; the
    /// buffer is indexed modulo its row count.
    pub fn row(&self, scan_row: usize) -> &PackedRow {
        &self.rows[scan_row % ROWS]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut PackedRow {
        &mut self.rows[row]
    }
}

/// Reduce a scaled intensity to a 12-bit code
pub fn grayscale_code(intensity: u16, scale: u16) -> u16 {
    intensity.wrapping_mul(scale) & GRAYSCALE_MAX
}

/// Pack two 12-bit codes into three bytes, MSB first
pub fn pack_pair(first: u16, second: u16) -> [u8; BYTES_PER_PAIR] {
    [
        ((first & 0xFF0) >> 4) as u8,
        (((first & 0x00F) << 4) | ((second & 0xF00) >> 8)) as u8,
        (second & 0x0FF) as u8,
    ]
}

/// Unpack three bytes into two 12-bit codes
pub fn unpack_pair(bytes: &[u8; BYTES_PER_PAIR]) -> (u16, u16) {
    let first = ((bytes[0] as u16) << 4) | ((bytes[1] as u16) >> 4);
    let second = (((bytes[1] & 0x0F) as u16) << 8) | bytes[2] as u16;
    (first, second)
}

/// Byte offset of a channel within a packed row
pub const fn channel_offset(channel: Channel) -> usize {
    match channel {
        Channel::Green => 0,
        Channel::Red => CHANNEL_BYTES,
    }
}

/// Physical column for a logical column under an orientation
pub const fn physical_column(logical: usize, orientation: Orientation) -> usize {
    match orientation {
        Orientation::Normal => logical,
        Orientation::Mirrored => COLUMN_COUNT - logical - 1,
    }
}

/// Encode one row of pixels
pub fn encode_row(
    pixels: &[Pixel; COLUMN_COUNT],
    scale: u16,
    orientation: Orientation,
    out: &mut PackedRow,
) {
    for pair in 0..COLUMN_COUNT / 2 {
        let col1 = physical_column(pair * 2, orientation);
        let col2 = physical_column(pair * 2 + 1, orientation);

        for channel in Channel::ALL {
            let pv1 = grayscale_code(pixels[col1].channel(channel), scale);
            let pv2 = grayscale_code(pixels[col2].channel(channel), scale);

            let start = channel_offset(channel) + pair * BYTES_PER_PAIR;
            out[start..start + BYTES_PER_PAIR].copy_from_slice(&pack_pair(pv1, pv2));
        }
    }
}

/// Encode a full frame, overwriting every packed row
pub fn encode_frame<const ROWS: usize>(
    frame: &LogicalFrame<ROWS>,
    scale: u16,
    orientation: Orientation,
    out: &mut PackedFrame<ROWS>,
) {
    for (index, pixels) in frame.rows().enumerate() {
        encode_row(pixels, scale, orientation, out.row_mut(index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::STARTUP_SCALE;
    use crate::frame::test_pattern;
    use proptest::prelude::*;

    #[test]
    fn test_known_vector() {
        let frame = test_pattern();
        let mut packed = PackedFrame::new();
        encode_frame(&frame, STARTUP_SCALE, Orientation::Normal, &mut packed);

        // 7*127 = 0x379, 6*127 = 0x2FA
        assert_eq!(&packed.row(0)[0..3], &[0x37, 0x92, 0xFA]);
        // Row 0 has no red
        assert!(packed.row(0)[CHANNEL_BYTES..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_red_follows_green() {
        let frame = test_pattern();
        let mut packed = PackedFrame::new();
        encode_frame(&frame, 1, Orientation::Normal, &mut packed);

        // Row 2 is a red ramp 0..7; green half stays dark
        let row = packed.row(2);
        assert!(row[..CHANNEL_BYTES].iter().all(|&b| b == 0));
        assert_eq!(&row[CHANNEL_BYTES..CHANNEL_BYTES + 3], &[0x00, 0x00, 0x01]);
        assert_eq!(&row[ROW_BYTES - 3..], &[0x00, 0x60, 0x07]);
    }

    #[test]
    fn test_wraps_past_4095() {
        // 4097 wraps to 1 rather than saturating at 4095
        assert_eq!(grayscale_code(4097, 1), 1);
        assert_eq!(grayscale_code(7, 1024), (7 * 1024) & 0xFFF);
        assert_eq!(pack_pair(0x1FFF, 0), pack_pair(0xFFF, 0));
    }

    #[test]
    fn test_scan_row_index_wraps_buffer() {
        let mut packed = PackedFrame::<2>::new();
        packed.row_mut(1)[0] = 0xAB;
        assert_eq!(packed.row(5)[0], 0xAB);
        assert_eq!(packed.row(4)[0], 0);
    }

    proptest! {
        #[test]
        fn prop_pair_bytes_match_layout(v1 in any::<u16>(), v2 in any::<u16>(), scale in 0u16..600) {
            let pv1 = grayscale_code(v1, scale);
            let pv2 = grayscale_code(v2, scale);
            let bytes = pack_pair(pv1, pv2);

            let m1 = (v1 as u32 * scale as u32) % 4096;
            let m2 = (v2 as u32 * scale as u32) % 4096;
            prop_assert_eq!(bytes[0] as u32, (m1 >> 4) & 0xFF);
            prop_assert_eq!(bytes[1] as u32, ((m1 & 0xF) << 4) | (m2 >> 8));
            prop_assert_eq!(bytes[2] as u32, m2 & 0xFF);
            prop_assert_eq!(unpack_pair(&bytes), (pv1, pv2));
        }

        #[test]
        fn prop_mirrored_equals_reversed_columns(
            values in proptest::collection::vec(any::<(u16, u16)>(), FRAME_ROWS * COLUMN_COUNT),
            scale in 0u16..600,
        ) {
            let mut frame = LogicalFrame::<FRAME_ROWS>::new();
            for (index, &(red, green)) in values.iter().enumerate() {
                frame.set(index / COLUMN_COUNT, index % COLUMN_COUNT, Pixel { red, green });
            }

            let mut mirrored = PackedFrame::new();
            encode_frame(&frame, scale, Orientation::Mirrored, &mut mirrored);

            let mut reversed = PackedFrame::new();
            encode_frame(&frame.mirrored(), scale, Orientation::Normal, &mut reversed);

            prop_assert_eq!(mirrored, reversed);
        }
    }
}
