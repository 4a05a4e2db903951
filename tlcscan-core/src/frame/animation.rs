//! Brightness sweep animation
//!
//! The scale walks up to the upper bound and back down to the lower bound
//! forever. Every time it reaches the lower bound the column orientation
//! flips, so successive sweeps run mirror-image.

use super::image::LogicalFrame;
use crate::config::{ScaleBounds, FRAME_ROWS};
use crate::encoder::{encode_frame, PackedFrame};

/// Direction the scale is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Increasing,
    Decreasing,
}

impl Direction {
    /// Signed step applied to the scale
    pub fn step(self) -> i8 {
        match self {
            Direction::Increasing => 1,
            Direction::Decreasing => -1,
        }
    }
}

/// Column orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    /// Logical column `c` drives physical column `c`
    #[default]
    Normal,
    /// Logical column `c` drives physical column `C - c - 1`
    Mirrored,
}

impl Orientation {
    /// The other orientation
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Normal => Orientation::Mirrored,
            Orientation::Mirrored => Orientation::Normal,
        }
    }

    pub fn is_mirrored(self) -> bool {
        self == Orientation::Mirrored
    }
}

/// Animated scale, direction and orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScaleState {
    scale: u16,
    direction: Direction,
    orientation: Orientation,
    bounds: ScaleBounds,
}

impl ScaleState {
    /// Start at `bounds.initial`, increasing, normal orientation
    pub fn new(bounds: ScaleBounds) -> Self {
        Self {
            scale: bounds.initial,
            direction: Direction::Increasing,
            orientation: Orientation::Normal,
            bounds,
        }
    }

    pub fn scale(&self) -> u16 {
        self.scale
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Apply one animation step
    ///
    /// Returns `true` when the lower bound was reached and the orientation
    /// flipped.
    pub fn advance(&mut self) -> bool {
        self.scale = self.scale.wrapping_add_signed(self.direction.step() as i16);

        if self.scale >= self.bounds.upper {
            self.direction = Direction::Decreasing;
        }
        if self.scale <= self.bounds.lower {
            self.direction = Direction::Increasing;
            self.orientation = self.orientation.toggled();
            return true;
        }
        false
    }
}

impl Default for ScaleState {
    fn default() -> Self {
        Self::new(ScaleBounds::default())
    }
}

/// Logical frame plus its animation state
pub struct FrameSource<const ROWS: usize = FRAME_ROWS> {
    frame: LogicalFrame<ROWS>,
    scale: ScaleState,
}

impl<const ROWS: usize> FrameSource<ROWS> {
    pub fn new(frame: LogicalFrame<ROWS>, bounds: ScaleBounds) -> Self {
        Self {
            frame,
            scale: ScaleState::new(bounds),
        }
    }

    pub fn frame(&self) -> &LogicalFrame<ROWS> {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut LogicalFrame<ROWS> {
        &mut self.frame
    }

    pub fn scale(&self) -> &ScaleState {
        &self.scale
    }

    /// Encode the frame at the current scale into `out`, then advance
    ///
    /// Returns `true` when this step flipped the orientation.
    pub fn step(&mut self, out: &mut PackedFrame<ROWS>) -> bool {
        encode_frame(
            &self.frame,
            self.scale.scale(),
            self.scale.orientation(),
            out,
        );
        self.scale.advance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::image::test_pattern;

    #[test]
    fn test_first_step_hits_lower_bound() {
        // Starting below the lower bound, the first step lands on it.
        let mut state = ScaleState::default();
        assert_eq!(state.scale(), 1);
        assert!(state.advance());
        assert_eq!(state.scale(), 2);
        assert_eq!(state.direction(), Direction::Increasing);
        assert_eq!(state.orientation(), Orientation::Mirrored);
    }

    #[test]
    fn test_scale_oscillation() {
        let mut state = ScaleState::default();
        state.advance();
        let start_orientation = state.orientation();

        // Strictly increasing up to the upper bound
        let mut previous = state.scale();
        while state.direction() == Direction::Increasing {
            assert!(!state.advance());
            assert!(state.scale() > previous);
            previous = state.scale();
        }
        assert_eq!(state.scale(), 510);

        // Strictly decreasing down to the lower bound, flipping once
        let mut flips = 0;
        while state.direction() == Direction::Decreasing {
            if state.advance() {
                flips += 1;
            }
            assert!(state.scale() < previous);
            previous = state.scale();
        }
        assert_eq!(state.scale(), 2);
        assert_eq!(flips, 1);
        assert_eq!(state.orientation(), start_orientation.toggled());

        // And back up again
        state.advance();
        assert_eq!(state.scale(), 3);
    }

    #[test]
    fn test_scale_stays_in_bounds() {
        let mut state = ScaleState::default();
        for _ in 0..5000 {
            state.advance();
            assert!((2..=510).contains(&state.scale()));
        }
    }

    #[test]
    fn test_one_flip_per_traversal() {
        let mut state = ScaleState::default();
        state.advance();

        // 508 steps up (2 -> 510), 508 steps down (510 -> 2)
        let mut flips = 0;
        for _ in 0..(508 * 2) {
            if state.advance() {
                flips += 1;
            }
        }
        assert_eq!(flips, 1);
        assert_eq!(state.scale(), 2);
    }

    #[test]
    fn test_frame_source_encodes_before_advancing() {
        let mut source = FrameSource::new(test_pattern(), ScaleBounds::default());
        let mut packed = PackedFrame::new();

        // First step encodes at scale 1, normal orientation: 7 -> 0x007
        source.step(&mut packed);
        assert_eq!(&packed.row(0)[..3], &[0x00, 0x70, 0x06]);
        assert_eq!(source.scale().scale(), 2);

        // Second step encodes at scale 2, mirrored: first pair is columns 7, 6
        source.step(&mut packed);
        assert_eq!(&packed.row(0)[..3], &[0x00, 0x00, 0x02]);
    }
}
