use crate::error::{AfskError, Result};
use crate::{SAMPLE_RATE, SUPPORTED_BAUD_RATES};

/// Immutable modulation profile: symbol rate plus the derived frame
/// geometry at the fixed 48 kHz sample rate.
///
/// The space tone sits at the baud frequency and the mark tone one octave
/// above it, so a bit frame holds exactly one space period or two mark
/// periods. Every supported rate divides the sample rate evenly with a
/// frame length divisible by four; anything else is rejected up front,
/// before any I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModemProfile {
    baud: u32,
    bit_frames: usize,
}

impl ModemProfile {
    pub fn new(baud: u32) -> Result<Self> {
        if !SUPPORTED_BAUD_RATES.contains(&baud) {
            return Err(AfskError::InvalidBaud(baud));
        }
        let bit_frames = SAMPLE_RATE / baud as usize;
        debug_assert_eq!(SAMPLE_RATE % baud as usize, 0);
        debug_assert_eq!(bit_frames % 4, 0);
        Ok(Self { baud, bit_frames })
    }

    /// Symbols (= bits) per second.
    pub fn baud(&self) -> u32 {
        self.baud
    }

    /// Samples per symbol period.
    pub fn bit_frames(&self) -> usize {
        self.bit_frames
    }

    /// Samples per training cycle (one mark symbol followed by one space).
    pub fn training_cycle_frames(&self) -> usize {
        2 * self.bit_frames
    }

    /// Space tone frequency in Hz (logical 0).
    pub fn space_tone(&self) -> u32 {
        self.baud
    }

    /// Mark tone frequency in Hz (logical 1).
    pub fn mark_tone(&self) -> u32 {
        2 * self.baud
    }

    /// Number of training cycles covering roughly `seconds` of preamble.
    /// Each cycle carries two symbols.
    pub fn training_cycles(&self, seconds: f32) -> usize {
        (self.baud as f32 * seconds / 2.0).round() as usize
    }
}
