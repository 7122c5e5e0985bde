use crate::profile::ModemProfile;
use crate::TAIL_SAMPLES;

/// Full-scale amplitude for the high half of a square period.
pub const FULL_SCALE_HIGH: i16 = i16::MAX;

/// Full-scale amplitude for the low half of a square period.
pub const FULL_SCALE_LOW: i16 = i16::MIN;

/// Ideal square-wave templates for one modulation profile.
///
/// The transmitter emits these verbatim and the receiver fits captures
/// against the same shapes, which is what lets the link shrug off heavy
/// nonlinearity in the analog path. Synthesis is exact: the profile
/// invariants guarantee integer period lengths, so there is no rounding.
#[derive(Debug, Clone)]
pub struct Waveforms {
    space: Vec<i16>,
    mark: Vec<i16>,
    training_cycle: Vec<i16>,
}

impl Waveforms {
    pub fn new(profile: &ModemProfile) -> Self {
        let bit_frames = profile.bit_frames();

        // One full period at the space tone fills the symbol window.
        let space = square_period(bit_frames);

        // The mark tone is one octave up: two full periods per window.
        let mut mark = square_period(bit_frames / 2);
        mark.extend_from_within(..);

        // One "10" oscillation at the symbol rate.
        let mut training_cycle = mark.clone();
        training_cycle.extend_from_slice(&space);

        Self {
            space,
            mark,
            training_cycle,
        }
    }

    /// Space tone (logical 0), one symbol window long.
    pub fn space(&self) -> &[i16] {
        &self.space
    }

    /// Mark tone (logical 1), one symbol window long.
    pub fn mark(&self) -> &[i16] {
        &self.mark
    }

    /// One training oscillation: mark followed by space.
    pub fn training_cycle(&self) -> &[i16] {
        &self.training_cycle
    }

    /// Trailing silence appended to every transmission.
    pub fn tail() -> Vec<i16> {
        vec![0; TAIL_SAMPLES]
    }
}

/// One square-wave period: the first half at full-scale high, the second
/// at full-scale low.
fn square_period(len: usize) -> Vec<i16> {
    debug_assert_eq!(len % 2, 0);
    let mut period = vec![FULL_SCALE_HIGH; len];
    period[len / 2..].fill(FULL_SCALE_LOW);
    period
}
