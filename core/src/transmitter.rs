use crate::afsk::AfskModulator;
use crate::bits::bytes_to_bits;
use crate::ecc;
use crate::error::Result;
use crate::pcm::PcmSink;
use crate::profile::ModemProfile;
use crate::sync::TRAINING_TERMINATOR;
use crate::waveform::Waveforms;
use crate::{DEFAULT_TRAINING_SECONDS, SAMPLE_RATE, TAIL_SAMPLES};

/// Turns byte payloads into audio bursts.
///
/// Every burst leads with a long 1010... training preamble, is terminated
/// deterministically by the `1 0 0 0` pattern before the first payload
/// bit, and ends with 100 ms of measurable silence.
pub struct Transmitter {
    profile: ModemProfile,
    waveforms: Waveforms,
    modulator: AfskModulator,
    training_cycles: usize,
}

impl Transmitter {
    pub fn new(baud: u32) -> Result<Self> {
        Self::with_training(baud, DEFAULT_TRAINING_SECONDS)
    }

    /// A longer preamble gives slow squelch circuits more time to open;
    /// 0.5 s is plenty for direct audio paths.
    pub fn with_training(baud: u32, training_seconds: f32) -> Result<Self> {
        let profile = ModemProfile::new(baud)?;
        let waveforms = Waveforms::new(&profile);
        let modulator = AfskModulator::new(&waveforms);
        let training_cycles = profile.training_cycles(training_seconds);
        Ok(Self {
            profile,
            waveforms,
            modulator,
            training_cycles,
        })
    }

    pub fn profile(&self) -> &ModemProfile {
        &self.profile
    }

    /// Build the complete burst for a payload: training cycles, terminator,
    /// one tone per encoded bit, trailing silence.
    pub fn encode_to_samples(&self, payload: &[u8]) -> Vec<i16> {
        let encoded = ecc::encode(&bytes_to_bits(payload));

        let bit_frames = self.profile.bit_frames();
        let mut samples = Vec::with_capacity(
            (self.training_cycles * 2 + TRAINING_TERMINATOR.len() + encoded.len()) * bit_frames
                + TAIL_SAMPLES,
        );

        for _ in 0..self.training_cycles {
            samples.extend_from_slice(self.waveforms.training_cycle());
        }
        for &bit in &TRAINING_TERMINATOR {
            self.modulator.push_symbol(&mut samples, bit);
        }
        for &bit in &encoded {
            self.modulator.push_symbol(&mut samples, bit);
        }
        samples.extend_from_slice(&Waveforms::tail());

        samples
    }

    /// Transmit a payload: one blocking write of the whole burst.
    pub fn transmit(&self, payload: &[u8], sink: &mut dyn PcmSink) -> Result<()> {
        sink.write(&self.encode_to_samples(payload))
    }

    /// Estimated on-air duration in seconds of a burst for `payload_len`
    /// bytes. Each payload byte costs 14 symbols after Hamming(7,4).
    pub fn airtime(&self, payload_len: usize) -> f32 {
        let symbols = self.training_cycles * 2 + TRAINING_TERMINATOR.len() + payload_len * 14;
        let samples = symbols * self.profile.bit_frames() + TAIL_SAMPLES;
        samples as f32 / SAMPLE_RATE as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pcm::MemorySink;

    #[test]
    fn test_burst_layout_lengths() {
        let tx = Transmitter::new(1200).unwrap();
        let samples = tx.encode_to_samples(b"A");
        // 300 training cycles of 80, 4 terminator symbols of 40,
        // 14 encoded bits of 40, 4800 tail
        assert_eq!(samples.len(), 300 * 80 + 4 * 40 + 14 * 40 + 4800);
    }

    #[test]
    fn test_empty_payload_still_frames() {
        let tx = Transmitter::new(1200).unwrap();
        let samples = tx.encode_to_samples(b"");
        assert_eq!(samples.len(), 300 * 80 + 4 * 40 + 4800);
    }

    #[test]
    fn test_burst_starts_with_training_cycles() {
        let tx = Transmitter::new(2400).unwrap();
        let samples = tx.encode_to_samples(b"x");
        let cycle = Waveforms::new(tx.profile()).training_cycle().to_vec();
        assert_eq!(&samples[..cycle.len()], &cycle[..]);
        assert_eq!(&samples[cycle.len()..2 * cycle.len()], &cycle[..]);
    }

    #[test]
    fn test_burst_ends_with_silence() {
        let tx = Transmitter::new(1200).unwrap();
        let samples = tx.encode_to_samples(b"hello");
        assert!(samples[samples.len() - TAIL_SAMPLES..]
            .iter()
            .all(|&s| s == 0));
    }

    #[test]
    fn test_training_seconds_scales_preamble() {
        let short = Transmitter::with_training(1200, 0.25).unwrap();
        let long = Transmitter::with_training(1200, 1.0).unwrap();
        let diff = long.encode_to_samples(b"").len() - short.encode_to_samples(b"").len();
        // 0.75 s more preamble
        assert_eq!(diff, 36000);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let tx = Transmitter::new(1200).unwrap();
        assert_eq!(tx.encode_to_samples(b"abc"), tx.encode_to_samples(b"abc"));
    }

    #[test]
    fn test_transmit_hands_burst_to_sink() {
        let tx = Transmitter::new(1200).unwrap();
        let mut sink = MemorySink::new();
        tx.transmit(b"hi", &mut sink).unwrap();
        assert_eq!(sink.samples(), &tx.encode_to_samples(b"hi")[..]);
    }

    #[test]
    fn test_airtime_matches_burst_length() {
        let tx = Transmitter::new(1200).unwrap();
        for len in [0usize, 1, 5, 64] {
            let payload = vec![0u8; len];
            let expected = tx.encode_to_samples(&payload).len() as f32 / 48000.0;
            assert!((tx.airtime(len) - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_invalid_baud_rejected() {
        assert!(Transmitter::new(1000).is_err());
    }
}
