use log::debug;

use crate::afsk::AfskDemodulator;
use crate::bits::bits_to_bytes;
use crate::capture::capture_burst;
use crate::ecc;
use crate::error::{AfskError, Result};
use crate::pcm::PcmSource;
use crate::profile::ModemProfile;
use crate::sync::{extract_payload_bits, find_clock_offset};
use crate::waveform::Waveforms;
use crate::{DEFAULT_END_THRESHOLD, DEFAULT_START_THRESHOLD, SAMPLE_RATE};

/// Recovers byte payloads from captured audio bursts.
///
/// A receive either yields the decoded payload with the number of
/// single-bit corrections applied, or an empty payload when the line
/// stayed quiet until the timeout or no usable signal was found. Bit
/// errors beyond what Hamming(7,4) can repair do not surface; callers
/// needing integrity wrap the payload in their own checksum.
#[derive(Debug)]
pub struct Receiver {
    profile: ModemProfile,
    waveforms: Waveforms,
    demodulator: AfskDemodulator,
    start_threshold: u16,
    end_threshold: u16,
}

impl Receiver {
    pub fn new(baud: u32) -> Result<Self> {
        Self::with_thresholds(baud, DEFAULT_START_THRESHOLD, DEFAULT_END_THRESHOLD)
    }

    /// The start gate must sit above the end gate (hysteresis) and both
    /// below full scale.
    pub fn with_thresholds(baud: u32, start_threshold: u16, end_threshold: u16) -> Result<Self> {
        if start_threshold <= end_threshold || start_threshold > i16::MAX as u16 {
            return Err(AfskError::InvalidThresholds {
                start: start_threshold,
                end: end_threshold,
            });
        }
        let profile = ModemProfile::new(baud)?;
        let waveforms = Waveforms::new(&profile);
        let demodulator = AfskDemodulator::new(&waveforms);
        Ok(Self {
            profile,
            waveforms,
            demodulator,
            start_threshold,
            end_threshold,
        })
    }

    pub fn profile(&self) -> &ModemProfile {
        &self.profile
    }

    /// Block until one burst has been captured and decoded, or the line
    /// has stayed quiet for `timeout_seconds`. Returns the payload and the
    /// number of corrected bits; empty payload on timeout or when no
    /// usable signal was found.
    pub fn receive(
        &self,
        source: &mut dyn PcmSource,
        timeout_seconds: f32,
    ) -> Result<(Vec<u8>, usize)> {
        let timeout_frames = (timeout_seconds * SAMPLE_RATE as f32).round() as usize;
        let burst = capture_burst(
            source,
            self.start_threshold,
            self.end_threshold,
            timeout_frames,
        )?;
        if burst.is_empty() {
            return Ok((Vec::new(), 0));
        }
        Ok(self.decode_burst(&burst))
    }

    /// Decode an already-captured burst (or a recording fed in whole, e.g.
    /// from a WAV file). Best effort: a burst without a recoverable clock
    /// or terminator decodes to an empty payload.
    pub fn decode_burst(&self, burst: &[i16]) -> (Vec<u8>, usize) {
        let Some(origin) = find_clock_offset(burst, self.waveforms.training_cycle()) else {
            debug!("no usable signal: burst of {} samples", burst.len());
            return (Vec::new(), 0);
        };
        let bits = extract_payload_bits(burst, origin, &self.demodulator, self.end_threshold);
        let (decoded, corrected) = ecc::decode(&bits);
        (bits_to_bytes(&decoded), corrected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transmitter::Transmitter;

    #[test]
    fn test_threshold_validation() {
        assert!(Receiver::with_thresholds(1200, 14000, 18000).is_err());
        assert!(Receiver::with_thresholds(1200, 14000, 14000).is_err());
        assert!(Receiver::with_thresholds(1200, 40000, 14000).is_err());
        assert!(Receiver::with_thresholds(1200, 18000, 14000).is_ok());
    }

    #[test]
    fn test_invalid_baud_rejected() {
        match Receiver::new(1000) {
            Err(AfskError::InvalidBaud(1000)) => {}
            other => panic!("expected InvalidBaud, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_decode_burst_too_short() {
        let rx = Receiver::new(1200).unwrap();
        let (payload, corrected) = rx.decode_burst(&[]);
        assert!(payload.is_empty());
        assert_eq!(corrected, 0);

        let (payload, corrected) = rx.decode_burst(&vec![0i16; 4095]);
        assert!(payload.is_empty());
        assert_eq!(corrected, 0);
    }

    #[test]
    fn test_decode_burst_of_silence() {
        let rx = Receiver::new(1200).unwrap();
        let (payload, corrected) = rx.decode_burst(&vec![0i16; 48000]);
        assert!(payload.is_empty());
        assert_eq!(corrected, 0);
    }

    #[test]
    fn test_decode_burst_roundtrip() {
        let tx = Transmitter::new(1200).unwrap();
        let rx = Receiver::new(1200).unwrap();
        let burst = tx.encode_to_samples(b"direct burst");
        let (payload, corrected) = rx.decode_burst(&burst);
        assert_eq!(payload, b"direct burst");
        assert_eq!(corrected, 0);
    }
}
