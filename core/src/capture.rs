//! Amplitude-gated burst capture.
//!
//! A burst is recorded between two hysteresis gates: recording begins with
//! the first block whose mean absolute amplitude exceeds the start
//! threshold and ends with the first block that falls below the end
//! threshold. Squelch should be enabled on receiving hardware so the idle
//! line sits well under the start gate.

use log::{debug, trace};

use crate::afsk::mean_abs;
use crate::error::Result;
use crate::pcm::PcmSource;
use crate::BLOCK_SAMPLES;

/// Read blocks from `source` until a burst has been gated in and out
/// again, or until `timeout_frames` samples have been listened to without
/// the start gate opening (returning an empty buffer).
///
/// The first block after starting the source is discarded to flush any
/// stale driver buffer. The triggering block is the first block of the
/// returned burst and the below-threshold closing block is the last; no
/// other block is dropped or reordered. Once recording has begun the
/// timeout no longer applies; the burst drains to its end.
pub fn capture_burst(
    source: &mut dyn PcmSource,
    start_threshold: u16,
    end_threshold: u16,
    timeout_frames: usize,
) -> Result<Vec<i16>> {
    debug_assert!(start_threshold > end_threshold);

    source.start()?;
    let _ = source.read_block()?;

    let mut listened = 0usize;
    let burst = loop {
        let block = source.read_block()?;
        let amplitude = mean_abs(&block);
        trace!("listening: block amplitude {:.0}", amplitude);

        if amplitude > f32::from(start_threshold) {
            debug!("capture gate opened at amplitude {:.0}", amplitude);
            let mut burst = block;
            loop {
                let block = source.read_block()?;
                burst.extend_from_slice(&block);
                let amplitude = mean_abs(&block);
                trace!("recording: block amplitude {:.0}", amplitude);
                if amplitude < f32::from(end_threshold) {
                    debug!(
                        "capture gate closed at amplitude {:.0}, {} samples recorded",
                        amplitude,
                        burst.len()
                    );
                    break;
                }
            }
            break burst;
        }

        listened += BLOCK_SAMPLES;
        if listened >= timeout_frames {
            debug!("capture timed out after {} frames", listened);
            break Vec::new();
        }
    };

    source.stop()?;
    Ok(burst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pcm::MemorySource;
    use crate::{DEFAULT_END_THRESHOLD, DEFAULT_START_THRESHOLD};

    fn capture_from(samples: Vec<i16>, timeout_frames: usize) -> Vec<i16> {
        let mut source = MemorySource::new(samples);
        capture_burst(
            &mut source,
            DEFAULT_START_THRESHOLD,
            DEFAULT_END_THRESHOLD,
            timeout_frames,
        )
        .unwrap()
    }

    #[test]
    fn test_silence_times_out_empty() {
        let burst = capture_from(vec![0i16; 48000], 24000);
        assert!(burst.is_empty());
    }

    #[test]
    fn test_quiet_noise_below_gate_times_out() {
        let samples: Vec<i16> = (0..48000).map(|i| if i % 2 == 0 { 500 } else { -500 }).collect();
        let burst = capture_from(samples, 24000);
        assert!(burst.is_empty());
    }

    #[test]
    fn test_burst_is_gated_by_thresholds() {
        // flush block + 2 quiet blocks + 4 loud blocks + silence
        let mut samples = vec![0i16; BLOCK_SAMPLES * 3];
        samples.extend(vec![30000i16; BLOCK_SAMPLES * 4]);
        samples.extend(vec![0i16; BLOCK_SAMPLES * 2]);

        let burst = capture_from(samples, 480000);
        // 4 loud blocks plus the closing quiet block
        assert_eq!(burst.len(), BLOCK_SAMPLES * 5);
        assert!(mean_abs(&burst[..BLOCK_SAMPLES]) > f32::from(DEFAULT_START_THRESHOLD));
        let last = &burst[burst.len() - BLOCK_SAMPLES..];
        assert!(mean_abs(last) < f32::from(DEFAULT_END_THRESHOLD));
    }

    #[test]
    fn test_flush_block_is_discarded() {
        // Signal only in the very first block; the flush eats it, then the
        // line is silent until the timeout
        let mut samples = vec![30000i16; BLOCK_SAMPLES];
        samples.extend(vec![0i16; BLOCK_SAMPLES * 30]);
        let burst = capture_from(samples, BLOCK_SAMPLES * 4);
        assert!(burst.is_empty());
    }

    #[test]
    fn test_timeout_counts_listened_frames() {
        // Timeout of one block's worth: exactly one listening read happens
        // after the flush
        let burst = capture_from(vec![0i16; BLOCK_SAMPLES * 10], 1);
        assert!(burst.is_empty());
    }
}
