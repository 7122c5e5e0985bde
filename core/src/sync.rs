//! Clock recovery and payload-bit extraction.
//!
//! A capture is assumed to begin somewhere inside the 1010... training
//! preamble. Fitting the ideal training cycle against every candidate
//! offset in the first two input blocks finds the symbol grid; the fixed
//! `1 0 0 0` terminator then marks where training ends and payload begins.

use log::debug;

use crate::afsk::{mean_abs, template_distance, AfskDemodulator};
use crate::CLOCK_SCAN_SAMPLES;

/// Bit pattern separating the training preamble from the payload: one mark
/// followed by three spaces.
pub const TRAINING_TERMINATOR: [bool; 4] = [true, false, false, false];

/// Locate the symbol-phase origin of a burst by template matching.
///
/// Scans every offset in `[0, CLOCK_SCAN_SAMPLES - cycle_len)` and picks
/// the one whose slice deviates least from the ideal training cycle, the
/// lowest offset winning ties. The preamble produces minima one cycle
/// apart, so any of them lands on the symbol grid; the first is taken.
/// Returns `None` when the burst is too short to scan.
///
/// The burst is compared as captured; the hard-limiting amplifier applies
/// only to symbol decisions, never here.
pub fn find_clock_offset(burst: &[i16], training_cycle: &[i16]) -> Option<usize> {
    if burst.len() < CLOCK_SCAN_SAMPLES {
        return None;
    }
    let cycle_len = training_cycle.len();

    let mut best_offset = 0;
    let mut best_distance = f32::INFINITY;
    for offset in 0..CLOCK_SCAN_SAMPLES - cycle_len {
        let distance = template_distance(training_cycle, &burst[offset..offset + cycle_len]);
        if distance < best_distance {
            best_distance = distance;
            best_offset = offset;
        }
    }
    debug!(
        "clock recovered at offset {} (distance {:.1})",
        best_offset, best_distance
    );
    Some(best_offset)
}

/// Walk the symbol grid from `origin`, discard bits until the training
/// terminator has been seen, then collect payload bits until the samples
/// run out or a window drops below `end_threshold` (the trailing silence
/// guarantees one does).
///
/// Returns an empty bit string when no terminator is found.
pub fn extract_payload_bits(
    burst: &[i16],
    origin: usize,
    demodulator: &AfskDemodulator,
    end_threshold: u16,
) -> Vec<bool> {
    let bit_frames = demodulator.bit_frames();
    let mut cursor = origin;

    let mut recent = [false; 4];
    let mut decoded = 0usize;
    let mut terminated = false;
    while cursor + bit_frames <= burst.len() {
        let bit = demodulator.decide(&burst[cursor..cursor + bit_frames]);
        cursor += bit_frames;
        recent.rotate_left(1);
        recent[3] = bit;
        decoded += 1;
        if decoded >= 4 && recent == TRAINING_TERMINATOR {
            terminated = true;
            break;
        }
    }
    if !terminated {
        debug!("no training terminator in {} decoded symbols", decoded);
        return Vec::new();
    }

    let mut bits = Vec::new();
    while cursor + bit_frames <= burst.len() {
        let window = &burst[cursor..cursor + bit_frames];
        if mean_abs(window) < f32::from(end_threshold) {
            break;
        }
        bits.push(demodulator.decide(window));
        cursor += bit_frames;
    }
    debug!("extracted {} payload bits", bits.len());
    bits
}
