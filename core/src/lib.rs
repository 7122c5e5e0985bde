//! Audio frequency-shift keying (AFSK) software modem
//!
//! Transmits byte payloads as audible square-wave tones over a mono PCM
//! channel and recovers them from noisy captures, correcting single-bit
//! errors with Hamming(7,4). Built for half-duplex voice-band links
//! (handheld transceivers, intercoms, telephone-grade audio).

pub mod afsk;
pub mod bits;
pub mod capture;
pub mod ecc;
pub mod error;
pub mod pcm;
pub mod profile;
pub mod receiver;
pub mod sync;
pub mod transmitter;
pub mod waveform;

pub use afsk::{AfskDemodulator, AfskModulator};
pub use bits::{bits_to_bytes, bytes_to_bits};
pub use capture::capture_burst;
pub use error::{AfskError, Result};
pub use pcm::{MemorySink, MemorySource, PcmSink, PcmSource};
pub use profile::ModemProfile;
pub use receiver::Receiver;
pub use sync::{extract_payload_bits, find_clock_offset, TRAINING_TERMINATOR};
pub use transmitter::Transmitter;
pub use waveform::Waveforms;

// Configuration constants

/// PCM sample rate in Hz. The sound card resamples if the hardware differs.
pub const SAMPLE_RATE: usize = 48000;

/// Samples per block delivered by a PCM source.
pub const BLOCK_SAMPLES: usize = 2048;

/// Baud rates with integral, 4-divisible bit frames at 48 kHz.
pub const SUPPORTED_BAUD_RATES: [u32; 5] = [300, 600, 1200, 2400, 6000];

/// Default symbol rate (AFSK1200).
pub const DEFAULT_BAUD: u32 = 1200;

/// Clock recovery searches for the training-cycle phase within this many
/// samples from the start of a capture (two input blocks). The bound is a
/// property of the block size, not of the baud rate.
pub const CLOCK_SCAN_SAMPLES: usize = 2 * BLOCK_SAMPLES;

/// Trailing silence appended to every transmission (100 ms) so the
/// receiver's end-of-burst threshold is guaranteed to fire.
pub const TAIL_SAMPLES: usize = SAMPLE_RATE / 10;

/// Amplifier deadzone: samples within ±this are squashed to zero before
/// template matching.
pub const AMPLIFIER_DEADZONE: i16 = 512;

/// Mean-absolute block amplitude above which capture begins.
pub const DEFAULT_START_THRESHOLD: u16 = 18000;

/// Mean-absolute amplitude below which capture and decoding end.
/// Must stay below the start threshold (hysteresis).
pub const DEFAULT_END_THRESHOLD: u16 = 14000;

/// Default length of the 1010... training preamble in seconds.
pub const DEFAULT_TRAINING_SECONDS: f32 = 0.5;
