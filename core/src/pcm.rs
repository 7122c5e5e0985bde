//! PCM endpoint contracts and in-memory implementations.
//!
//! The audio device driver is an external collaborator: anything that can
//! play a contiguous run of signed 16-bit mono samples at 48 kHz, or
//! deliver them in fixed 2048-sample blocks, can carry a burst. The
//! in-memory endpoints back the tests and the WAV file paths in the CLI.

use crate::error::Result;
use crate::BLOCK_SAMPLES;

/// Blocking sample sink at 48 kHz mono i16. `write` returns once the whole
/// burst has been handed off for playback.
pub trait PcmSink {
    fn write(&mut self, samples: &[i16]) -> Result<()>;
}

/// Blocking sample source at 48 kHz mono i16, delivered in fixed blocks of
/// [`BLOCK_SAMPLES`].
pub trait PcmSource {
    /// Open the stream. Called once before the first `read_block`.
    fn start(&mut self) -> Result<()>;

    /// Block until the next 2048-sample block is available.
    fn read_block(&mut self) -> Result<Vec<i16>>;

    /// Close the stream. No `read_block` follows.
    fn stop(&mut self) -> Result<()>;
}

/// Sink that collects everything written into a buffer.
#[derive(Debug, Default)]
pub struct MemorySink {
    samples: Vec<i16>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }
}

impl PcmSink for MemorySink {
    fn write(&mut self, samples: &[i16]) -> Result<()> {
        self.samples.extend_from_slice(samples);
        Ok(())
    }
}

/// Source that replays a prerecorded buffer block by block, then delivers
/// silence once exhausted, like an idle line.
#[derive(Debug)]
pub struct MemorySource {
    samples: Vec<i16>,
    cursor: usize,
}

impl MemorySource {
    pub fn new(samples: Vec<i16>) -> Self {
        Self { samples, cursor: 0 }
    }
}

impl PcmSource for MemorySource {
    fn start(&mut self) -> Result<()> {
        Ok(())
    }

    fn read_block(&mut self) -> Result<Vec<i16>> {
        let mut block = vec![0i16; BLOCK_SAMPLES];
        let remaining = self.samples.len().saturating_sub(self.cursor);
        let take = remaining.min(BLOCK_SAMPLES);
        block[..take].copy_from_slice(&self.samples[self.cursor..self.cursor + take]);
        self.cursor += take;
        Ok(block)
    }

    fn stop(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_collects() {
        let mut sink = MemorySink::new();
        sink.write(&[1, 2, 3]).unwrap();
        sink.write(&[4]).unwrap();
        assert_eq!(sink.samples(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_memory_source_blocks() {
        let samples: Vec<i16> = (0..BLOCK_SAMPLES as i16 + 10).collect();
        let mut source = MemorySource::new(samples.clone());
        source.start().unwrap();

        let first = source.read_block().unwrap();
        assert_eq!(first.len(), BLOCK_SAMPLES);
        assert_eq!(&first[..], &samples[..BLOCK_SAMPLES]);

        // Partial remainder is zero-padded to a full block
        let second = source.read_block().unwrap();
        assert_eq!(second.len(), BLOCK_SAMPLES);
        assert_eq!(&second[..10], &samples[BLOCK_SAMPLES..]);
        assert!(second[10..].iter().all(|&s| s == 0));

        // Exhausted source keeps delivering silence
        let third = source.read_block().unwrap();
        assert!(third.iter().all(|&s| s == 0));
        source.stop().unwrap();
    }
}
