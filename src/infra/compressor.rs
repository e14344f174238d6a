//! Content compression infrastructure.
//!
//! Provides trait-based abstractions for HTTP response body compression,
//! supporting gzip, deflate, and brotli encodings.

use std::io::Write;

use crate::error::SqueezeError;
use crate::policy::Encoding;

/// Brotli window size (log2), matching the encoder's default.
const BROTLI_LGWIN: u32 = 22;
const BROTLI_BUFFER_SIZE: usize = 4096;

/// Trait for content compression.
///
/// This abstraction allows for different compression implementations
/// and makes testing easier.
pub trait Compressor: Send + Sync {
    /// The content-encoding this compressor produces.
    fn encoding(&self) -> Encoding;

    /// Compresses the given data.
    ///
    /// # Arguments
    ///
    /// * `data` - The uncompressed data
    /// * `level` - Codec-specific level, clamped to the codec's maximum
    fn compress(&self, data: &[u8], level: u32) -> Result<Vec<u8>, SqueezeError>;
}

/// Gzip compressor implementation.
#[derive(Default)]
pub struct GzipCompressor;

impl Compressor for GzipCompressor {
    fn encoding(&self) -> Encoding {
        Encoding::Gzip
    }

    fn compress(&self, data: &[u8], level: u32) -> Result<Vec<u8>, SqueezeError> {
        let mut encoder =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::new(level.min(9)));
        encoder
            .write_all(data)
            .and_then(|_| encoder.finish())
            .map_err(|source| SqueezeError::Compression {
                encoding: self.encoding(),
                source,
            })
    }
}

/// Deflate compressor implementation.
#[derive(Default)]
pub struct DeflateCompressor;

impl Compressor for DeflateCompressor {
    fn encoding(&self) -> Encoding {
        Encoding::Deflate
    }

    fn compress(&self, data: &[u8], level: u32) -> Result<Vec<u8>, SqueezeError> {
        let mut encoder =
            flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::new(level.min(9)));
        encoder
            .write_all(data)
            .and_then(|_| encoder.finish())
            .map_err(|source| SqueezeError::Compression {
                encoding: self.encoding(),
                source,
            })
    }
}

/// Brotli compressor implementation.
#[derive(Default)]
pub struct BrotliCompressor;

impl Compressor for BrotliCompressor {
    fn encoding(&self) -> Encoding {
        Encoding::Brotli
    }

    fn compress(&self, data: &[u8], level: u32) -> Result<Vec<u8>, SqueezeError> {
        let mut writer = brotli::CompressorWriter::new(
            Vec::new(),
            BROTLI_BUFFER_SIZE,
            level.min(11),
            BROTLI_LGWIN,
        );
        writer
            .write_all(data)
            .map_err(|source| SqueezeError::Compression {
                encoding: self.encoding(),
                source,
            })?;
        // into_inner finishes the stream
        Ok(writer.into_inner())
    }
}

/// Multi-format compressor that selects the appropriate algorithm based on encoding.
#[derive(Default)]
pub struct MultiCompressor {
    gzip: GzipCompressor,
    deflate: DeflateCompressor,
    brotli: BrotliCompressor,
}

impl MultiCompressor {
    /// Creates a new `MultiCompressor` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compresses data with the given encoding and level.
    pub fn compress(
        &self,
        data: &[u8],
        encoding: Encoding,
        level: u32,
    ) -> Result<Vec<u8>, SqueezeError> {
        match encoding {
            Encoding::Gzip => self.gzip.compress(data, level),
            Encoding::Deflate => self.deflate.compress(data, level),
            Encoding::Brotli => self.brotli.compress(data, level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    const SAMPLE: &[u8] = b"Hello, World! Hello, World! Hello, World! Hello, World!";

    #[test]
    fn test_gzip_compression() {
        let compressed = GzipCompressor.compress(SAMPLE, 9).unwrap();

        let mut decoder = flate2::read::GzDecoder::new(compressed.as_slice());
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed).unwrap();
        assert_eq!(decompressed, SAMPLE);
    }

    #[test]
    fn test_deflate_compression() {
        let compressed = DeflateCompressor.compress(SAMPLE, 1).unwrap();

        let mut decoder = flate2::read::DeflateDecoder::new(compressed.as_slice());
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed).unwrap();
        assert_eq!(decompressed, SAMPLE);
    }

    #[test]
    fn test_brotli_compression() {
        let compressed = BrotliCompressor.compress(SAMPLE, 11).unwrap();
        assert!(compressed.len() < SAMPLE.len());

        let mut decompressed = Vec::new();
        brotli::BrotliDecompress(&mut std::io::Cursor::new(compressed), &mut decompressed)
            .unwrap();
        assert_eq!(decompressed, SAMPLE);
    }

    #[test]
    fn test_out_of_range_level_is_clamped() {
        let compressed = MultiCompressor::new()
            .compress(SAMPLE, Encoding::Gzip, 99)
            .unwrap();
        let mut decoder = flate2::read::GzDecoder::new(compressed.as_slice());
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed).unwrap();
        assert_eq!(decompressed, SAMPLE);
    }

    #[test]
    fn test_multi_dispatches_by_encoding() {
        let multi = MultiCompressor::new();
        let gzip = multi.compress(SAMPLE, Encoding::Gzip, 6).unwrap();
        // gzip magic bytes
        assert_eq!(&gzip[..2], &[0x1f, 0x8b]);

        let deflate = multi.compress(SAMPLE, Encoding::Deflate, 6).unwrap();
        assert_ne!(&deflate[..2], &[0x1f, 0x8b]);
    }
}
