//! Zstandard handling for compressed ABOF payloads.
//!
//! A compressed container stores its whole body as one opaque blob after
//! the header. When the blob's frame header declares the content size, the
//! output is allocated once and filled in a single call; otherwise the blob
//! is streamed through a bounded working buffer.

use super::error::AboError;
use std::io::{ErrorKind, Read};
use tracing::{debug, trace};
use zstd::zstd_safe;

/// Compression level used when the caller does not choose one.
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 3;

/// Declared sizes above this are treated as corrupt rather than allocated.
pub const MAX_DECLARED_CONTENT_SIZE: u64 = 4 * 1024 * 1024 * 1024;

const STREAM_CHUNK_SIZE: usize = 64 * 1024;

/// Decompresses a complete Zstandard blob.
///
/// # Errors
///
/// Returns [`AboError::CorruptPayload`] if the blob is empty, its header
/// cannot be parsed, it declares an implausible size, or decompression of
/// any chunk fails. Partial output is never returned.
pub fn decompress(blob: &[u8]) -> Result<Vec<u8>, AboError> {
    if blob.is_empty() {
        return Err(AboError::CorruptPayload(
            "compressed container has no payload bytes".to_string(),
        ));
    }

    let declared = zstd_safe::get_frame_content_size(blob).map_err(|_| {
        AboError::CorruptPayload("payload is not a valid zstd frame".to_string())
    })?;

    match declared {
        Some(size) => decompress_sized(blob, size),
        None => decompress_streaming(blob),
    }
}

fn decompress_sized(blob: &[u8], size: u64) -> Result<Vec<u8>, AboError> {
    if size > MAX_DECLARED_CONTENT_SIZE {
        return Err(AboError::CorruptPayload(format!(
            "declared content size {} exceeds limit of {} bytes",
            size, MAX_DECLARED_CONTENT_SIZE
        )));
    }
    let size = usize::try_from(size).map_err(|_| {
        AboError::CorruptPayload(format!("declared content size {} does not fit in memory", size))
    })?;

    debug!(
        "Decompressing {} byte payload into {} declared bytes.",
        blob.len(),
        size
    );
    let output = zstd::bulk::decompress(blob, size)
        .map_err(|e| AboError::CorruptPayload(format!("decompression failed: {}", e)))?;
    if output.len() != size {
        return Err(AboError::CorruptPayload(format!(
            "decompressed {} bytes but header declared {}",
            output.len(),
            size
        )));
    }
    Ok(output)
}

fn decompress_streaming(blob: &[u8]) -> Result<Vec<u8>, AboError> {
    debug!(
        "Content size not declared; streaming {} byte payload.",
        blob.len()
    );
    let mut decoder = zstd::stream::read::Decoder::with_buffer(blob)
        .map_err(|e| AboError::CorruptPayload(format!("failed to initialize decoder: {}", e)))?;

    let mut output = Vec::new();
    let mut chunk = vec![0u8; STREAM_CHUNK_SIZE];
    loop {
        match decoder.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                trace!("Decompressed chunk of {} bytes.", n);
                output.extend_from_slice(&chunk[..n]);
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(AboError::CorruptPayload(format!(
                    "decompression failed after {} bytes: {}",
                    output.len(),
                    e
                )));
            }
        }
    }
    Ok(output)
}

/// Compresses a payload at the given level, declaring the content size in
/// the frame header.
pub fn compress(payload: &[u8], level: i32) -> Result<Vec<u8>, AboError> {
    zstd::bulk::compress(payload, level).map_err(AboError::Io)
}
