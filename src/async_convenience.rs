//! Async convenience functions
//!
//! This module provides async wrappers for the common compression and
//! decompression operations. The codec itself is synchronous and CPU-bound:
//! input is read fully on the async side, then coded on tokio's blocking pool.

#[cfg(feature = "async")]
/// Async wrappers over the blocking codec
pub mod functions {
    use crate::{CompressionStats, Result};
    use std::io;
    use std::path::{Path, PathBuf};
    use tokio::io::{AsyncRead, AsyncReadExt};

    /// Run `job` on the blocking pool and hand back its result
    pub(crate) async fn run_blocking<T, F>(job: F) -> Result<T>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(job)
            .await
            .map_err(io::Error::other)?
    }

    /// Compress everything an async reader yields
    pub async fn compress_async<R: AsyncRead + Unpin>(mut reader: R) -> Result<Vec<u8>> {
        let mut input = Vec::new();
        reader.read_to_end(&mut input).await?;
        run_blocking(move || Ok(crate::encode_from_memory(&input))).await
    }

    /// Decompress a stream read from an async reader
    pub async fn decompress_async<R: AsyncRead + Unpin>(mut reader: R) -> Result<Vec<u8>> {
        let mut input = Vec::new();
        reader.read_to_end(&mut input).await?;
        run_blocking(move || crate::decompress_bytes(&input)).await
    }

    /// Compress a file asynchronously
    pub async fn compress_file<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_path: P1,
        output_path: P2,
    ) -> Result<CompressionStats> {
        let input = tokio::fs::read(input_path.as_ref()).await?;
        let (compressed, stats) =
            run_blocking(move || Ok(crate::compress_with_stats(&input))).await?;
        tokio::fs::write(output_path.as_ref(), &compressed).await?;

        log::debug!(
            "compressed {} -> {} ({} -> {} bytes)",
            input_path.as_ref().display(),
            output_path.as_ref().display(),
            stats.input_bytes,
            stats.output_bytes
        );
        Ok(stats)
    }

    /// Decompress a file asynchronously
    pub async fn decompress_file<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_path: P1,
        output_path: P2,
    ) -> Result<CompressionStats> {
        let input = tokio::fs::read(input_path.as_ref()).await?;
        let (output, stats) = run_blocking(move || {
            let mut reader = crate::LzssReader::new(&input[..]);
            let output = reader.decompress_all()?;
            Ok((output, reader.stats()))
        })
        .await?;
        tokio::fs::write(output_path.as_ref(), &output).await?;

        log::debug!(
            "decompressed {} -> {} ({} -> {} bytes)",
            input_path.as_ref().display(),
            output_path.as_ref().display(),
            stats.input_bytes,
            stats.output_bytes
        );
        Ok(stats)
    }

    /// Compress multiple files concurrently
    pub async fn compress_files<P: AsRef<Path> + Send + Sync>(
        files: Vec<P>,
        concurrency: Option<usize>,
    ) -> Result<Vec<(PathBuf, Vec<u8>)>> {
        use crate::async_batch::AsyncBatchProcessor;

        let mut processor = AsyncBatchProcessor::new();
        if let Some(limit) = concurrency {
            processor = processor.with_concurrency(limit);
        }

        processor.compress_files(files).await
    }
}

#[cfg(feature = "async")]
pub use functions::*;

#[cfg(all(test, feature = "async"))]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[tokio::test]
    async fn test_round_trip() {
        let data = b"async round trip, async round trip, async round trip".to_vec();
        let compressed = compress_async(Cursor::new(data.clone())).await.unwrap();
        assert_eq!(compressed, crate::encode_from_memory(&data));

        let restored = decompress_async(Cursor::new(compressed)).await.unwrap();
        assert_eq!(restored, data);
    }

    #[tokio::test]
    async fn test_decompress_truncated() {
        let result = decompress_async(Cursor::new(vec![0xA0u8])).await;
        assert!(matches!(result, Err(crate::LzssError::UnexpectedEof)));
    }

    #[tokio::test]
    async fn test_file_helpers() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.bin");
        let packed = dir.path().join("input.lz");
        let output = dir.path().join("output.bin");

        let data: Vec<u8> = (0..20_000u32).map(|i| (i % 97) as u8).collect();
        tokio::fs::write(&input, &data).await.unwrap();

        let stats = compress_file(&input, &packed).await.unwrap();
        assert_eq!(stats.input_bytes, data.len() as u64);
        assert_eq!(
            stats.output_bytes,
            tokio::fs::metadata(&packed).await.unwrap().len()
        );

        let stats = decompress_file(&packed, &output).await.unwrap();
        assert_eq!(stats.output_bytes, data.len() as u64);
        assert_eq!(tokio::fs::read(&output).await.unwrap(), data);
    }
}
