//! Async batch processing module
//!
//! Compresses many files concurrently. Every file gets its own encoder, so
//! jobs share nothing but the concurrency limit.

#[cfg(feature = "async")]
/// Concurrent file compression with a configurable concurrency limit
pub mod processor {
    use crate::async_convenience::functions::run_blocking;
    use crate::{CompressionStats, Result};
    use futures::stream::{self, StreamExt, TryStreamExt};
    use std::path::{Path, PathBuf};

    /// Concurrent file processor
    #[derive(Debug, Clone)]
    pub struct AsyncBatchProcessor {
        concurrency_limit: usize,
    }

    impl AsyncBatchProcessor {
        /// Create a new batch processor, one job per CPU
        pub fn new() -> Self {
            Self {
                concurrency_limit: num_cpus::get(),
            }
        }

        /// Set the concurrency limit (at least 1)
        pub fn with_concurrency(mut self, limit: usize) -> Self {
            self.concurrency_limit = limit.max(1);
            self
        }

        /// Current concurrency limit
        pub fn concurrency(&self) -> usize {
            self.concurrency_limit
        }

        /// Compress every file, returning each path with its compressed bytes
        ///
        /// Results arrive in completion order. The first failure aborts the
        /// batch.
        pub async fn compress_files<P: AsRef<Path> + Send + Sync>(
            &self,
            files: Vec<P>,
        ) -> Result<Vec<(PathBuf, Vec<u8>)>> {
            let results = stream::iter(files.into_iter().map(|path| async move {
                let (path, compressed, _) = compress_single_file(path.as_ref()).await?;
                Ok::<_, crate::LzssError>((path, compressed))
            }))
            .buffer_unordered(self.concurrency_limit)
            .try_collect()
            .await?;

            Ok(results)
        }

        /// Stream per-file statistics as jobs complete
        pub fn compress_files_streaming<P: AsRef<Path> + Send + Sync + 'static>(
            &self,
            files: Vec<P>,
        ) -> impl futures::Stream<Item = Result<(PathBuf, CompressionStats)>> + '_ {
            stream::iter(files.into_iter().map(|path| async move {
                let (path, _, stats) = compress_single_file(path.as_ref()).await?;
                Ok::<_, crate::LzssError>((path, stats))
            }))
            .buffer_unordered(self.concurrency_limit)
        }
    }

    impl Default for AsyncBatchProcessor {
        fn default() -> Self {
            Self::new()
        }
    }

    async fn compress_single_file(path: &Path) -> Result<(PathBuf, Vec<u8>, CompressionStats)> {
        let input = tokio::fs::read(path).await?;
        let (compressed, stats) =
            run_blocking(move || Ok(crate::compress_with_stats(&input))).await?;
        log::debug!("batch: {} -> {} bytes", path.display(), compressed.len());
        Ok((path.to_path_buf(), compressed, stats))
    }
}

#[cfg(feature = "async")]
pub use processor::AsyncBatchProcessor;
