//! Result writer for verified proxies
//!
//! All console output from workers and all appends to the category files go
//! through one lock, so a notification never tears the progress bar and two
//! workers never interleave inside a file.

use crate::proxy::models::{ProxyType, VerifiedResult};
use crate::Result;
use anyhow::Context;
use indicatif::ProgressBar;
use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Serialized sink for notifications, progress and category files
pub struct ResultWriter {
    output_dir: PathBuf,
    progress: ProgressBar,
    lock: Mutex<()>,
}

impl ResultWriter {
    pub fn new<P: AsRef<Path>>(output_dir: P, progress: ProgressBar) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            progress,
            lock: Mutex::new(()),
        }
    }

    /// Category file for a protocol
    pub fn path_for(&self, proxy_type: ProxyType) -> PathBuf {
        self.output_dir.join(proxy_type.file_name())
    }

    /// Announce a verified result and append it to its category file.
    ///
    /// The file is opened in append mode for this call only and closed
    /// before the lock is released.
    pub fn record(&self, result: &VerifiedResult) -> Result<()> {
        let path = self.path_for(result.proxy_type);
        let _guard = self.lock.lock();

        self.progress.suspend(|| {
            info!(
                "✅ [WORKING] {} as {}",
                result.candidate,
                result.proxy_type.name().to_uppercase()
            );
        });

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        file.write_all(format!("{}\n", result.candidate).as_bytes())
            .with_context(|| format!("failed to append to {}", path.display()))?;

        Ok(())
    }

    /// Log an informational message without tearing the progress bar
    pub fn notice(&self, message: &str) {
        let _guard = self.lock.lock();
        self.progress.suspend(|| info!("{}", message));
    }

    /// Log a warning without tearing the progress bar
    pub fn warn(&self, message: &str) {
        let _guard = self.lock.lock();
        self.progress.suspend(|| warn!("{}", message));
    }

    /// Count one finished candidate
    pub fn tick(&self) {
        self.progress.inc(1);
    }

    /// Number of candidates counted so far
    pub fn finished(&self) -> u64 {
        self.progress.position()
    }

    /// Stop drawing the progress bar
    pub fn finish(&self) {
        let _guard = self.lock.lock();
        self.progress.finish();
    }
}
