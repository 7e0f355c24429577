use super::ReportSink;
use crate::session::FrameReport;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Writes the segmented hand mask of every frame that has one as a PNG file.
pub struct MaskDump {
    dir: PathBuf,
    written: u64,
}

impl MaskDump {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create mask directory {}", dir.display()))?;

        tracing::info!("Writing hand masks to {}", dir.display());

        Ok(Self { dir, written: 0 })
    }

    pub fn path_for(&self, index: u64) -> PathBuf {
        self.dir.join(format!("mask_{index:06}.png"))
    }

    pub fn written(&self) -> u64 {
        self.written
    }
}

impl ReportSink for MaskDump {
    fn consume(&mut self, report: &FrameReport) -> Result<()> {
        let Some(hand) = &report.hand else {
            return Ok(());
        };

        let path = self.path_for(report.index);
        hand.mask
            .save(&path)
            .with_context(|| format!("Failed to write mask to {}", path.display()))?;
        self.written += 1;

        Ok(())
    }
}
