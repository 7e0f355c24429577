mod log;
mod mask_dump;

pub use log::LogSink;
pub use mask_dump::MaskDump;

use anyhow::Result;

use crate::session::FrameReport;

/// Trait for consumers of per-frame recognition results
pub trait ReportSink {
    /// Handle the report for one frame
    fn consume(&mut self, report: &FrameReport) -> Result<()>;
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn consume(&mut self, report: &FrameReport) -> Result<()> {
        (**self).consume(report)
    }
}

impl<S: ReportSink> ReportSink for Vec<S> {
    fn consume(&mut self, report: &FrameReport) -> Result<()> {
        for sink in self.iter_mut() {
            sink.consume(report)?;
        }
        Ok(())
    }
}
