use super::ReportSink;
use crate::gesture::GestureLabel;
use crate::session::FrameReport;
use anyhow::Result;

/// Logs gesture changes at info level and every frame at debug level.
#[derive(Default)]
pub struct LogSink {
    last: Option<GestureLabel>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_label(&self) -> Option<GestureLabel> {
        self.last
    }
}

impl ReportSink for LogSink {
    fn consume(&mut self, report: &FrameReport) -> Result<()> {
        if self.last != Some(report.label) {
            tracing::info!("Frame {}: {}", report.index, report.label);
            self.last = Some(report.label);
        }

        if let Some(hand) = &report.hand {
            let ext = &hand.extremities;
            tracing::debug!(
                "Frame {}: hand x={}..{} y={}..{}, {} contour points, raw fingers {:?}",
                report.index,
                ext.left.x,
                ext.right.x,
                ext.top.y,
                ext.bottom.y,
                hand.contour.len(),
                report.raw_fingers
            );
        }

        Ok(())
    }
}
