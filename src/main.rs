use anyhow::{Context, Result};
use clap::Parser;
use handsign::capture::{CaptureSource, ImageSequence, WebcamCapture};
use handsign::output::{LogSink, MaskDump, ReportSink};
use handsign::{GestureSession, PipelineConfig};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input webcam device index
    #[arg(short, long, default_value_t = 0)]
    input_device: u32,

    /// Replay frames from a directory of images instead of the webcam
    #[arg(long)]
    frames: Option<PathBuf>,

    /// Target frames per second (0 disables rate limiting)
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Stop after this many frames
    #[arg(long)]
    max_frames: Option<u64>,

    /// Write the segmented hand mask of each frame into this directory
    #[arg(long)]
    dump_masks: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    #[command(flatten)]
    pipeline: PipelineConfig,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    tracing::info!("handsign starting");

    let session = GestureSession::new(args.pipeline).context("Invalid pipeline configuration")?;
    let config = session.config();
    tracing::info!(
        "Frame: {}x{}, calibrating for {} frames",
        config.frame_width,
        config.frame_height,
        config.calibration_frames
    );

    // Initialize capture
    let mut capture: Box<dyn CaptureSource> = match &args.frames {
        Some(dir) => Box::new(ImageSequence::new(dir).context("Failed to open frame directory")?),
        None => Box::new(
            WebcamCapture::new(args.input_device).context("Failed to initialize webcam capture")?,
        ),
    };
    let (width, height) = capture.resolution();
    tracing::info!("Capture: {}x{}", width, height);

    // Initialize outputs
    let mut sinks: Vec<Box<dyn ReportSink>> = vec![Box::new(LogSink::new())];
    if let Some(dir) = &args.dump_masks {
        sinks.push(Box::new(
            MaskDump::new(dir).context("Failed to initialize mask output")?,
        ));
    }

    run_pipeline(capture.as_mut(), &mut sinks, session, args.fps, args.max_frames)?;

    Ok(())
}

fn run_pipeline<C, O>(
    capture: &mut C,
    output: &mut O,
    mut session: GestureSession,
    target_fps: u32,
    max_frames: Option<u64>,
) -> Result<()>
where
    C: CaptureSource + ?Sized,
    O: ReportSink,
{
    let frame_duration =
        (target_fps > 0).then(|| Duration::from_secs_f32(1.0 / target_fps as f32));
    let mut frame_count = 0u64;
    let mut total_capture_time = Duration::ZERO;
    let mut total_process_time = Duration::ZERO;
    let mut total_output_time = Duration::ZERO;

    tracing::info!("Starting main pipeline loop");
    tracing::info!("Keep the region of interest empty until calibration finishes");
    tracing::info!("Press Ctrl+C to stop");

    loop {
        if max_frames.is_some_and(|max| frame_count >= max) {
            tracing::info!("Reached frame limit of {}", frame_count);
            break;
        }

        let loop_start = Instant::now();

        // Capture frame
        let capture_start = Instant::now();
        let Some(frame) = capture
            .capture_frame()
            .context("Failed to capture frame")?
        else {
            tracing::info!("Input exhausted after {} frames", frame_count);
            break;
        };
        total_capture_time += capture_start.elapsed();

        // Recognition
        let process_start = Instant::now();
        let report = session
            .process_frame(&frame)
            .context("Failed to process frame")?;
        total_process_time += process_start.elapsed();

        // Output
        let output_start = Instant::now();
        output
            .consume(&report)
            .context("Failed to write frame report")?;
        total_output_time += output_start.elapsed();

        frame_count += 1;

        // Log stats every 30 frames
        if frame_count % 30 == 0 {
            let avg_capture_ms = total_capture_time.as_secs_f64() * 1000.0 / frame_count as f64;
            let avg_process_ms = total_process_time.as_secs_f64() * 1000.0 / frame_count as f64;
            let avg_output_ms = total_output_time.as_secs_f64() * 1000.0 / frame_count as f64;
            let total_ms = avg_capture_ms + avg_process_ms + avg_output_ms;

            tracing::info!(
                "Frame {}: capture={:.1}ms, process={:.1}ms, output={:.1}ms, total={:.1}ms, fps={:.1}, gesture={}",
                frame_count,
                avg_capture_ms,
                avg_process_ms,
                avg_output_ms,
                total_ms,
                1000.0 / total_ms,
                report.label
            );
        }

        // Frame rate limiting
        if let Some(frame_duration) = frame_duration {
            let elapsed = loop_start.elapsed();
            if elapsed < frame_duration {
                std::thread::sleep(frame_duration - elapsed);
            }
        }
    }

    Ok(())
}
