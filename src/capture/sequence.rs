use super::CaptureSource;
use anyhow::{bail, Context, Result};
use image::RgbImage;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

const EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Replays still images from a directory as a video stream
///
/// Files are read in lexicographic order of their names, so zero-padded
/// sequence numbers replay in capture order.
pub struct ImageSequence {
    frames: VecDeque<PathBuf>,
    resolution: (u32, u32),
}

impl ImageSequence {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        tracing::info!("Reading frames from {}", dir.display());

        let mut frames: Vec<PathBuf> = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read frame directory {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| is_image(path))
            .collect();
        frames.sort();

        let Some(first) = frames.first() else {
            bail!("No image files found in {}", dir.display());
        };
        let resolution = image::image_dimensions(first)
            .with_context(|| format!("Failed to read {}", first.display()))?;

        tracing::info!(
            "Found {} frames at {}x{}",
            frames.len(),
            resolution.0,
            resolution.1
        );

        Ok(Self {
            frames: frames.into(),
            resolution,
        })
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

impl CaptureSource for ImageSequence {
    fn capture_frame(&mut self) -> Result<Option<RgbImage>> {
        let Some(path) = self.frames.pop_front() else {
            return Ok(None);
        };

        let frame = image::open(&path)
            .with_context(|| format!("Failed to decode {}", path.display()))?
            .to_rgb8();

        Ok(Some(frame))
    }

    fn resolution(&self) -> (u32, u32) {
        self.resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("handsign-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn replays_in_name_order_then_ends() {
        let dir = scratch_dir("sequence");
        RgbImage::from_pixel(4, 3, Rgb([20, 20, 20]))
            .save(dir.join("frame_002.png"))
            .unwrap();
        RgbImage::from_pixel(4, 3, Rgb([10, 10, 10]))
            .save(dir.join("frame_001.png"))
            .unwrap();
        std::fs::write(dir.join("notes.txt"), "not a frame").unwrap();

        let mut source = ImageSequence::new(&dir).unwrap();
        assert_eq!(source.resolution(), (4, 3));
        assert_eq!(source.remaining(), 2);

        let first = source.capture_frame().unwrap().unwrap();
        assert_eq!(first.get_pixel(0, 0)[0], 10);
        let second = source.capture_frame().unwrap().unwrap();
        assert_eq!(second.get_pixel(0, 0)[0], 20);
        assert!(source.capture_frame().unwrap().is_none());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = scratch_dir("empty");
        assert!(ImageSequence::new(&dir).is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
