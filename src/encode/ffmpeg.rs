use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use anyhow::Context as _;

use crate::foundation::core::PixelSize;
use crate::foundation::error::{CineloreError, CineloreResult};
use crate::frames::store::VideoFrame;

/// Output settings for a preview video.
#[derive(Clone, Debug)]
pub struct PreviewConfig {
    /// Frame width, px. Must be even.
    pub width: u32,
    /// Frame height, px. Must be even.
    pub height: u32,
    /// Output frame rate, one frame per display refresh.
    pub fps: u32,
    /// Output MP4 path.
    pub out_path: PathBuf,
    /// Replace an existing file.
    pub overwrite: bool,
}

impl PreviewConfig {
    /// MP4 settings sized for `size`, overwriting `out_path`.
    pub fn mp4(out_path: impl Into<PathBuf>, size: PixelSize, fps: u32) -> Self {
        Self {
            width: size.width,
            height: size.height,
            fps,
            out_path: out_path.into(),
            overwrite: true,
        }
    }

    /// Reject zero or odd dimensions and a zero frame rate.
    pub fn validate(&self) -> CineloreResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CineloreError::validation(
                "encode width/height must be non-zero",
            ));
        }
        if self.fps == 0 {
            return Err(CineloreError::validation("encode fps must be non-zero"));
        }
        // yuv420p output.
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(CineloreError::validation(
                "encode width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(())
    }

    fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// `true` when `ffmpeg` runs.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Create the parent directory of `path`.
pub fn ensure_parent_dir(path: &Path) -> CineloreResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Streams straight-alpha RGBA8 frames into an `ffmpeg` child process producing H.264 MP4.
pub struct FfmpegEncoder {
    cfg: PreviewConfig,
    background: [u8; 3],
    child: Child,
    stdin: Option<ChildStdin>,
    scratch: Vec<u8>,
    frames: u64,
}

impl FfmpegEncoder {
    /// Spawn `ffmpeg`. Translucent pixels are flattened over `background`.
    #[tracing::instrument(skip_all, fields(out = %cfg.out_path.display()))]
    pub fn new(cfg: PreviewConfig, background: [u8; 3]) -> CineloreResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(CineloreError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(CineloreError::media(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .arg(if cfg.overwrite { "-y" } else { "-n" })
            .args([
                "-loglevel",
                "error",
                "-f",
                "rawvideo",
                "-pix_fmt",
                "rgba",
                "-s",
                &format!("{}x{}", cfg.width, cfg.height),
                "-r",
                &cfg.fps.to_string(),
                "-i",
                "pipe:0",
                "-an",
                "-c:v",
                "libx264",
                "-pix_fmt",
                "yuv420p",
                "-movflags",
                "+faststart",
            ])
            .arg(&cfg.out_path);

        let mut child = cmd
            .spawn()
            .map_err(|e| CineloreError::media(format!("failed to spawn ffmpeg: {e}")))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| CineloreError::media("failed to open ffmpeg stdin"))?;

        tracing::debug!(width = cfg.width, height = cfg.height, fps = cfg.fps, "encoder started");
        Ok(Self {
            scratch: vec![0u8; cfg.frame_len()],
            cfg,
            background,
            child,
            stdin: Some(stdin),
            frames: 0,
        })
    }

    /// Frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames
    }

    /// Append one painted frame.
    pub fn encode_frame(&mut self, frame: &VideoFrame) -> CineloreResult<()> {
        let size = frame.size();
        if size.width != self.cfg.width || size.height != self.cfg.height {
            return Err(CineloreError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                size.width, size.height, self.cfg.width, self.cfg.height
            )));
        }
        self.encode_rgba8(frame.rgba8())
    }

    /// Append one tightly packed straight-alpha RGBA8 buffer.
    pub fn encode_rgba8(&mut self, rgba8: &[u8]) -> CineloreResult<()> {
        flatten_to_opaque_rgba8(&mut self.scratch, rgba8, self.background)?;
        let Some(stdin) = self.stdin.as_mut() else {
            return Err(CineloreError::media("ffmpeg encoder is already finalized"));
        };
        stdin
            .write_all(&self.scratch)
            .map_err(|e| CineloreError::media(format!("failed to write frame to ffmpeg: {e}")))?;
        self.frames += 1;
        Ok(())
    }

    /// Close the input and wait for `ffmpeg` to finish the file.
    pub fn finish(mut self) -> CineloreResult<PathBuf> {
        drop(self.stdin.take());
        let output = self
            .child
            .wait_with_output()
            .map_err(|e| CineloreError::media(format!("failed to wait for ffmpeg: {e}")))?;
        if !output.status.success() {
            return Err(CineloreError::media(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        tracing::info!(frames = self.frames, out = %self.cfg.out_path.display(), "preview encoded");
        Ok(self.cfg.out_path.clone())
    }
}

fn flatten_to_opaque_rgba8(dst: &mut [u8], src: &[u8], bg: [u8; 3]) -> CineloreResult<()> {
    if dst.len() != src.len() {
        return Err(CineloreError::validation(format!(
            "rgba8 buffer is {} bytes, expected {}",
            src.len(),
            dst.len()
        )));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        let inv = 255 - a;
        for c in 0..3 {
            let v = mul_div255(u16::from(s[c]), a) + mul_div255(u16::from(bg[c]), inv);
            d[c] = v.min(255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    ((u32::from(x) * u32::from(y) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
