use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::time::Duration;

use crate::foundation::core::PixelSize;
use crate::foundation::error::{CineloreError, CineloreResult};
use crate::frames::source::{CaptureSurface, SeekStatus, VideoMetadata, VideoSource};

/// Stream facts reported by `ffprobe`.
#[derive(Clone, Debug)]
pub struct ProbedVideo {
    /// Probed file.
    pub source_path: PathBuf,
    /// Natural width.
    pub width: u32,
    /// Natural height.
    pub height: u32,
    /// Container duration in seconds (`0` when unknown).
    pub duration_sec: f64,
}

/// [`VideoSource`] backed by the system `ffprobe`/`ffmpeg` binaries.
///
/// Each seek spawns one `ffmpeg` decode of the frame at the requested timestamp and waits for its
/// output up to the caller's timeout. A decode that misses the deadline is killed and reaped
/// before the seek returns. Audio is never decoded, so muting is bookkeeping only.
pub struct FfmpegVideoSource {
    probed: ProbedVideo,
    ffmpeg: PathBuf,
    muted: bool,
    decoded: Option<Vec<u8>>,
}

impl FfmpegVideoSource {
    /// Probe `path` and prepare a source for it.
    pub fn open(path: impl AsRef<Path>) -> CineloreResult<Self> {
        let probed = probe_video(path.as_ref())?;
        Ok(Self::from_probed(probed))
    }

    pub(crate) fn from_probed(probed: ProbedVideo) -> Self {
        Self {
            probed,
            ffmpeg: PathBuf::from("ffmpeg"),
            muted: false,
            decoded: None,
        }
    }

    /// Decode with this `ffmpeg` executable instead of the one on `PATH`.
    pub fn with_ffmpeg_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.ffmpeg = program.into();
        self
    }

    /// Probe results.
    pub fn probed(&self) -> &ProbedVideo {
        &self.probed
    }

    /// `true` once [`VideoSource::set_muted`] silenced the source.
    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

impl VideoSource for FfmpegVideoSource {
    fn metadata(&self) -> Option<VideoMetadata> {
        Some(VideoMetadata {
            duration_sec: self.probed.duration_sec,
            width: self.probed.width,
            height: self.probed.height,
        })
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn seek(&mut self, time_sec: f64, timeout: Duration) -> CineloreResult<SeekStatus> {
        self.decoded = None;
        let mut child = spawn_frame_decode(&self.ffmpeg, &self.probed, time_sec)?;
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| CineloreError::media("ffmpeg stdout was not captured"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| CineloreError::media("ffmpeg stderr was not captured"))?;

        let (tx, rx) = mpsc::sync_channel(1);
        std::thread::spawn(move || {
            let mut out = Vec::new();
            let mut err = Vec::new();
            let read = stdout
                .read_to_end(&mut out)
                .and_then(|_| stderr.read_to_end(&mut err));
            let _ = tx.send(read.map(|_| (out, err)));
        });

        match rx.recv_timeout(timeout) {
            Ok(read) => {
                let status = child
                    .wait()
                    .map_err(|e| CineloreError::media(format!("ffmpeg wait failed: {e}")))?;
                let (out, err) = read
                    .map_err(|e| CineloreError::media(format!("ffmpeg output read failed: {e}")))?;
                if !status.success() {
                    return Err(CineloreError::media(format!(
                        "ffmpeg video decode failed for '{}': {}",
                        self.probed.source_path.display(),
                        String::from_utf8_lossy(&err).trim()
                    )));
                }
                self.decoded = Some(frame_from_stdout(&self.probed, time_sec, out)?);
                Ok(SeekStatus::Completed)
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                reap(&mut child);
                tracing::debug!(time_sec, "ffmpeg decode timed out; killed");
                Ok(SeekStatus::TimedOut)
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                reap(&mut child);
                Err(CineloreError::media("ffmpeg decode worker exited early"))
            }
        }
    }

    fn draw_current(&mut self, surface: &mut CaptureSurface) -> CineloreResult<()> {
        let rgba8 = self
            .decoded
            .take()
            .ok_or_else(|| CineloreError::media("no decoded frame at the current position"))?;
        let src = PixelSize::new(self.probed.width, self.probed.height)?;
        surface.draw_rgba8(src, rgba8)
    }
}

/// `true` when both `ffmpeg` and `ffprobe` run.
pub fn ffmpeg_tools_available() -> bool {
    ["ffmpeg", "ffprobe"].iter().all(|tool| {
        Command::new(tool)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    })
}

#[cfg(feature = "media-ffmpeg")]
fn probe_video(source_path: &Path) -> CineloreResult<ProbedVideo> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        streams: Vec<ProbeStream>,
        format: Option<ProbeFormat>,
    }

    let out = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(source_path)
        .output()
        .map_err(|e| CineloreError::media(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(CineloreError::media(format!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| CineloreError::media(format!("ffprobe json parse failed: {e}")))?;
    let video = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| CineloreError::media("no video stream found"))?;

    let duration_sec = parsed
        .format
        .as_ref()
        .and_then(|f| f.duration.as_ref())
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0);

    tracing::debug!(
        path = %source_path.display(),
        width = video.width.unwrap_or(0),
        height = video.height.unwrap_or(0),
        duration_sec,
        "probed video"
    );

    Ok(ProbedVideo {
        source_path: source_path.to_path_buf(),
        width: video.width.unwrap_or(0),
        height: video.height.unwrap_or(0),
        duration_sec,
    })
}

#[cfg(not(feature = "media-ffmpeg"))]
fn probe_video(_source_path: &Path) -> CineloreResult<ProbedVideo> {
    Err(CineloreError::media(
        "video sources require the 'media-ffmpeg' feature",
    ))
}

fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(feature = "media-ffmpeg")]
fn spawn_frame_decode(
    program: &Path,
    source: &ProbedVideo,
    time_sec: f64,
) -> CineloreResult<Child> {
    Command::new(program)
        .args(["-v", "error", "-ss", &format!("{time_sec:.9}")])
        .arg("-i")
        .arg(&source.source_path)
        .args([
            "-an", "-frames:v", "1", "-f", "rawvideo", "-pix_fmt", "rgba", "pipe:1",
        ])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| CineloreError::media(format!("failed to run ffmpeg for video decode: {e}")))
}

#[cfg(not(feature = "media-ffmpeg"))]
fn spawn_frame_decode(
    _program: &Path,
    _source: &ProbedVideo,
    _time_sec: f64,
) -> CineloreResult<Child> {
    Err(CineloreError::media(
        "video sources require the 'media-ffmpeg' feature",
    ))
}

fn frame_from_stdout(
    source: &ProbedVideo,
    time_sec: f64,
    mut stdout: Vec<u8>,
) -> CineloreResult<Vec<u8>> {
    let expected_len = source.width as usize * source.height as usize * 4;
    if expected_len == 0 {
        return Err(CineloreError::media(
            "decoded video frame size is zero (invalid source dimensions)",
        ));
    }
    if stdout.len() < expected_len {
        return Err(CineloreError::media(format!(
            "ffmpeg returned {} bytes at {time_sec:.3}s, expected {expected_len}",
            stdout.len()
        )));
    }
    stdout.truncate(expected_len);
    Ok(stdout)
}

#[cfg(all(test, unix, feature = "media-ffmpeg"))]
#[path = "../../tests/unit/frames/ffmpeg.rs"]
mod tests;
