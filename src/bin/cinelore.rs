use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

use cinelore::{
    CameraEngine, CameraInput, CanvasSurface, ExperienceConfig, ExtractionPhase, FfmpegEncoder,
    FfmpegVideoSource, FrameExtractor, ManualScheduler, MapData, MapGeometry, PreviewConfig,
    SceneDeck, ScrollScript, ScrollSignal, ScrubController, Viewport, preload_assets,
    scene_tweens,
};

#[derive(Parser, Debug)]
#[command(name = "cinelore", version)]
struct Cli {
    /// Experience config JSON (defaults apply when omitted).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract frames from a video and write them as PNGs (requires `ffmpeg`).
    Extract(ExtractArgs),
    /// Replay scroll input over a video and encode the painted canvas to MP4 (requires `ffmpeg`).
    Scrub(ScrubArgs),
    /// Replay camera input over a map and print the transform after each event.
    Camera(CameraArgs),
    /// Validate a scene deck and print its tween plan as JSON.
    Scenes(ScenesArgs),
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// Input video.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory for `frame_NNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct ScrubArgs {
    /// Input video.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Scroll script JSON (`[{"tick": N, "scroll_top": Y}, ...]`); a linear sweep otherwise.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Viewport height the scroll region is resolved against.
    #[arg(long, default_value_t = 900.0)]
    viewport_height: f64,

    /// Display refresh rate.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Refreshes for the default sweep.
    #[arg(long, default_value_t = 240)]
    sweep_ticks: u64,

    /// Extra refreshes after the last scroll input so the cursor can settle.
    #[arg(long, default_value_t = 60)]
    settle_ticks: u64,
}

#[derive(Parser, Debug)]
struct CameraArgs {
    /// Map data JSON.
    #[arg(long)]
    map: PathBuf,

    /// Camera input JSON (array of tagged events).
    #[arg(long)]
    inputs: PathBuf,

    /// Viewport width.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height.
    #[arg(long, default_value_t = 720.0)]
    height: f64,
}

#[derive(Parser, Debug)]
struct ScenesArgs {
    /// Scene deck JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory scene image URLs resolve against; images are preloaded when set.
    #[arg(long)]
    assets_root: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("CINELORE_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Extract(args) => cmd_extract(&config, args),
        Command::Scrub(args) => cmd_scrub(&config, args),
        Command::Camera(args) => cmd_camera(&config, args),
        Command::Scenes(args) => cmd_scenes(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ExperienceConfig> {
    let Some(path) = path else {
        return Ok(ExperienceConfig::default());
    };
    Ok(ExperienceConfig::from_path(path)?)
}

fn cmd_extract(config: &ExperienceConfig, args: ExtractArgs) -> anyhow::Result<()> {
    let source = FfmpegVideoSource::open(&args.in_path)?;
    let mut extractor = FrameExtractor::new(source, config.scrub.extractor_opts()?)?;
    let state = extractor.run();
    anyhow::ensure!(
        state.phase == ExtractionPhase::Ready,
        "extraction stopped at frame {} ({:.0}%)",
        state.current_index,
        state.progress_percent
    );
    let store = extractor
        .ready_store()
        .context("extraction finished without a frame store")?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    for frame in store.frames() {
        let out = args
            .out_dir
            .join(format!("frame_{:04}.png", frame.index().0));
        let img = frame.to_image().context("frame buffer does not match its size")?;
        img.save_with_format(&out, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", out.display()))?;
    }

    eprintln!(
        "wrote {} frames to {}",
        store.len(),
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_scrub(config: &ExperienceConfig, args: ScrubArgs) -> anyhow::Result<()> {
    let total_frames = config.scrub.total_frames;
    let mapper = config.scroll.mapper(args.viewport_height, total_frames)?;
    let script = match &args.script {
        Some(path) => ScrollScript::from_path(path)?,
        None => ScrollScript::sweep(
            0.0,
            mapper.scroll_start() + mapper.scroll_range(),
            args.sweep_ticks,
        ),
    };

    let source = FfmpegVideoSource::open(&args.in_path)?;
    let mut controller = ScrubController::new(
        source,
        ManualScheduler::new(),
        mapper,
        config.scrub.scrub_opts()?,
    )?;
    let mut canvas = CanvasSurface::new();

    controller.mount();
    let state = controller.run_extraction(&mut canvas)?;
    anyhow::ensure!(
        state.phase == ExtractionPhase::Ready,
        "extraction stopped at frame {} ({:.0}%)",
        state.current_index,
        state.progress_percent
    );

    let mut encoder: Option<FfmpegEncoder> = None;
    let ticks = script.duration_ticks() + args.settle_ticks;
    for tick in 0..ticks {
        if let Some(offset) = script.offset_at(tick) {
            controller.on_scroll(ScrollSignal::at(offset));
        }
        for id in controller.scheduler_mut().fire() {
            controller.tick(id, &mut canvas);
        }
        let Some(frame) = canvas.current() else {
            continue;
        };
        if encoder.is_none() {
            let cfg = PreviewConfig::mp4(&args.out, frame.size(), args.fps);
            encoder = Some(FfmpegEncoder::new(cfg, [0, 0, 0])?);
        }
        if let Some(enc) = encoder.as_mut() {
            enc.encode_frame(frame)?;
        }
    }
    controller.unmount();

    let encoder = encoder.context("nothing was painted")?;
    let out = encoder.finish()?;
    eprintln!(
        "wrote {} ({ticks} refreshes, {} paints)",
        out.display(),
        canvas.paints()
    );
    Ok(())
}

fn read_inputs(path: &Path) -> anyhow::Result<Vec<CameraInput>> {
    let f = File::open(path).with_context(|| format!("open camera inputs '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(f)).context("parse camera inputs JSON")
}

fn cmd_camera(config: &ExperienceConfig, args: CameraArgs) -> anyhow::Result<()> {
    let map = MapData::from_path(&args.map)?;
    let inputs = read_inputs(&args.inputs)?;
    let geometry = MapGeometry::new(map.size, Viewport::new(args.width, args.height));
    let mut camera = CameraEngine::new(config.camera, geometry)?;

    let mut stdout = std::io::stdout().lock();
    for (i, input) in inputs.iter().enumerate() {
        let transform = camera.handle(input);
        let line = serde_json::json!({
            "event": i,
            "phase": camera.phase(),
            "transform": transform,
            "css": camera.css_transform(),
        });
        writeln!(stdout, "{line}")?;
    }
    Ok(())
}

fn cmd_scenes(args: ScenesArgs) -> anyhow::Result<()> {
    let deck = SceneDeck::from_path(&args.in_path)?;

    if let Some(root) = &args.assets_root {
        let urls = deck.asset_urls();
        let report = preload_assets(root, &urls[..]);
        eprintln!(
            "preloaded {}/{} assets ({} skipped, {} failed)",
            report.loaded.len(),
            report.total(),
            report.skipped.len(),
            report.failed.len()
        );
    }

    let plan: Vec<_> = deck
        .scenes()
        .iter()
        .map(|scene| {
            serde_json::json!({
                "id": scene.id(),
                "type": scene.kind(),
                "tweens": scene_tweens(scene),
            })
        })
        .collect();
    let out = serde_json::json!({
        "hero_video": deck.hero_video(),
        "scenes": plan,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
