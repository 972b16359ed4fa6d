use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use pagecraft::{
    Anchor, AspectRatio, BatchSummary, Document, EngineConfig, FitMode, ImportAsset,
    InMemoryRuntime, LayoutPreset, PageLayoutSettings, PageRange, WatermarkSettings,
};

#[derive(Parser, Debug)]
#[command(name = "pagecraft", version)]
struct Cli {
    /// Log engine activity to stderr at debug level.
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    /// Engine config JSON.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the pages of a document as JSON.
    Pages(PagesArgs),
    /// Fit every container to its frame.
    Fit(FitArgs),
    /// Stamp a watermark image onto pages.
    Watermark(WatermarkArgs),
    /// Change page dimensions.
    Layout(LayoutArgs),
    /// Reduce the document to one empty page.
    Reset(DocArgs),
    /// Add one page per image file.
    Import(ImportArgs),
}

#[derive(Args, Debug)]
struct DocArgs {
    /// Input document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output document JSON. Defaults to overwriting the input.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Disable the host's preferred resize primitive.
    #[arg(long, default_value_t = false)]
    no_preferred_resize: bool,
}

#[derive(Args, Debug)]
struct PagesArgs {
    /// Input document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Pages to list, e.g. `2-5` or `3`.
    #[arg(long)]
    range: Option<PageRange>,
}

#[derive(Args, Debug)]
struct FitArgs {
    #[command(flatten)]
    doc: DocArgs,

    /// `contain` or `fill`. Defaults to the configured fit mode.
    #[arg(long)]
    mode: Option<FitMode>,

    /// Pages to fit, e.g. `2-5`.
    #[arg(long)]
    range: Option<PageRange>,
}

#[derive(Args, Debug)]
struct WatermarkArgs {
    #[command(flatten)]
    doc: DocArgs,

    /// Watermark image file.
    #[arg(long)]
    image: PathBuf,

    /// Opacity in [0, 1].
    #[arg(long, default_value_t = 0.5)]
    opacity: f64,

    /// Scale applied to the image's natural size.
    #[arg(long, default_value_t = 0.3)]
    scale: f64,

    /// top-left, top-right, bottom-left, bottom-right or center.
    #[arg(long, default_value = "bottom-right")]
    anchor: Anchor,

    /// Inset from the frame edges. Defaults to the configured margin.
    #[arg(long)]
    margin: Option<f64>,

    /// Pages to stamp.
    #[arg(long)]
    range: Option<PageRange>,
}

#[derive(Args, Debug)]
struct LayoutArgs {
    #[command(flatten)]
    doc: DocArgs,

    /// Named format: `instagram` or `facebook`.
    #[arg(long, conflicts_with_all = ["aspect", "height"])]
    preset: Option<LayoutPreset>,

    /// Aspect ratio `1:1`, `9:16` or `16:9`; needs `--width`.
    #[arg(long, requires = "width", conflicts_with = "height")]
    aspect: Option<AspectRatio>,

    /// Page width.
    #[arg(long)]
    width: Option<f64>,

    /// Page height.
    #[arg(long)]
    height: Option<f64>,

    /// Pages to resize.
    #[arg(long)]
    range: Option<PageRange>,
}

#[derive(Args, Debug)]
struct ImportArgs {
    #[command(flatten)]
    doc: DocArgs,

    /// Image files, one new page each.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };

    match cli.cmd {
        Command::Pages(args) => cmd_pages(args),
        Command::Fit(args) => cmd_fit(args, &config),
        Command::Watermark(args) => cmd_watermark(args, &config),
        Command::Layout(args) => cmd_layout(args),
        Command::Reset(args) => cmd_reset(args),
        Command::Import(args) => cmd_import(args, &config),
    }
}

fn cmd_pages(args: PagesArgs) -> anyhow::Result<()> {
    let runtime = InMemoryRuntime::new(Document::from_path(&args.in_path)?);
    let pages = pagecraft::list_pages(&runtime, args.range)?;
    print_json(&pages)
}

fn cmd_fit(args: FitArgs, config: &EngineConfig) -> anyhow::Result<()> {
    let mut runtime = open(&args.doc)?;
    let mode = args.mode.unwrap_or(config.default_fit_mode);
    let summary = pagecraft::fit_to_frame(&mut runtime, mode, args.range)?;
    finish(&args.doc, runtime, &summary)
}

fn cmd_watermark(args: WatermarkArgs, config: &EngineConfig) -> anyhow::Result<()> {
    let mut runtime = open(&args.doc)?;
    let image = std::fs::read(&args.image)
        .with_context(|| format!("read watermark image '{}'", args.image.display()))?;
    let settings = WatermarkSettings {
        opacity: args.opacity,
        scale: args.scale,
        anchor: args.anchor,
        margin: args.margin.unwrap_or(config.watermark_margin),
        ..WatermarkSettings::new(image)
    };
    let summary = pagecraft::inject_watermark(&mut runtime, &settings, args.range)?;
    finish(&args.doc, runtime, &summary)
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let settings = match (args.preset, args.aspect, args.width, args.height) {
        (Some(preset), _, _, _) => PageLayoutSettings::from_preset(preset),
        (None, Some(aspect), Some(width), _) => PageLayoutSettings::from_aspect(aspect, width)?,
        (None, None, Some(width), Some(height)) => PageLayoutSettings::new(width, height),
        _ => anyhow::bail!(
            "layout needs --preset, --aspect with --width, or --width with --height"
        ),
    };
    let mut runtime = open(&args.doc)?;
    let summary = pagecraft::resize_page_layout(&mut runtime, settings, args.range)?;
    finish(&args.doc, runtime, &summary)
}

fn cmd_reset(args: DocArgs) -> anyhow::Result<()> {
    let mut runtime = open(&args)?;
    let summary = pagecraft::reset_document(&mut runtime)?;
    finish(&args, runtime, &summary)
}

fn cmd_import(args: ImportArgs, config: &EngineConfig) -> anyhow::Result<()> {
    let mut runtime = open(&args.doc)?;
    let assets = args
        .files
        .iter()
        .map(|path| {
            let bytes =
                std::fs::read(path).with_context(|| format!("read asset '{}'", path.display()))?;
            Ok(ImportAsset::new(asset_name(path), bytes))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let summary = pagecraft::bulk_import(&mut runtime, &assets, config)?;
    finish(&args.doc, runtime, &summary)
}

fn open(args: &DocArgs) -> anyhow::Result<InMemoryRuntime> {
    let doc = Document::from_path(&args.in_path)?;
    Ok(InMemoryRuntime::new(doc).with_preferred_resize(!args.no_preferred_resize))
}

fn finish(
    args: &DocArgs,
    runtime: InMemoryRuntime,
    summary: &BatchSummary,
) -> anyhow::Result<()> {
    let out = args.out.as_deref().unwrap_or(&args.in_path);
    write_document(out, &runtime.into_document())?;
    print_json(summary)
}

fn write_document(path: &Path, doc: &Document) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, doc)
        .with_context(|| format!("write document '{}'", path.display()))?;
    w.flush()
        .with_context(|| format!("flush document '{}'", path.display()))?;
    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    serde_json::to_writer_pretty(&mut lock, value).context("write JSON to stdout")?;
    writeln!(lock).context("write JSON to stdout")?;
    Ok(())
}

fn asset_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
