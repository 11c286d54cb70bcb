use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context as _;
use captioner::{
    CaptionError, ClipboardKind, Color, Editor, EditorConfig, FilterId, StyleState,
    render::FrameRGBA,
};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "captioner", version, about = "Caption images and export them as PNG")]
struct Cli {
    /// Editor configuration JSON.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the preview canvas (image letterboxed into the container) as a PNG.
    Preview(PreviewArgs),
    /// Write a full-resolution `captioned-image-<ms>.png`.
    Export(ExportArgs),
    /// Put the full-resolution composite on the clipboard.
    Copy(CopyArgs),
    /// Write a 100x100 `filter-<id>.png` tile for every filter preset.
    Thumbnails(ThumbnailArgs),
    /// List filter ids with their CSS equivalents.
    Filters,
    /// Print the default style as JSON.
    Defaults,
}

impl Command {
    fn action(&self) -> &'static str {
        match self {
            Self::Preview(_) => "Preview",
            Self::Export(_) => "Export",
            Self::Copy(_) => "Copy",
            Self::Thumbnails(_) => "Thumbnails",
            Self::Filters => "Filters",
            Self::Defaults => "Defaults",
        }
    }
}

#[derive(Args, Debug)]
struct PreviewArgs {
    /// Source image path or data URL.
    #[arg(long)]
    image: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Container width (defaults to the config preview width).
    #[arg(long)]
    width: Option<f64>,

    /// Container height (defaults to the config preview height).
    #[arg(long)]
    height: Option<f64>,

    #[command(flatten)]
    style: StyleArgs,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Source image path or data URL.
    #[arg(long)]
    image: String,

    /// Directory for the exported file (defaults to the config output dir).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Resample factor (defaults to the config download scale).
    #[arg(long)]
    scale: Option<f64>,

    #[command(flatten)]
    style: StyleArgs,
}

#[derive(Args, Debug)]
struct CopyArgs {
    /// Source image path or data URL.
    #[arg(long)]
    image: String,

    /// Resample factor (defaults to the config clipboard scale).
    #[arg(long)]
    scale: Option<f64>,

    #[arg(long, value_enum, default_value_t = BackendChoice::System)]
    backend: BackendChoice,

    #[command(flatten)]
    style: StyleArgs,
}

#[derive(Args, Debug)]
struct ThumbnailArgs {
    /// Source image path or data URL.
    #[arg(long)]
    image: String,

    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    System,
    WlCopy,
}

impl From<BackendChoice> for ClipboardKind {
    fn from(value: BackendChoice) -> Self {
        match value {
            BackendChoice::System => Self::System,
            BackendChoice::WlCopy => Self::WlCopy,
        }
    }
}

/// Style overrides, applied on top of `--style` (or the defaults).
#[derive(Args, Debug)]
struct StyleArgs {
    /// Style JSON file.
    #[arg(long)]
    style: Option<PathBuf>,

    #[arg(long)]
    caption: Option<String>,

    #[arg(long)]
    text_color: Option<Color>,

    #[arg(long)]
    bg_color: Option<Color>,

    /// Background opacity in percent.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    opacity: Option<u8>,

    /// CSS font family list.
    #[arg(long)]
    font: Option<String>,

    #[arg(long)]
    font_size: Option<f32>,

    /// Outline width in pixels.
    #[arg(long)]
    stroke: Option<f32>,

    #[arg(long)]
    stroke_color: Option<Color>,

    /// Filter id; unknown ids fall back to `none`.
    #[arg(long)]
    filter: Option<String>,

    #[arg(long)]
    bold: bool,

    #[arg(long)]
    italic: bool,

    #[arg(long)]
    underline: bool,
}

impl StyleArgs {
    fn resolve(self) -> anyhow::Result<StyleState> {
        let mut style = match &self.style {
            Some(path) => StyleState::from_path(path)?,
            None => StyleState::default(),
        };
        if let Some(caption) = self.caption {
            style.set_caption_text(caption);
        }
        if let Some(c) = self.text_color {
            style.text_color = c;
        }
        if let Some(c) = self.bg_color {
            style.background_color = c;
        }
        if let Some(o) = self.opacity {
            style.set_background_opacity(o);
        }
        if let Some(font) = self.font {
            style.set_font_family(font);
        }
        if let Some(size) = self.font_size {
            style.set_font_size_px(size);
        }
        if let Some(w) = self.stroke {
            style.set_stroke_width_px(w);
        }
        if let Some(c) = self.stroke_color {
            style.stroke_color = c;
        }
        if let Some(id) = self.filter {
            style.filter = FilterId::from_id(&id);
        }
        style.bold |= self.bold;
        style.italic |= self.italic;
        style.underline |= self.underline;
        Ok(style)
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let action = cli.cmd.action();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "{action} failed");
            eprintln!("{}", user_message(&e, action));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn user_message(e: &anyhow::Error, action: &str) -> String {
    match e.downcast_ref::<CaptionError>() {
        Some(err) => err.user_message(action),
        None => format!("{action} failed. Please try again."),
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => EditorConfig::from_path(path)?,
        None => EditorConfig::default(),
    };

    match cli.cmd {
        Command::Preview(args) => cmd_preview(config, args),
        Command::Export(args) => cmd_export(config, args),
        Command::Copy(args) => cmd_copy(config, args),
        Command::Thumbnails(args) => cmd_thumbnails(config, args),
        Command::Filters => {
            for id in FilterId::ALL {
                println!("{}\t{}\t{}", id.id(), id.label(), id.css());
            }
            Ok(())
        }
        Command::Defaults => {
            println!("{}", StyleState::default().to_json_pretty()?);
            Ok(())
        }
    }
}

fn open_editor(config: EditorConfig, image: &str, style: StyleArgs) -> anyhow::Result<Editor> {
    config.validate()?;
    let style = style.resolve()?;
    let mut editor = Editor::new(config);
    editor.load_image(image)?;
    editor.set_style(style);
    Ok(editor)
}

fn cmd_preview(mut config: EditorConfig, args: PreviewArgs) -> anyhow::Result<()> {
    if let Some(w) = args.width {
        config.preview.width = w;
    }
    if let Some(h) = args.height {
        config.preview.height = h;
    }
    let mut editor = open_editor(config, &args.image, args.style)?;
    let frame = editor.preview()?;
    save_frame(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_export(mut config: EditorConfig, args: ExportArgs) -> anyhow::Result<()> {
    if let Some(scale) = args.scale {
        config.download_scale = scale;
    }
    let mut editor = open_editor(config, &args.image, args.style)?;
    let path = editor.export_to_dir(args.out_dir.as_deref())?;
    println!("{}", path.display());
    Ok(())
}

fn cmd_copy(mut config: EditorConfig, args: CopyArgs) -> anyhow::Result<()> {
    if let Some(scale) = args.scale {
        config.clipboard_scale = scale;
    }
    let mut editor = open_editor(config, &args.image, args.style)?;
    let mut sink = captioner::open_clipboard(args.backend.into())?;
    editor.copy_to_clipboard(sink.as_mut())?;
    eprintln!("copied to clipboard ({})", sink.name());
    Ok(())
}

fn cmd_thumbnails(config: EditorConfig, args: ThumbnailArgs) -> anyhow::Result<()> {
    let mut editor = Editor::new(config);
    editor.load_image(&args.image)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    for (id, tile) in editor.thumbnails()? {
        let path = args.out_dir.join(format!("filter-{}.png", id.id()));
        save_frame(&path, &tile)?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn save_frame(path: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let img = frame.to_rgba_image()?;
    image::save_buffer_with_format(
        path,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
