use std::path::{Path, PathBuf};

use anyhow::Context as _;
use bezconv::{ConvertOpts, Converter, CurveFormat, EasingTrack, PathCurve, RunReport};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "bezconv", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,

    /// Maximum log level written to stderr.
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a path curve `[anchors2D, controls2D, anchors3D, controls3D, meta]`.
    Path(ConvertArgs),
    /// Convert a standalone easing track `[anchors2D, controls2D, meta]`.
    Easing(ConvertArgs),
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input curve JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Format to convert into; the input is read as the other one.
    #[arg(long, value_enum)]
    to: FormatChoice,

    /// Output JSON path. Writes to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Converter options JSON; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print the output JSON.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Native,
    Interchange,
}

impl From<FormatChoice> for CurveFormat {
    fn from(c: FormatChoice) -> Self {
        match c {
            FormatChoice::Native => CurveFormat::Native,
            FormatChoice::Interchange => CurveFormat::Interchange,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Path(args) => cmd_path(args),
        Command::Easing(args) => cmd_easing(args),
    }
}

fn cmd_path(args: ConvertArgs) -> anyhow::Result<()> {
    let mut conv = converter(args.config.as_deref())?;
    let src = read_input(&args.in_path)?;
    let curve = PathCurve::from_json_str(&src)
        .with_context(|| format!("parse path curve '{}'", args.in_path.display()))?;

    let out = conv.convert_path(&curve, args.to.into())?;
    print_reports(&out.runs);
    write_output(args.out.as_deref(), &out.curve, args.pretty)
}

fn cmd_easing(args: ConvertArgs) -> anyhow::Result<()> {
    let mut conv = converter(args.config.as_deref())?;
    let src = read_input(&args.in_path)?;
    let track: EasingTrack = serde_json::from_str(&src)
        .with_context(|| format!("parse easing track '{}'", args.in_path.display()))?;

    let out = conv.convert_easing(&track.easing, args.to.into())?;
    print_reports(&out.runs);
    let converted = EasingTrack {
        easing: out.curve,
        meta: track.meta,
    };
    write_output(args.out.as_deref(), &converted, args.pretty)
}

fn converter(config: Option<&Path>) -> anyhow::Result<Converter> {
    let opts = match config {
        Some(p) => {
            let s = read_input(p)?;
            ConvertOpts::from_json_str(&s)
                .with_context(|| format!("parse converter options '{}'", p.display()))?
        }
        None => ConvertOpts::default(),
    };
    Ok(Converter::new(opts)?)
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read '{}'", path.display()))
}

fn print_reports(runs: &[RunReport]) {
    for r in runs {
        eprintln!(
            "run @{}: {} segment(s), {} cycle(s), rmse {:.6}{}",
            r.first_anchor,
            r.segments,
            r.cycles,
            r.rmse,
            if r.copoint { ", path kept" } else { "" }
        );
    }
}

fn write_output<T: serde::Serialize>(
    out: Option<&Path>,
    value: &T,
    pretty: bool,
) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    let Some(path) = out else {
        println!("{json}");
        return Ok(());
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, json).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
