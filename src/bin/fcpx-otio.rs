use std::{
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "fcpx-otio", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert an FCPXML file into timeline JSON.
    Decode(DecodeArgs),
    /// Convert timeline JSON into an FCPXML file.
    Encode(EncodeArgs),
}

#[derive(Parser, Debug)]
struct DecodeArgs {
    /// Input FCPXML.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output timeline JSON path.
    #[arg(long)]
    out: PathBuf,

    /// Rate applied to bare-number time attributes.
    #[arg(long, default_value_t = fcpx_otio::rational::DEFAULT_RATE)]
    default_rate: f64,
}

#[derive(Parser, Debug)]
struct EncodeArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output FCPXML path.
    #[arg(long)]
    out: PathBuf,

    /// Spaces per nesting level (0 writes a single line).
    #[arg(long, default_value_t = fcpx_otio::document::io::DEFAULT_INDENT)]
    indent: usize,

    /// `ref` written for stacks without a recorded reference id.
    #[arg(long, default_value = fcpx_otio::convert::DEFAULT_REF_ID)]
    default_ref: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Decode(args) => cmd_decode(args),
        Command::Encode(args) => cmd_encode(args),
    }
}

fn create_output(path: &Path) -> anyhow::Result<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    Ok(BufWriter::new(f))
}

fn cmd_decode(args: DecodeArgs) -> anyhow::Result<()> {
    let f = File::open(&args.in_path)
        .with_context(|| format!("open FCPXML '{}'", args.in_path.display()))?;
    let doc = fcpx_otio::document::io::read_document(BufReader::new(f))?;

    let decoder = fcpx_otio::Decoder::new(fcpx_otio::DecodeOpts {
        codec: fcpx_otio::TimeCodec::with_default_rate(args.default_rate),
    });
    let timeline = decoder
        .decode(&doc)
        .with_context(|| format!("decode '{}'", args.in_path.display()))?;

    let mut w = create_output(&args.out)?;
    timeline.to_writer(&mut w)?;
    w.flush()
        .with_context(|| format!("write timeline JSON '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} clips)",
        args.out.display(),
        timeline.find_clips().len()
    );
    Ok(())
}

fn cmd_encode(args: EncodeArgs) -> anyhow::Result<()> {
    let timeline = fcpx_otio::Timeline::from_path(&args.in_path)?;

    let encoder = fcpx_otio::Encoder::new(fcpx_otio::EncodeOpts {
        indent: args.indent,
        default_ref: args.default_ref,
        ..fcpx_otio::EncodeOpts::default()
    });
    let w = create_output(&args.out)?;
    encoder
        .write_timeline(w, &timeline)
        .with_context(|| format!("encode '{}'", args.in_path.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
