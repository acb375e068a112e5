use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgGroup, Parser};
use texpand::{
    AlphaMask, ExpandOpts, ExpandStatus, MaskFile, MaskSource, MissPolicy, SearchRadius,
};

/// Fill unused texture texels with the color of the nearest used texel.
#[derive(Parser, Debug)]
#[command(name = "texpand", version)]
#[command(group(ArgGroup::new("mask_source").required(true).args(["mask", "mask_alpha"])))]
struct Cli {
    /// Input texture.
    texture: PathBuf,

    /// Output image path (the mask itself with --genmask).
    #[arg(short, long, default_value = "out.png")]
    out: PathBuf,

    /// Usage mask image; 255 marks used texels.
    #[arg(long)]
    mask: Option<PathBuf>,

    /// Derive the mask from the texture's alpha channel.
    #[arg(long)]
    mask_alpha: bool,

    /// Search radius in pixels; 0 or less searches the whole texture.
    #[arg(short, long, allow_negative_numbers = true)]
    radius: Option<i32>,

    /// Write the usage mask to --out and exit.
    #[arg(long)]
    genmask: bool,

    /// Print the percentage of used texels and exit.
    #[arg(long)]
    usage: bool,

    /// Expand options JSON; flags given on the command line take precedence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Worker threads (defaults to the global rayon pool).
    #[arg(long)]
    threads: Option<usize>,

    /// Rows per scheduling block.
    #[arg(long)]
    block_rows: Option<usize>,

    /// Keep scanning a row after a texel finds no source, instead of abandoning the row.
    #[arg(long)]
    skip_misses: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let image = texpand::load_image(&cli.texture)?;
    let (width, height) = image.dimensions();

    let mask = if let Some(path) = &cli.mask {
        MaskFile::new(path).produce(width, height)?
    } else {
        AlphaMask { image: &image }.produce(width, height)?
    };

    if cli.usage {
        println!("{:.2}%", texpand::coverage_ratio(&mask) * 100.0);
        return Ok(());
    }

    if cli.genmask {
        texpand::save_mask(&cli.out, &mask)?;
        eprintln!("wrote {}", cli.out.display());
        return Ok(());
    }

    let opts = resolve_opts(&cli)?;
    let mut out = image.clone();
    let report = texpand::expand(&mut out, &image, &mask, &opts)
        .with_context(|| format!("expand '{}'", cli.texture.display()))?;

    tracing::info!(
        filled = report.pixels_filled,
        unresolved = report.pixels_unresolved,
        rows_aborted = report.rows_aborted,
        "expand finished"
    );
    if report.status == ExpandStatus::Cancelled {
        anyhow::bail!("expand was cancelled");
    }

    texpand::save_image(&cli.out, &out)?;
    eprintln!("wrote {}", cli.out.display());
    Ok(())
}

fn resolve_opts(cli: &Cli) -> anyhow::Result<ExpandOpts> {
    let mut opts = match &cli.config {
        Some(path) => ExpandOpts::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => ExpandOpts::default(),
    };
    if let Some(r) = cli.radius {
        opts.radius = SearchRadius::new(r);
    }
    if cli.threads.is_some() {
        opts.threads = cli.threads;
    }
    if let Some(n) = cli.block_rows {
        opts.block_rows = n;
    }
    if cli.skip_misses {
        opts.miss_policy = MissPolicy::SkipPixel;
    }
    Ok(opts)
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
