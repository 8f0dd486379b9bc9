use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use gridcipher::grid;
use gridcipher::{Codec, CodecConfig, ColorPolicy};

mod png_io;

/// Hide encrypted text in black/grey tile grid images
#[derive(Parser)]
#[command(name = "gridcipher", version)]
struct Cli {
    /// TOML file with codec settings (max_budget, scan_rows, color_policy)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only print results and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

/// Decoder settings shared by `decode` and `inspect`.
#[derive(clap::Args)]
struct ScanArgs {
    /// Scan only this many leading pixel rows for tile edges (5 = classic decoder)
    #[arg(long)]
    scan_rows: Option<u32>,
    /// Fail on tiles that are not black, grey or white
    #[arg(long)]
    strict: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Encrypt a message and render it as a PNG grid
    Encode {
        /// Message to hide
        #[arg(short, long)]
        message: String,
        /// Passphrase
        #[arg(short, long)]
        key: String,
        /// Maximum image edge length in pixels
        #[arg(long)]
        max_size: Option<u32>,
        /// Output file (".png" is appended unless already present)
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Read a grid image and decrypt its message
    Decode {
        /// Grid image (PNG)
        image: PathBuf,
        /// Passphrase
        #[arg(short, long)]
        key: String,
        #[command(flatten)]
        scan: ScanArgs,
    },
    /// Show the recovered grid layout without decrypting
    Inspect {
        /// Grid image (PNG)
        image: PathBuf,
        #[command(flatten)]
        scan: ScanArgs,
        /// Print JSON
        #[arg(long)]
        json: bool,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Serialize)]
struct InspectOutput {
    file: String,
    image_width: u32,
    image_height: u32,
    tile_size: u32,
    dimension: u32,
    data_bits: usize,
    payload_bytes: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Encode {
            message,
            key,
            max_size,
            output,
        } => cmd_encode(config, &message, &key, max_size, &output, cli.quiet),
        Command::Decode { image, key, scan } => cmd_decode(scan.apply(config), &image, &key),
        Command::Inspect {
            image,
            scan,
            json,
            pretty,
        } => cmd_inspect(&scan.apply(config), &image, json, pretty),
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Load codec settings from a TOML file, or use the defaults.
fn load_config(path: Option<&Path>) -> Result<CodecConfig> {
    let Some(path) = path else {
        return Ok(CodecConfig::default());
    };
    let toml_str =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config = CodecConfig::from_toml_str(&toml_str)
        .with_context(|| format!("parsing config from {}", path.display()))?;
    log::info!("loaded config from {}: {:?}", path.display(), config);
    Ok(config)
}

impl ScanArgs {
    fn apply(&self, mut config: CodecConfig) -> CodecConfig {
        if self.scan_rows.is_some() {
            config.scan_rows = self.scan_rows;
        }
        if self.strict {
            config.color_policy = ColorPolicy::Strict;
        }
        config
    }
}

fn cmd_encode(
    mut config: CodecConfig,
    message: &str,
    key: &str,
    max_size: Option<u32>,
    output: &Path,
    quiet: bool,
) -> Result<()> {
    if let Some(max_size) = max_size {
        config.max_budget = max_size;
    }
    anyhow::ensure!(config.max_budget > 0, "--max-size must be at least 1");

    let encoded = Codec::with_passphrase(key, config)
        .encode(message)
        .context("encoding message")?;

    let path = png_io::with_png_extension(output);
    png_io::write_grid_png(&encoded.image, &path)?;

    if !quiet {
        let layout = &encoded.layout;
        eprintln!(
            "{} bits in a {}x{} grid of {}px tiles ({}x{} image)",
            layout.bit_count,
            layout.dimension,
            layout.dimension,
            layout.tile_size,
            encoded.image.width,
            encoded.image.height
        );
    }
    println!("wrote {}", path.display());
    Ok(())
}

fn cmd_decode(config: CodecConfig, image_path: &Path, key: &str) -> Result<()> {
    let img = png_io::load_image(image_path)?;
    log::info!("decoding {} ({}x{})", image_path.display(), img.width, img.height);

    let message = Codec::with_passphrase(key, config)
        .decode(&img)
        .map_err(|e| {
            let hint = if e.is_key_error() {
                "decryption failed; check the passphrase"
            } else {
                "not a valid grid image"
            };
            anyhow::Error::new(e).context(format!("{}: {hint}", image_path.display()))
        })?;

    println!("{message}");
    Ok(())
}

fn cmd_inspect(config: &CodecConfig, image_path: &Path, json: bool, pretty: bool) -> Result<()> {
    let img = png_io::load_image(image_path)?;
    let scan = grid::scan_grid(&img, config)
        .with_context(|| format!("scanning {}", image_path.display()))?;

    let output = InspectOutput {
        file: image_path.display().to_string(),
        image_width: img.width,
        image_height: img.height,
        tile_size: scan.tile_size,
        dimension: scan.dimension,
        data_bits: scan.bits.len(),
        payload_bytes: scan.bits.len() / 8,
    };

    if json || pretty {
        let json = if pretty {
            serde_json::to_string_pretty(&output)?
        } else {
            serde_json::to_string(&output)?
        };
        println!("{json}");
        return Ok(());
    }

    println!("File:          {}", output.file);
    println!("Image size:    {}x{}", output.image_width, output.image_height);
    println!("Tile size:     {}px", output.tile_size);
    println!("Grid size:     {}x{}", output.dimension, output.dimension);
    println!("Data bits:     {}", output.data_bits);
    println!("Payload bytes: {}", output.payload_bytes);
    Ok(())
}
