//! Command-line shell for the noise bitmap generator.
//!
//! Everything here is a thin wrapper: parameters come from flags or an
//! optional JSON file, the noise stack and encoder live in the library
//! crates, and the only outputs are one bitmap file or an ASCII preview.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use noisegen_core::bitmap::BitmapEncoder;
use noisegen_core::field::render_field;
use noisegen_utils::noise::{FractalNoise, LatticeMode, PermutationTable, PerlinNoise};
use noisegen_utils::random::Xoroshiro;

/// Render fractal Perlin noise into an uncompressed 24-bit bitmap.
#[derive(Debug, Parser)]
#[command(name = "noisegen", version, about)]
struct Args {
    /// Image width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Number of noise octaves.
    #[arg(long)]
    octaves: Option<u32>,

    /// Seed for the permutation shuffle; defaults to wall-clock time.
    #[arg(long)]
    seed: Option<u64>,

    /// Output file path.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// JSON parameter file; command-line flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Derive the Z lattice coordinate from y, reproducing the original
    /// generator's output bytes.
    #[arg(long)]
    legacy_lattice: bool,

    /// Skip row padding and bottom-up row order, reproducing the original
    /// generator's output bytes.
    #[arg(long)]
    compat_format: bool,

    /// Print an ASCII preview to stdout instead of writing a file.
    #[arg(long)]
    preview: bool,
}

/// Render parameters, loadable from a JSON file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Params {
    width: u32,
    height: u32,
    octaves: u32,
    seed: Option<u64>,
    output: PathBuf,
    legacy_lattice: bool,
    compat_format: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            octaves: 12,
            seed: None,
            output: PathBuf::from("noise.bmp"),
            legacy_lattice: false,
            compat_format: false,
        }
    }
}

impl Params {
    /// Overlay explicit command-line values on top of these parameters.
    fn apply_args(mut self, args: &Args) -> Self {
        if let Some(width) = args.width {
            self.width = width;
        }
        if let Some(height) = args.height {
            self.height = height;
        }
        if let Some(octaves) = args.octaves {
            self.octaves = octaves;
        }
        if let Some(seed) = args.seed {
            self.seed = Some(seed);
        }
        if let Some(output) = &args.output {
            self.output = output.clone();
        }
        self.legacy_lattice |= args.legacy_lattice;
        self.compat_format |= args.compat_format;
        self
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let params = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            serde_json::from_str::<Params>(&text)
                .with_context(|| format!("parsing config file {}", path.display()))?
        }
        None => Params::default(),
    };
    let params = params.apply_args(&args);

    let seed = params.seed.unwrap_or_else(seed_from_time);
    tracing::info!(
        seed,
        width = params.width,
        height = params.height,
        octaves = params.octaves,
        "generating noise field"
    );

    let mode = if params.legacy_lattice {
        LatticeMode::LegacyZFromY
    } else {
        LatticeMode::Standard
    };
    let mut rng = Xoroshiro::from_seed(seed);
    let noise = PerlinNoise::new(PermutationTable::new(&mut rng), mode);
    let noise = FractalNoise::new(noise, params.octaves)?;

    if args.preview {
        print_preview(&noise, params.width, params.height);
        return Ok(());
    }

    let buffer = render_field(&noise, params.width, params.height)?;
    BitmapEncoder::new(!params.compat_format)
        .write_file(&params.output, &buffer)
        .with_context(|| format!("writing {}", params.output.display()))?;
    tracing::info!(path = %params.output.display(), "bitmap written");

    Ok(())
}

/// Seed drawn from the wall clock, for runs without an explicit seed.
fn seed_from_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/// Luminance ramp from dark to bright.
const PREVIEW_RAMP: &[u8] = b" .:-=+*#%@";

/// Print one ASCII luminance character per grid cell.
///
/// Samples the fractal stack directly rather than going through the field
/// sampler; this is a debug view, not the artifact path.
fn print_preview(noise: &FractalNoise, width: u32, height: u32) {
    let top = (PREVIEW_RAMP.len() - 1) as f64;
    for y in 0..height {
        let ny = f64::from(y) / f64::from(height.max(1));
        let mut line = String::with_capacity(width as usize);
        for x in 0..width {
            let nx = f64::from(x) / f64::from(width.max(1));
            let value = noise.sample(nx, ny, 0.0);
            let index = ((value + 1.0) / 2.0 * top).round().clamp(0.0, top) as usize;
            line.push(PREVIEW_RAMP[index] as char);
        }
        println!("{line}");
    }
}
