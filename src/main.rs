use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recolor::assets::AssetLoader;
use recolor::models::AppConfig;
use recolor::services::{ConvertReport, ConvertRequest, InvertRequest, RecolorService};

#[derive(Parser)]
#[command(name = "recolor")]
#[command(version)]
#[command(about = "Recolor colormapped images by inverting one colormap and applying another")]
struct Cli {
    /// Configuration file (defaults and extra colormaps)
    #[arg(long, global = true, env = "CONFIG_FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Recolor an image from one colormap to another
    Convert {
        /// Input PNG file
        input: PathBuf,

        /// Output PNG file
        output: PathBuf,

        /// Colormap the input was rendered with
        #[arg(long = "from")]
        source: Option<String>,

        /// Colormap to render with
        #[arg(long = "to")]
        target: Option<String>,

        #[command(flatten)]
        tuning: Tuning,

        #[command(flatten)]
        output_opts: OutputOpts,
    },
    /// Recover the value field of an image as a grayscale PNG
    Invert {
        /// Input PNG file
        input: PathBuf,

        /// Output PNG file (gray + alpha, unmatched pixels transparent)
        output: PathBuf,

        /// Colormap the input was rendered with
        #[arg(long)]
        cmap: Option<String>,

        #[command(flatten)]
        tuning: Tuning,

        #[command(flatten)]
        output_opts: OutputOpts,
    },
    /// List available colormaps
    List,
    /// Extract the embedded config.yaml for customization
    Init {
        /// Where to write the config (defaults to --config or ./config.yaml)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

/// Inversion parameters shared by convert and invert
#[derive(Args)]
struct Tuning {
    /// Lower end of the value range
    #[arg(long, requires = "vmax", allow_negative_numbers = true)]
    vmin: Option<f64>,

    /// Upper end of the value range
    #[arg(long, requires = "vmin", allow_negative_numbers = true)]
    vmax: Option<f64>,

    /// Colormap sampling tolerance (table holds round(1/xtol) samples)
    #[arg(long)]
    xtol: Option<f64>,
}

impl Tuning {
    fn value_range(&self) -> Option<(f64, f64)> {
        self.vmin.zip(self.vmax)
    }
}

/// Output options shared by convert and invert
#[derive(Args)]
struct OutputOpts {
    /// Recompress the output with oxipng
    #[arg(long, overrides_with = "no_optimize")]
    optimize: bool,

    /// Skip recompression even if the config enables it
    #[arg(long, overrides_with = "optimize")]
    no_optimize: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl OutputOpts {
    /// `None` leaves the choice to the config defaults
    fn optimize(&self) -> Option<bool> {
        match (self.optimize, self.no_optimize) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recolor=warn,cmap_invert=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let loader = AssetLoader::new(cli.config);

    match cli.command {
        Some(Commands::Convert {
            input,
            output,
            source,
            target,
            tuning,
            output_opts,
        }) => {
            let service = load_service(&loader)?;
            let request = ConvertRequest {
                source,
                target,
                value_range: tuning.value_range(),
                xtol: tuning.xtol,
                optimize: output_opts.optimize(),
            };
            let report = service.convert_file(&input, &output, &request)?;
            print_report(&report, &output, output_opts.json)
        }
        Some(Commands::Invert {
            input,
            output,
            cmap,
            tuning,
            output_opts,
        }) => {
            let service = load_service(&loader)?;
            let request = InvertRequest {
                cmap,
                value_range: tuning.value_range(),
                xtol: tuning.xtol,
                optimize: output_opts.optimize(),
            };
            let report = service.invert_file(&input, &output, &request)?;
            print_report(&report, &output, output_opts.json)
        }
        Some(Commands::List) => run_list_command(&loader),
        Some(Commands::Init { output, force }) => run_init_command(&loader, output, force),
        None => {
            run_status_command(&loader);
            Ok(())
        }
    }
}

fn load_service(loader: &AssetLoader) -> anyhow::Result<RecolorService> {
    let config = AppConfig::load_from_assets(loader);
    Ok(RecolorService::new(&config)?)
}

fn print_report(report: &ConvertReport, output: &Path, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!(
        "Wrote {} ({}x{}, {} bytes)",
        output.display(),
        report.width,
        report.height,
        report.bytes
    );
    let total = report.valid + report.masked;
    println!("  matched:   {} of {total} pixels", report.valid);
    if let Some(err) = report.mean_error {
        println!("  mean error: {err:.5}");
    }
    Ok(())
}

/// Print registered colormaps with channel count and origin
fn run_list_command(loader: &AssetLoader) -> anyhow::Result<()> {
    let config = AppConfig::load_from_assets(loader);
    let registry = config.build_registry()?;

    println!("Colormaps ({}):\n", registry.len());
    for cmap in registry.iter() {
        let kind = if cmap.channels() == 4 { "RGBA" } else { "RGB" };
        println!(
            "  {:<12} {kind:<5} {}",
            cmap.name(),
            config.origin(cmap.name())
        );
    }
    println!("\nAppend _r to any name for the reversed colormap.");
    Ok(())
}

/// Extract the embedded config to the filesystem
fn run_init_command(
    loader: &AssetLoader,
    output: Option<PathBuf>,
    force: bool,
) -> anyhow::Result<()> {
    let report = loader.init(output.as_deref(), force)?;

    for f in &report.written {
        println!("  + {f}");
    }
    if !report.skipped.is_empty() {
        println!("Skipped existing files (use --force to overwrite):");
        for f in &report.skipped {
            println!("  - {f}");
        }
    }
    Ok(())
}

/// Display status and configuration information
fn run_status_command(loader: &AssetLoader) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("recolor v{VERSION}");
    println!("Recolor colormapped images\n");

    println!("Configuration:");
    println!("  Config:    {}", loader.config_source());

    let config = AppConfig::load_from_assets(loader);
    println!(
        "  Defaults:  {} -> {}, value range [{}, {}], xtol {}",
        config.defaults.source,
        config.defaults.target,
        config.defaults.value_range.0,
        config.defaults.value_range.1,
        config.defaults.xtol
    );
    match config.build_registry() {
        Ok(registry) => println!(
            "  Colormaps: {} ({} from config)",
            registry.len(),
            config.colormaps.len()
        ),
        Err(e) => println!("  Colormaps: error: {e}"),
    }

    println!("\nCommands:");
    println!("  recolor convert   Recolor an image to another colormap");
    println!("  recolor invert    Export the recovered value field");
    println!("  recolor list      List available colormaps");
    println!("  recolor init      Extract the embedded config.yaml");
    println!("\nRun 'recolor --help' for more details.");
}
