use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use image::{DynamicImage, ImageReader};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

use skywatch::core::insights;
use skywatch::core::{FleetGenerator, Session, UserDirectory, ports};
use skywatch::logging::{Verbosity, init_logging};
use skywatch::sources::SatelliteClient;
use skywatch::{Config, Dashboard, ShipDetector, annotate, imagery, render_summary};

#[derive(Parser)]
#[command(name = "skywatch")]
#[command(about = "Maritime port monitoring: fleet, weather, economics and ship detection")]
struct Cli {
    /// Configuration file (defaults to ./skywatch.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// More output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Errors only
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and print one dashboard refresh
    Dashboard {
        #[arg(long)]
        user: String,

        #[arg(long)]
        password: String,

        /// Port to show instead of the configured default
        #[arg(long)]
        port: Option<String>,

        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a generated fleet as JSON
    Fleet {
        #[arg(long)]
        port: Option<String>,

        /// Use the named-vessel roster instead of the public AIS list
        #[arg(long)]
        roster: bool,
    },

    /// Detect ships in an image
    Detect {
        #[arg(value_name = "IMAGE")]
        image_path: PathBuf,

        /// Write a copy with bounding boxes drawn
        #[arg(long, value_name = "OUT")]
        annotate: Option<PathBuf>,

        /// Save every intermediate step to this directory (must be empty)
        #[arg(long, value_name = "DIR")]
        debug_out: Option<PathBuf>,
    },

    /// Write a synthetic test scene
    Synthesize {
        #[arg(value_name = "OUT")]
        output: PathBuf,

        #[arg(long, value_enum, default_value_t = Scene::Harbor)]
        scene: Scene,
    },

    /// Download the harbour satellite snapshot, synthesizing one on failure
    FetchImagery {
        #[arg(value_name = "OUT")]
        output: PathBuf,
    },

    /// List known ports
    Ports,
}

#[derive(Clone, Copy, ValueEnum)]
enum Scene {
    Harbor,
    Port,
    Landmass,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(Verbosity::from_flags(args.verbose, args.quiet));

    let config = Config::load(args.config.as_deref())?;

    match args.command {
        Command::Dashboard {
            user,
            password,
            port,
            json,
        } => {
            let mut session = Session::new();
            session.login(&UserDirectory::builtin(), &user, &password)?;
            session.select_port(port.as_deref().unwrap_or(&config.port.default_port))?;

            let dashboard = Dashboard::new(&config)?;
            let snapshot = dashboard.refresh(&session).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print!("{}", render_summary(&snapshot));
            }
        }

        Command::Fleet { port, roster } => {
            let name = port.unwrap_or_else(|| config.port.default_port.clone());
            let port = ports::find_port(&name)
                .ok_or_else(|| anyhow::anyhow!("Unknown port: {}", name))?;

            let mut fleet = FleetGenerator::new(StdRng::from_entropy(), OffsetDateTime::now_utc());
            let ships = if roster {
                fleet.named_roster(port)
            } else {
                fleet.public_fleet(port, config.fleet.simulated_count)
            };
            println!("{}", serde_json::to_string_pretty(&ships)?);
        }

        Command::Detect {
            image_path,
            annotate: annotate_out,
            debug_out,
        } => {
            tracing::info!(path = %image_path.display(), "Loading image");
            let img = ImageReader::open(&image_path)
                .with_context(|| format!("Failed to open {}", image_path.display()))?
                .decode()
                .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;

            let mut detector = ShipDetector::from_config(&config.detection);
            if let Some(dir) = debug_out {
                detector = detector.with_debug(dir);
            }
            let detections = detector.detect(&img)?;

            println!("=== Ship Detection Results ===");
            println!("Image: {}x{}", img.width(), img.height());
            println!("Ships detected: {}", detections.len());
            for d in &detections {
                println!(
                    "  {} at ({}, {}) {}x{} - area {}px, elongation {:.1}",
                    d.label(),
                    d.x,
                    d.y,
                    d.width,
                    d.height,
                    d.area,
                    d.elongation
                );
            }

            let report = insights::analyze(std::iter::repeat_n("Unclassified", detections.len()));
            println!(
                "Port congestion: {:?}   Estimated cargo value: ${}",
                report.port_congestion, report.estimated_value_usd
            );

            if let Some(out) = annotate_out {
                save_image(&DynamicImage::ImageRgb8(annotate(&img, &detections)), &out)?;
            }
        }

        Command::Synthesize { output, scene } => {
            let img = match scene {
                Scene::Harbor => imagery::harbor_scene(),
                Scene::Port => imagery::port_scene().0,
                Scene::Landmass => imagery::landmass_scene(1000),
            };
            save_image(&DynamicImage::ImageRgb8(img), &output)?;
        }

        Command::FetchImagery { output } => {
            let client = SatelliteClient::new(&config.sources)?;
            let (img, source) = client.fetch_or_synthesize().await;
            tracing::info!(source = source.label(), "Imagery ready");
            save_image(&img, &output)?;
        }

        Command::Ports => {
            for port in ports::all_ports() {
                println!(
                    "{:<22} {:>8.2} {:>9.2}  {:<12} {:<14} {:?}",
                    port.name,
                    port.latitude,
                    port.longitude,
                    port.country,
                    port.region,
                    port.traffic
                );
            }
        }
    }

    Ok(())
}

fn save_image(img: &DynamicImage, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    img.save(path)
        .with_context(|| format!("Failed to save {}", path.display()))?;
    println!("Saved {}", path.display());
    Ok(())
}
