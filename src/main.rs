//! Standalone viewer: drive a transform with the gesture controls and log
//! every change.

use std::path::PathBuf;

use clap::Parser;
use grip::controls::AxisConventions;
use grip::options::Options;
use grip::viewer::Viewer;

/// Drive a 3D transform with pointer, wheel, touch and keyboard gestures.
#[derive(Debug, Parser)]
#[command(name = "grip", version, about, long_about = None)]
struct Args {
    /// Use orbit-style conventions instead of object controls.
    #[arg(long)]
    orbit: bool,
    /// Load options from a TOML preset.
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,
    /// Write the effective options as TOML and exit.
    #[arg(long, value_name = "FILE")]
    write_options: Option<PathBuf>,
    /// Write the options JSON schema and exit.
    #[arg(long, value_name = "FILE")]
    write_schema: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let options = match &args.options {
        Some(path) => match Options::load(path) {
            Ok(options) => options,
            Err(e) => {
                log::error!("failed to load {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    if let Some(path) = &args.write_schema {
        let written = Options::schema_json()
            .and_then(|json| std::fs::write(path, json).map_err(Into::into));
        if let Err(e) = written {
            log::error!("failed to write {}: {e}", path.display());
            std::process::exit(1);
        }
        log::info!("wrote options schema to {}", path.display());
        return;
    }

    if let Some(path) = &args.write_options {
        if let Err(e) = options.save(path) {
            log::error!("failed to write {}: {e}", path.display());
            std::process::exit(1);
        }
        log::info!("wrote options to {}", path.display());
        return;
    }

    let conventions = if args.orbit {
        AxisConventions::ORBIT
    } else {
        AxisConventions::OBJECT
    };

    let result = Viewer::builder()
        .with_options(options)
        .with_conventions(conventions)
        .build()
        .run();
    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
