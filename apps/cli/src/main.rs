// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! svg-extrude - turn flat SVG shapes into solid meshes.
//!
//! # Commands
//!
//! - `check <INPUT>` - validate a document and list what it contains
//! - `parse <INPUT>` - print the parsed shapes as JSON
//! - `generate <INPUT>` - extrude every shape and write the meshes
//!
//! `INPUT` may be `-` to read markup from stdin.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use svg_extrude_core::parse_document;
use svg_extrude_geometry::ExtrusionDepth;
use svg_extrude_processing::process_svg;
use tracing_subscriber::EnvFilter;

mod config;
mod output;

use config::{Config, OutputFormat, Shading};
use output::{JsonSink, ObjSink};

#[derive(Parser)]
#[command(name = "svg-extrude", version)]
#[command(about = "Extrude SVG rectangles, circles and polygons into 3D meshes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a document and report its supported shapes
    Check {
        /// SVG file, or `-` for stdin
        input: PathBuf,
    },
    /// Print the parsed shapes as JSON
    Parse {
        /// SVG file, or `-` for stdin
        input: PathBuf,
    },
    /// Extrude every shape and write the meshes
    Generate {
        /// SVG file, or `-` for stdin
        input: PathBuf,
        /// Extrusion depth (clamped to 0..=250; default from SVG_EXTRUDE_DEPTH or 10)
        #[arg(short, long, allow_negative_numbers = true)]
        depth: Option<f64>,
        /// Output format (default from SVG_EXTRUDE_FORMAT or json)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
        /// Normal shading (default from SVG_EXTRUDE_SHADING or flat)
        #[arg(short, long, value_enum)]
        shading: Option<Shading>,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Commands::Check { input } => check(&input),
        Commands::Parse { input } => parse(&input),
        Commands::Generate {
            input,
            depth,
            format,
            shading,
            output,
        } => {
            let depth = depth.map(ExtrusionDepth::new).unwrap_or(config.depth);
            let format = format.unwrap_or(config.format);
            let shading = shading.unwrap_or(config.shading);
            generate(&input, depth, format, shading, output.as_deref())
        }
    }
}

fn read_input(input: &Path) -> Result<String> {
    if input.as_os_str() == "-" {
        let mut markup = String::new();
        std::io::stdin()
            .read_to_string(&mut markup)
            .context("Failed to read SVG from stdin")?;
        Ok(markup)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = content.len(), "Output written");
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn check(input: &Path) -> Result<()> {
    let markup = read_input(input)?;
    let document = parse_document(&markup)?;

    println!("root: <{}>", document.root_tag);
    println!("supported shapes: {}", document.shapes.len());
    for diagnostic in &document.diagnostics {
        println!("{}", diagnostic);
    }

    if !document.has_supported_elements() {
        anyhow::bail!("No supported SVG elements found in {}", input.display());
    }
    Ok(())
}

fn parse(input: &Path) -> Result<()> {
    let markup = read_input(input)?;
    let document = parse_document(&markup)?;

    let json = serde_json::to_string_pretty(&serde_json::json!({
        "root": document.root_tag,
        "shapes": document.shapes,
        "diagnostics": document.diagnostics,
    }))?;
    println!("{}", json);
    Ok(())
}

fn generate(
    input: &Path,
    depth: ExtrusionDepth,
    format: OutputFormat,
    shading: Shading,
    output: Option<&Path>,
) -> Result<()> {
    let markup = read_input(input)?;

    let content = match format {
        OutputFormat::Json => {
            let mut sink = JsonSink::new(shading);
            let result = process_svg(&markup, depth, &mut sink)?;
            let diagnostics = result.diagnostics.iter().map(ToString::to_string).collect();
            sink.into_document(result.report, diagnostics).to_json_pretty()?
        }
        OutputFormat::Obj => {
            let mut sink = ObjSink::new(shading);
            process_svg(&markup, depth, &mut sink)?;
            sink.finish()
        }
    };

    write_output(output, &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate_args(args: &[&str]) -> (Option<f64>, Option<Shading>) {
        let argv: Vec<&str> = ["svg-extrude", "generate", "shapes.svg"]
            .into_iter()
            .chain(args.iter().copied())
            .collect();
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Generate { depth, shading, .. } => (depth, shading),
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_negative_depth_reaches_clamp() {
        let (depth, _) = generate_args(&["--depth", "-5"]);
        assert_eq!(depth, Some(-5.0));
        assert_eq!(depth.map(ExtrusionDepth::new).map(ExtrusionDepth::get), Some(0.0));

        let (depth, _) = generate_args(&["-d", "-0.5"]);
        assert_eq!(depth, Some(-0.5));
    }

    #[test]
    fn test_shading_flag() {
        assert_eq!(generate_args(&[]), (None, None));
        assert_eq!(generate_args(&["--shading", "smooth"]).1, Some(Shading::Smooth));
        assert!(Cli::try_parse_from(["svg-extrude", "generate", "a.svg", "--shading", "glossy"]).is_err());
    }

    #[test]
    fn test_stdin_input_is_accepted() {
        let cli = Cli::try_parse_from(["svg-extrude", "check", "-"]).unwrap();
        assert!(matches!(cli.command, Commands::Check { input } if input.as_os_str() == "-"));
    }
}
