//! wcagpdf CLI - PDF accessibility analysis tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use wcagpdf::contrast::{ContrastRatioChecker, RgbRaster};
use wcagpdf::report::{self, AnalysisReport, JsonFormat};
use wcagpdf::{AnalysisOptions, Analyzer, DirectoryRasterSource};

#[derive(Parser)]
#[command(name = "wcagpdf")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Score PDF content trees and check WCAG text contrast", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Recover structure and print the correct semantic score
    Score {
        /// Content tree JSON files
        #[arg(value_name = "TREE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Keep malformed chunks as plain nodes
        #[arg(long)]
        lenient: bool,
    },

    /// Measure the contrast ratio of a rendered image
    Contrast {
        /// PNG or JPEG image
        #[arg(value_name = "IMAGE")]
        input: PathBuf,

        /// Pixel region as x,y,width,height (whole image if not specified)
        #[arg(long, value_parser = parse_region)]
        region: Option<Region>,

        /// Category of the text in the region
        #[arg(long, value_enum, default_value = "regular")]
        text_type: TextKind,

        /// Use high-visibility thresholds
        #[arg(long)]
        high_visibility: bool,
    },

    /// Score a tree and check every text chunk against rendered pages
    Check {
        /// Content tree JSON file
        #[arg(value_name = "TREE")]
        input: PathBuf,

        /// Page image path with a {page} placeholder
        #[arg(short, long, value_name = "TEMPLATE", env = "WCAGPDF_PAGES")]
        pages: String,

        /// Page size in points as WIDTHxHEIGHT (one pixel per point if not specified)
        #[arg(long, value_parser = parse_page_size)]
        page_size: Option<(f64, f64)>,

        /// Use high-visibility thresholds
        #[arg(long)]
        high_visibility: bool,

        /// Disable parallel raster scanning
        #[arg(long)]
        sequential: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum TextKind {
    /// Body text
    Regular,
    /// At least 18 pt, or 14 pt bold
    Large,
    /// Logo or brand name, always passes
    Logo,
    /// Decorative text, always fails
    Incidental,
}

impl From<TextKind> for wcagpdf::TextType {
    fn from(kind: TextKind) -> Self {
        match kind {
            TextKind::Regular => wcagpdf::TextType::Regular,
            TextKind::Large => wcagpdf::TextType::Large,
            TextKind::Logo => wcagpdf::TextType::Logo,
            TextKind::Incidental => wcagpdf::TextType::Incidental,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Region {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

fn parse_region(value: &str) -> Result<Region, String> {
    let parts: Vec<u32> = value
        .split(',')
        .map(|p| p.trim().parse::<u32>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid region '{}': {}", value, e))?;
    match parts.as_slice() {
        [x, y, width, height] => Ok(Region {
            x: *x,
            y: *y,
            width: *width,
            height: *height,
        }),
        _ => Err(format!("region '{}' needs x,y,width,height", value)),
    }
}

fn parse_page_size(value: &str) -> Result<(f64, f64), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("page size '{}' needs WIDTHxHEIGHT", value))?;
    let w: f64 = w.trim().parse().map_err(|e| format!("invalid width: {}", e))?;
    let h: f64 = h.trim().parse().map_err(|e| format!("invalid height: {}", e))?;
    if w <= 0.0 || h <= 0.0 {
        return Err("page size must be positive".to_string());
    }
    Ok((w, h))
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Score {
            inputs,
            output,
            json,
            compact,
            lenient,
        }) => cmd_score(&inputs, output.as_deref(), json, compact, lenient),
        Some(Commands::Contrast {
            input,
            region,
            text_type,
            high_visibility,
        }) => cmd_contrast(&input, region, text_type, high_visibility),
        Some(Commands::Check {
            input,
            pages,
            page_size,
            high_visibility,
            sequential,
            output,
            json,
        }) => cmd_check(
            &input,
            &pages,
            page_size,
            high_visibility,
            sequential,
            output.as_deref(),
            json,
        ),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: wcagpdf <COMMAND>".yellow());
            println!("       wcagpdf --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_score(
    inputs: &[PathBuf],
    output: Option<&Path>,
    json: bool,
    compact: bool,
    lenient: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut analyzer = Analyzer::new();
    if lenient {
        analyzer = analyzer.lenient();
    }

    let pb = if inputs.len() > 1 {
        let pb = ProgressBar::new(inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut reports = Vec::with_capacity(inputs.len());
    for input in inputs {
        if let Some(pb) = &pb {
            pb.set_message(input.display().to_string());
        }
        let report = analyzer.analyze_file(input)?;
        reports.push((input.clone(), report));
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if json {
        let format = if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        let text = match reports.as_slice() {
            [(_, single)] => report::to_json(single, format)?,
            _ => {
                let all: Vec<&AnalysisReport> = reports.iter().map(|(_, r)| r).collect();
                if compact {
                    serde_json::to_string(&all)?
                } else {
                    serde_json::to_string_pretty(&all)?
                }
            }
        };
        return write_output(output, &text);
    }

    for (input, report) in &reports {
        print_summary(input, report);
    }
    Ok(())
}

fn cmd_contrast(
    input: &Path,
    region: Option<Region>,
    text_type: TextKind,
    high_visibility: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let raster = RgbRaster::open(input)?;
    let region = match region {
        Some(r) => raster.region(r.x, r.y, r.width, r.height)?,
        None => raster.full_region(),
    };

    let checker = ContrastRatioChecker::from_options(&AnalysisOptions::default());
    let analysis = checker.analyze(&region);
    if analysis.is_degenerate() {
        println!(
            "{}: region has fewer than two dominant colours",
            "Skipped".yellow().bold()
        );
        return Ok(());
    }
    let verdict = analysis.verdict(text_type.into(), high_visibility);

    println!("{}", "Contrast".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!(
        "{}: {}x{}",
        "Region".bold(),
        region.width(),
        region.height()
    );
    println!(
        "{}: rgb{:?} / rgb{:?}",
        "Colours".bold(),
        analysis.most_present.color,
        analysis.second_present.color
    );
    println!("{}: {:.2}:1", "Ratio".bold(), verdict.ratio);
    println!("{}: {}", "Text type".bold(), verdict.text_type);
    println!("{}: {}", "Result".bold(), pass_fail(verdict.compliant));
    Ok(())
}

fn cmd_check(
    input: &Path,
    pages: &str,
    page_size: Option<(f64, f64)>,
    high_visibility: bool,
    sequential: bool,
    output: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = AnalysisOptions::new()
        .with_high_visibility(high_visibility)
        .with_parallel(!sequential);
    let analyzer = Analyzer::new().with_options(options);

    let mut source = DirectoryRasterSource::new(pages);
    if let Some((w, h)) = page_size {
        source = source.with_page_size(w, h);
    }

    let mut tree = analyzer.load(input)?;
    let report = analyzer.analyze_with_rasters(&mut tree, &source);

    if json {
        let text = report::to_json(&report, JsonFormat::Pretty)?;
        return write_output(output, &text);
    }

    print_summary(input, &report);
    println!(
        "{}: {} checked, {} failing",
        "Contrast".bold(),
        report.stats.chunks_checked,
        report.stats.contrast_failures
    );
    for finding in &report.contrast_failures {
        println!(
            "  {} page {} {:.2}:1 ({}) {}",
            "✗".red(),
            finding
                .page_number
                .map_or_else(|| "?".to_string(), |p| p.to_string()),
            finding.verdict.ratio,
            finding.verdict.text_type,
            finding.text.dimmed()
        );
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "wcagpdf".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF accessibility analysis tool");
    println!();
    println!("License: MIT");
}

fn print_summary(input: &Path, report: &AnalysisReport) {
    let score = format!("{:.3}", report.root_score);
    let score = if report.root_score >= 1.0 {
        score.green()
    } else if report.root_score > 0.0 {
        score.yellow()
    } else {
        score.red()
    };

    println!("{}", input.display().to_string().cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Score".bold(), score);
    if let Some(root_type) = report.root_type {
        println!("{}: {}", "Root type".bold(), root_type);
    }
    let stats = &report.stats;
    println!(
        "{}: {} paragraphs, {} spans, {} lists ({} items), {} figures",
        "Structure".bold(),
        stats.paragraphs,
        stats.spans,
        stats.lists,
        stats.list_items,
        stats.figures
    );
    println!(
        "{}: {} of {}",
        "Unclassified".bold(),
        stats.unclassified,
        stats.nodes
    );
}

fn pass_fail(compliant: bool) -> colored::ColoredString {
    if compliant {
        "PASS".green().bold()
    } else {
        "FAIL".red().bold()
    }
}

fn write_output(output: Option<&Path>, text: &str) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            fs::write(path, text)?;
            eprintln!("{} {}", "Wrote".green(), path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_region() {
        assert_eq!(
            parse_region("1, 2,30,40").unwrap(),
            Region {
                x: 1,
                y: 2,
                width: 30,
                height: 40
            }
        );
        assert!(parse_region("1,2,3").is_err());
        assert!(parse_region("a,b,c,d").is_err());
    }

    #[test]
    fn test_parse_page_size() {
        assert_eq!(parse_page_size("612x792").unwrap(), (612.0, 792.0));
        assert!(parse_page_size("612").is_err());
        assert!(parse_page_size("0x10").is_err());
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_output(Some(&path), "{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }
}
