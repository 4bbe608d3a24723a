// SPDX-License-Identifier: PMPL-1.0-or-later
//! Empathybot CLI - Perception Simulation and WCAG Audit Bot
//!
//! Part of the gitbot-fleet ecosystem.

use clap::{Parser, Subcommand, ValueEnum};
use empathybot::announce::{accessible_text, page_announcements};
use empathybot::audit::{run_audit, AccessibilityReport};
use empathybot::color::contrast::{
    meets_standard, minimum_ratio, try_contrast_ratio, TextSize, WcagLevel,
};
use empathybot::color::simulate::{simulate, DeficiencyKind};
use empathybot::dom::{ElementDescriptor, HtmlPage};
use empathybot::keyboard::page_keyboard_issues;
use empathybot::report::{generate_report, OutputFormat};
use empathybot::rules::{BuiltinEngine, RuleConfig};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Page file extensions picked up when auditing a directory
const PAGE_EXTENSIONS: &[&str] = &["html", "htm"];

/// Directories to skip
const SKIP_DIRS: &[&str] = &[
    "node_modules", ".git", "target", "dist", "build",
    "_build", "vendor", ".next", ".nuxt", "coverage",
];

/// Perception Simulation and WCAG Audit Bot for gitbot-fleet
#[derive(Parser)]
#[command(name = "empathybot")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit HTML documents against the built-in WCAG rules
    Audit {
        /// HTML file, or a directory to scan for pages
        path: PathBuf,

        /// WCAG conformance level
        #[arg(long, default_value = "aa")]
        level: WcagLevelArg,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Rule ids to skip (repeatable)
        #[arg(long = "disable", value_name = "RULE_ID")]
        disable: Vec<String>,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// List keyboard navigation defects in a document
    Keyboard {
        /// HTML file to scan
        file: PathBuf,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Print what a screen reader would announce
    Announce {
        /// HTML file to read
        file: PathBuf,

        /// Announce only elements matching this CSS selector
        #[arg(long)]
        selector: Option<String>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Check the contrast ratio of a color pair
    Contrast {
        /// Foreground color (hex)
        foreground: String,

        /// Background color (hex)
        background: String,

        /// WCAG conformance level
        #[arg(long, default_value = "aa")]
        level: WcagLevelArg,

        /// Judge against the large-text threshold
        #[arg(long)]
        large: bool,
    },

    /// Transform a color through a vision-deficiency simulation
    Simulate {
        /// Hex color to transform
        color: String,

        /// Deficiency to simulate
        kind: KindArg,
    },
}

/// WCAG conformance level CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum WcagLevelArg {
    /// Level AA - standard
    Aa,
    /// Level AAA - enhanced
    Aaa,
}

impl From<WcagLevelArg> for WcagLevel {
    fn from(arg: WcagLevelArg) -> Self {
        match arg {
            WcagLevelArg::Aa => WcagLevel::AA,
            WcagLevelArg::Aaa => WcagLevel::AAA,
        }
    }
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI
    Sarif,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

/// Vision deficiency CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    /// Unaltered vision
    Normal,
    /// Red-blind
    Protanopia,
    /// Green-blind
    Deuteranopia,
    /// Blue-blind
    Tritanopia,
    /// Total color blindness
    Achromatopsia,
}

impl From<KindArg> for DeficiencyKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Normal => DeficiencyKind::Normal,
            KindArg::Protanopia => DeficiencyKind::Protanopia,
            KindArg::Deuteranopia => DeficiencyKind::Deuteranopia,
            KindArg::Tritanopia => DeficiencyKind::Tritanopia,
            KindArg::Achromatopsia => DeficiencyKind::Achromatopsia,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("empathybot=debug")
    } else {
        EnvFilter::new("empathybot=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Audit { path, level, format, disable, output, verbose } => {
            init_logging(verbose);
            let pages = collect_pages(&path)?;
            if pages.is_empty() {
                anyhow::bail!("No HTML documents found under {}", path.display());
            }
            let format: OutputFormat = format.into();
            if format == OutputFormat::Sarif && pages.len() > 1 {
                anyhow::bail!("SARIF output covers a single document; pass one HTML file");
            }

            let engine = BuiltinEngine::with_config(RuleConfig {
                level: level.into(),
                disabled_rules: disable,
            });

            let mut reports = Vec::new();
            for page_path in &pages {
                tracing::info!("Auditing {}", page_path.display());
                let html = std::fs::read_to_string(page_path)?;
                let page = HtmlPage::parse(&html);
                let report = run_audit(&engine, &page).await;
                reports.push((page_path.clone(), report));
            }

            let rendered = render_reports(&reports, format);
            write_output(&rendered, output.as_deref())?;

            if reports.iter().any(|(_, report)| report.has_blockers()) {
                std::process::exit(1);
            }
        }

        Commands::Keyboard { file, verbose } => {
            init_logging(verbose);
            let html = std::fs::read_to_string(&file)?;
            let page = HtmlPage::parse(&html);
            let flagged = page_keyboard_issues(&page);

            if flagged.is_empty() {
                println!("No keyboard navigation issues found.");
            } else {
                println!("Found {} keyboard navigation issue(s):", flagged.len());
                for element in &flagged {
                    let announced = accessible_text(element);
                    if announced.is_empty() {
                        println!("  {}", element.selector());
                    } else {
                        println!("  {} ({})", element.selector(), announced);
                    }
                }
            }
        }

        Commands::Announce { file, selector, verbose } => {
            init_logging(verbose);
            let html = std::fs::read_to_string(&file)?;
            let page = HtmlPage::parse(&html);
            let lines: Vec<String> = match selector {
                Some(css) => page
                    .select(&css)?
                    .iter()
                    .map(accessible_text)
                    .filter(|line| !line.is_empty())
                    .collect(),
                None => page_announcements(&page),
            };

            if lines.is_empty() {
                println!("Nothing to announce.");
            } else {
                for line in lines {
                    println!("{}", line);
                }
            }
        }

        Commands::Contrast { foreground, background, level, large } => {
            let ratio = try_contrast_ratio(&foreground, &background)?;
            let level: WcagLevel = level.into();
            let size = if large { TextSize::Large } else { TextSize::Normal };
            let passes = meets_standard(ratio, level, size);

            println!("Contrast ratio: {:.2}:1", ratio);
            println!(
                "WCAG {} ({} text) requires {}:1 -> {}",
                level,
                size,
                minimum_ratio(level, size),
                if passes { "PASS" } else { "FAIL" }
            );

            if !passes {
                std::process::exit(1);
            }
        }

        Commands::Simulate { color, kind } => {
            println!("{}", simulate(&color, kind.into()));
        }
    }

    Ok(())
}

/// Collect the HTML documents under a path: the file itself, or every page
/// below a directory
fn collect_pages(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut pages = Vec::new();
    for entry in WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 {
                return true;
            }
            // Skip hidden and excluded directories
            let name = e.file_name().to_str().unwrap_or("");
            if e.file_type().is_dir() {
                return !SKIP_DIRS.contains(&name) && !name.starts_with('.');
            }
            true
        })
    {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let ext = entry.path().extension().and_then(|e| e.to_str()).unwrap_or("");
        if PAGE_EXTENSIONS.contains(&ext) {
            pages.push(entry.path().to_path_buf());
        }
    }

    pages.sort();
    Ok(pages)
}

#[derive(Serialize)]
struct FileReport<'a> {
    file: String,
    report: &'a AccessibilityReport,
}

/// Render one report per audited file in the requested format
fn render_reports(reports: &[(PathBuf, AccessibilityReport)], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            let entries: Vec<FileReport<'_>> = reports
                .iter()
                .map(|(path, report)| FileReport {
                    file: path.display().to_string(),
                    report,
                })
                .collect();
            serde_json::to_string_pretty(&entries)
                .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize report: {}\"}}", e))
        }
        _ => {
            let mut output = String::new();
            for (path, report) in reports {
                if reports.len() > 1 {
                    output.push_str(&format!("File: {}\n", path.display()));
                }
                output.push_str(&generate_report(report, format));
                output.push('\n');
            }
            output
        }
    }
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
