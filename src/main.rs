use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use docbrand_pdf::batch;
use docbrand_pdf::style::{BrandConfig, PageGeometry};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PageSize {
    Letter,
    A4,
}

#[derive(Parser)]
#[command(name = "docbrand-pdf")]
#[command(version)]
#[command(about = "Generate the BrainSAIT branded document set as PDF", long_about = None)]
struct Cli {
    /// Output directory
    #[arg(short, long, value_name = "DIR", default_value = "generated_documents")]
    out_dir: PathBuf,

    /// Leave the template catalog out of the batch
    #[arg(long)]
    skip_catalog: bool,

    /// Replace characters the fonts cannot encode with '?' instead of failing
    #[arg(long)]
    substitute_missing_glyphs: bool,

    /// Extra directory searched for TrueType/OpenType fonts (repeatable)
    #[arg(long, value_name = "DIR")]
    font_dir: Vec<PathBuf>,

    /// Page size
    #[arg(long, value_enum, default_value = "letter")]
    page_size: PageSize,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut brand = BrandConfig::default();
    brand.substitute_missing_glyphs = cli.substitute_missing_glyphs;
    brand.font_dirs.extend(cli.font_dir);
    brand.page = match cli.page_size {
        PageSize::Letter => PageGeometry::letter(),
        PageSize::A4 => PageGeometry::a4(),
    };

    let jobs = batch::default_jobs(!cli.skip_catalog);
    let report = match batch::run(&brand, &cli.out_dir, &jobs) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "Generated {} of {} documents in {}",
        report.generated.len(),
        jobs.len(),
        cli.out_dir.display()
    );
    for path in &report.generated {
        println!("  {}", path.display());
    }
    if !report.failed.is_empty() {
        println!("Failed:");
        for (label, err) in &report.failed {
            println!("  {label}: {err}");
        }
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
