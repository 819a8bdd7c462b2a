use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{debug, info, warn};
use serde::Deserialize;

use recipe_scan::enhance::enhance_with_report;
use recipe_scan::{
    deduplicate, parse_ingredient, PageFragments, Preset, RecipeScanner, ScanConfig, ScanResult,
};

/// Turn recognized recipe text into a structured recipe
#[derive(Parser)]
#[command(name = "recipe-scan", version)]
#[command(about = "Turn scanned recipe text into a structured recipe")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan pages of recognized fragments from a JSON file
    Fragments {
        /// A page object or an array of pages: {"page": {...}, "fragments": [...]}
        path: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Keep repeated lines
        #[arg(long)]
        keep_duplicates: bool,
    },
    /// Scan a text file with one recipe line per line
    Lines {
        path: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Parse a single ingredient line
    Ingredient { line: String },
    /// Print the lines of a text file without repeats
    Dedup { path: PathBuf },
    /// Enhance a page image for recognition
    Enhance {
        input: PathBuf,
        output: PathBuf,

        /// default, high-quality or fast
        #[arg(long)]
        preset: Option<Preset>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FragmentInput {
    Pages(Vec<PageFragments>),
    Page(PageFragments),
}

impl FragmentInput {
    fn into_pages(self) -> Vec<PageFragments> {
        match self {
            FragmentInput::Pages(pages) => pages,
            FragmentInput::Page(page) => vec![page],
        }
    }
}

fn print_result(result: &ScanResult, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(&result.recipe)?);
    } else {
        println!("{}", result.recipe.to_text());
    }
    for duplicate in &result.duplicates {
        info!(
            "Removed repeated line {}: {}",
            duplicate.original_index, duplicate.text
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = ScanConfig::load()?;
    debug!("{:?}", config);

    match cli.command {
        Command::Fragments {
            path,
            json,
            keep_duplicates,
        } => {
            let content = tokio::fs::read_to_string(&path).await?;
            let pages = serde_json::from_str::<FragmentInput>(&content)?.into_pages();
            let builder = pages.into_iter().fold(
                RecipeScanner::builder().config(config),
                |builder, page| builder.page(page.page, page.fragments),
            );
            let result = builder.deduplicate(!keep_duplicates).build().await?;
            print_result(&result, json)?;
        }
        Command::Lines { path, json } => {
            let content = tokio::fs::read_to_string(&path).await?;
            let result = RecipeScanner::builder()
                .config(config)
                .text(&content)
                .build()
                .await?;
            print_result(&result, json)?;
        }
        Command::Ingredient { line } => match parse_ingredient(&line) {
            Some(ingredient) => println!("{}", serde_json::to_string_pretty(&ingredient)?),
            None => warn!("Not an ingredient line: {}", line),
        },
        Command::Dedup { path } => {
            let content = tokio::fs::read_to_string(&path).await?;
            let lines: Vec<&str> = content.lines().collect();
            let result = deduplicate(&lines);
            for line in &result.kept {
                println!("{}", line);
            }
            info!("Removed {} repeated lines", result.removed.len());
        }
        Command::Enhance {
            input,
            output,
            preset,
        } => {
            let preprocessing = match preset {
                Some(preset) => preset.options(),
                None => config.preprocessing_options(),
            };
            let options = config.enhancement.with_preprocessing(&preprocessing);
            let image = image::open(&input)?;
            let (enhanced, report) = enhance_with_report(&image, &options);
            for skipped in &report.skipped {
                warn!("Skipped {} step: {}", skipped.step, skipped.reason);
            }
            enhanced.save(&output)?;
            info!("Wrote {}", output.display());
        }
    }

    Ok(())
}
