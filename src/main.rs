use anyhow::{Context, Result};
use clap::Parser;
use dominance::{
    acquire_grid, HttpFetcher, ImageSource, Palette, ProxyRetry, DEFAULT_COLOR_COUNT, DEFAULT_MAX_DIMENSION,
    DEFAULT_MAX_ITERATIONS, DEFAULT_PROXY_PREFIX, DEFAULT_SAMPLE_STEP,
};
use log::info;
use serde::Serialize;

/// Print the dominant colors of images, most common first.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Image file paths or http(s) URLs
    #[arg(required = true)]
    sources: Vec<String>,

    /// Number of colors to extract
    #[arg(short = 'k', long, default_value_t = DEFAULT_COLOR_COUNT)]
    colors: usize,

    /// Stride in pixels between sampled pixels
    #[arg(short, long, default_value_t = DEFAULT_SAMPLE_STEP)]
    step: usize,

    /// Longest side images are scaled down to before sampling
    #[arg(short = 'd', long, default_value_t = DEFAULT_MAX_DIMENSION)]
    max_dimension: u32,

    /// Maximum number of k-means iterations
    #[arg(short = 'i', long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Proxy prefix URLs are retried through when a direct load fails
    #[arg(long, default_value = DEFAULT_PROXY_PREFIX)]
    proxy: String,

    /// Print the palettes as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    source: &'a str,
    palette: Palette,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let fetcher = HttpFetcher::new();
    let retry = ProxyRetry::new(&args.proxy);
    let mut reports = Vec::with_capacity(args.sources.len());

    for source in &args.sources {
        let image_source = if source.starts_with("http://") || source.starts_with("https://") {
            ImageSource::from_url(source)
        } else {
            let image = dominance::image::open(source).with_context(|| format!("failed to open {source}"))?;
            ImageSource::from_image(image)
        };

        let grid = acquire_grid(image_source, &fetcher, &retry, args.max_dimension)
            .await
            .with_context(|| format!("failed to load {source}"))?;

        let palette = Palette::from_grid(grid)
            .color_count(args.colors)
            .sample_step(args.step)
            .max_iterations(args.max_iterations)
            .generate()
            .with_context(|| format!("failed to extract a palette from {source}"))?;

        info!(
            "{source}: {} colors from {} samples after {} iterations",
            palette.len(),
            palette.sampled(),
            palette.iterations()
        );

        reports.push(Report { source, palette });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in &reports {
        println!("{}", report.source);
        for entry in report.palette.entries() {
            println!("  {:<12} {}", entry.key(), entry.count());
        }
    }

    Ok(())
}
