use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use find_simitem::catalog::Catalog;
use find_simitem::ratings;
use find_simitem::{QueryParams, SimilarityPipeline};

#[derive(Parser, Debug)]
#[clap(
    name = "find-simitem",
    about = "A program to find similar items from co-rated user sets."
)]
struct Args {
    /// File path to a rating log of whitespace-delimited
    /// `userID itemID rating [timestamp]` records.
    #[clap(short = 'i', long)]
    ratings_path: PathBuf,

    /// File path to a pipe-delimited catalog of `itemID|name` records.
    #[clap(short = 'c', long)]
    catalog_path: PathBuf,

    /// Target item id to report similar items for. Without it, the run
    /// only computes the full similarity table (see -o).
    #[clap(short = 'm', long)]
    item_id: Option<u32>,

    /// Ratings at or below this value are discarded as noise.
    #[clap(short = 'q', long, default_value = "1.0")]
    quality_threshold: f64,

    /// Minimum Jaccard index (exclusive) for a reported pair.
    #[clap(short = 's', long, default_value = "0.3")]
    score_threshold: f64,

    /// Minimum co-occurrence count (exclusive) for a reported pair.
    #[clap(short = 'n', long, default_value = "10")]
    cooccurrence_threshold: u32,

    /// Maximum number of similar items reported.
    #[clap(short = 'k', long, default_value = "10")]
    top_k: usize,

    /// File path to write the full similarity table, sorted by pair key.
    #[clap(short = 'o', long)]
    table_path: Option<PathBuf>,

    /// Disables parallel pair counting.
    #[clap(short = 'p', long)]
    disable_parallel: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    eprintln!("Loading the catalog...");
    let catalog = Catalog::from_reader(BufReader::new(File::open(&args.catalog_path)?))?;
    eprintln!(
        "Loaded {} item names ({} malformed records skipped)",
        catalog.len(),
        catalog.num_skipped()
    );

    eprintln!("Reading the rating log...");
    let (events, stats) = ratings::read_events(
        BufReader::new(File::open(&args.ratings_path)?),
        args.quality_threshold,
    )?;
    eprintln!(
        "Kept {} events ({} below the quality threshold, {} malformed)",
        stats.kept, stats.filtered, stats.skipped
    );

    eprintln!("Scoring co-rated item pairs...");
    let start = Instant::now();
    let pipeline = SimilarityPipeline::new().shows_progress(true);
    let pipeline = if args.disable_parallel {
        pipeline.build_table(events)?
    } else {
        pipeline.build_table_in_parallel(events)?
    };
    eprintln!(
        "Scored {} pairs in {} sec",
        pipeline.num_pairs(),
        start.elapsed().as_secs_f64()
    );

    if let Some(table_path) = &args.table_path {
        let mut records = pipeline.records().to_vec();
        records.sort_unstable_by_key(|r| r.pair);
        let mut wtr = BufWriter::new(File::create(table_path)?);
        for r in &records {
            writeln!(
                wtr,
                "{} {}\t{}\t{}",
                r.pair.first(),
                r.pair.second(),
                r.jaccard,
                r.cooccurrences
            )?;
        }
        eprintln!("Wrote {} pairs to {}", records.len(), table_path.display());
    }

    if let Some(item_id) = args.item_id {
        let params = QueryParams {
            score_threshold: args.score_threshold,
            cooccurrence_threshold: args.cooccurrence_threshold,
            top_k: args.top_k,
        };
        let target_name = catalog.name(item_id)?;
        let neighbors = pipeline.similar_items(item_id, &params);
        println!("Top {} similar items for {}", params.top_k, target_name);
        for n in &neighbors {
            println!(
                "{}\tscore: {}\tstrength: {}",
                catalog.name(n.item_id)?,
                n.jaccard,
                n.cooccurrences
            );
        }
    }

    Ok(())
}
