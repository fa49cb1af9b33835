/// Mirador pipeline demo
///
/// Walks the full coordination path:
/// - open the shared persisted store
/// - build a round-robin dispatcher over a worker pool
/// - create a campaign (planner supplies the dimensions)
/// - score a batch of reviews in parallel
/// - query the results back by article id and by date

use std::sync::Arc;
use chrono::NaiveDate;
use mirador::analysis::analyzer::TableAnalyzer;
use mirador::analysis::planner::StaticPlanner;
use mirador::core::config::Config;
use mirador::core::types::DocumentSubmission;
use mirador::dispatch::dispatcher::Dispatcher;
use mirador::parallel::processor::ParallelProcessor;
use mirador::storage::store::PersistedStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::default();
    if let Some(parent) = config.storage_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    println!("Opening store at {:?}...", config.storage_path);
    let store = Arc::new(PersistedStore::open(config.storage_path.clone()));

    // Stand-ins for the remote scoring and planning services
    let analyzer = Arc::new(TableAnalyzer::from_pairs(&[
        ("direction_quality", 0.75),
        ("storytelling", 0.85),
        ("casting_performance", 0.65),
        ("cinematography", 0.90),
        ("historical_accuracy", 0.80),
    ]));
    let planner = Arc::new(StaticPlanner::from_names(&[
        "direction_quality",
        "storytelling",
        "casting_performance",
        "cinematography",
        "historical_accuracy",
    ]));

    let dispatcher = Dispatcher::new(store.clone(), analyzer, planner, config.num_workers);
    println!("Dispatcher ready with {} workers\n", dispatcher.pool_size());

    let campaign = dispatcher.create_campaign(
        "What is the public perception of the movie Killers of the Flower Moon?",
    )?;
    println!("New campaign created with id {}", campaign);

    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let reviews: Vec<DocumentSubmission> = (0..8)
        .map(|i| DocumentSubmission {
            article_id: format!("review-{}", i),
            published_date: date,
            content: format!("Review text {} ...", i),
        })
        .collect();

    println!("Scoring {} reviews in parallel...", reviews.len());
    let processor = ParallelProcessor::new(config.processor_threads)?;
    let results = processor.process_batch(&dispatcher, campaign, reviews);
    for (i, result) in results.iter().enumerate() {
        match result {
            Ok(scores) => println!("  review-{} scored on {} dimensions", i, scores.len()),
            Err(err) => println!("  review-{} failed: {}", i, err),
        }
    }

    println!("\nQuery back:");
    if let Some(scores) = dispatcher.get_by_article_id(campaign, "review-0") {
        println!("  review-0 -> {:?}", scores);
    }
    if let Some(by_date) = dispatcher.get_by_date(campaign, date) {
        println!("  {} -> {} articles", date, by_date.len());
    }

    let stats = store.stats();
    println!(
        "\nStore: {} campaigns, {} articles, {} dated entries",
        stats.campaign_count, stats.article_count, stats.dated_entry_count
    );

    Ok(())
}
