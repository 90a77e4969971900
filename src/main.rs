use clap::Parser;
use std::process::ExitCode;
use wiki_detail::results::SearchResult;
use wiki_detail::{Lookup, WikiConfig};

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let mut lookup = match &args.config {
        Some(path) => match Lookup::with_config_file(path) {
            Ok(lookup) => lookup,
            Err(e) => {
                ::log::error!("Failed to load configuration {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Lookup::new(WikiConfig::default()),
    };

    if let Some(limit) = args.limit {
        lookup = lookup.with_limit(limit);
    }
    if args.no_image_check {
        lookup = lookup.with_image_check(false);
    }
    if let Some(path) = &args.cache {
        lookup = lookup.with_cache_path(path);
    }

    let service = match lookup.build() {
        Ok(service) => service,
        Err(e) => {
            ::log::error!("Failed to start: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let outcome = match &args.title {
        Some(title) => service.get_detail(title).await.map(|detail| {
            println!("{}", detail);
        }),
        None => {
            ::log::info!("Searching for {:?}", args.query);
            service.search_with_details(&args.query).await.map(|results| {
                println!("Results ({})", results.len());
                for result in &results {
                    print_result(result);
                }
            })
        }
    };

    if let Err(e) = service.cache().flush().await {
        ::log::warn!("Failed to persist cache: {}", e);
    }

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ::log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_result(result: &SearchResult) {
    println!();
    println!("# {}", result.name);
    println!("{}", result.url);
    println!();
    println!("{}", result.detail);
}
