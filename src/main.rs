use locator::{
    engine::allocator,
    load_approved_pool,
    request::LocateRequest,
    stream_requests,
};

use anyhow::{anyhow, bail, Result};
use std::env;
use std::io::stdout;
use std::path::Path;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    let (requests_path, pool_path) = parse_args();
    validate_csv_file(&requests_path);
    validate_csv_file(&pool_path);
    process_requests(&requests_path, &pool_path).await
}

fn parse_args() -> (String, String) {
    let args: Vec<String> = env::args().collect();

    match args.len() {
        1 => ("locates.csv".to_string(), "approved.csv".to_string()),
        2 => (args[1].clone(), "approved.csv".to_string()),
        3 => (args[1].clone(), args[2].clone()),
        _ => {
            eprintln!("Usage: {} [requests_csv] [approved_csv]", args[0]);
            eprintln!("  requests_csv: locate requests (default: locates.csv)");
            eprintln!("  approved_csv: approved pool per symbol (default: approved.csv)");
            std::process::exit(1);
        }
    }
}

fn validate_csv_file(path: &str) {
    if !Path::new(path).exists() {
        eprintln!("Error: File '{}' does not exist", path);
        std::process::exit(1);
    }

    if !path.to_lowercase().ends_with(".csv") {
        eprintln!("Error: File '{}' is not a CSV file", path);
        std::process::exit(1);
    }
}

async fn process_requests(requests_path: &str, pool_path: &str) -> Result<()> {
    eprintln!("Processing locate requests from: {}", requests_path);
    let pool = load_approved_pool(pool_path).map_err(|e| anyhow!("{}", e))?;
    let rows = stream_requests(requests_path).map_err(|e| anyhow!("{}", e))?;

    // Create a channel to send requests to the engine
    let (req_channel, mut rx) = mpsc::channel::<LocateRequest>(100);

    // Spawn engine task: collect the batch, then allocate
    let engine = tokio::spawn(async move {
        let mut requests = Vec::new();

        while let Some(req) = rx.recv().await {
            requests.push(req);
        }

        allocator::allocate(&requests, &pool)
    });

    // Feed CSV rows to the engine
    for row in rows {
        match row {
            Ok(raw) => {
                let req: LocateRequest = raw.try_into()?;
                req_channel.send(req).await.expect("Receiver dropped");
            }
            Err(e) => {
                eprintln!("Skipping invalid CSV line: {}", e);
            }
        }
    }
    drop(req_channel);

    let run = engine.await?;
    if let Some(err) = run.error() {
        bail!("allocation aborted: {}", err);
    }

    run.dump_allocations(stdout());
    Ok(())
}
