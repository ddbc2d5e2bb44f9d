use clap::{Parser, Subcommand};
use reqwest::StatusCode;
use serde_json::Value;

use bilibili_parts_proxy::bilibili::extract_bvid;

#[derive(Parser)]
#[command(name = "parts-cli")]
#[command(about = "Command-line companion for the Bilibili parts proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:2323")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the BV id found in a link or text, without any network call
    Extract { input: String },
    /// Ask a running proxy for the part list of a video
    Parts { input: String },
    /// Check that the proxy is up
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { input } => match extract_bvid(&input) {
            Some(bvid) => println!("{}", bvid),
            None => {
                eprintln!("No BV id found in {:?}", input);
                std::process::exit(1);
            }
        },
        Commands::Parts { input } => {
            let client = reqwest::Client::new();
            let res = client
                .get(format!("{}/bilibili-parts", cli.server))
                .query(&[("url", input.as_str())])
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Health => {
            let res = reqwest::get(format!("{}/health", cli.server)).await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let body: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&body)?);

    if status != StatusCode::OK {
        eprintln!("Error: HTTP {}", status);
        std::process::exit(1);
    }
    Ok(())
}
