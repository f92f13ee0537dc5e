use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Client CLI for the gateway identity echo API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Send an X-API-Key header (simulates the usage-plan gateway).
    #[arg(long)]
    api_key: Option<String>,

    /// Send an X-Amz-Security-Token header.
    #[arg(long)]
    security_token: Option<String>,

    /// Send a raw Authorization header value.
    #[arg(long)]
    authorization: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Call the welcome endpoint
    Root,
    /// Check service health
    Health,
    /// Fetch the sample data set
    GetData,
    /// Post a JSON object to the data endpoint
    PostData {
        /// Request body, e.g. '{"message":"test"}'
        body: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if let Some(key) = &cli.api_key {
        headers.insert("X-API-Key", HeaderValue::from_str(key)?);
    }
    if let Some(token) = &cli.security_token {
        headers.insert("X-Amz-Security-Token", HeaderValue::from_str(token)?);
    }
    if let Some(auth) = &cli.authorization {
        headers.insert(AUTHORIZATION, HeaderValue::from_str(auth)?);
    }

    match cli.command {
        Commands::Root => {
            let res = client.get(&cli.url).headers(headers).send().await?;
            print_response(res).await?;
        }
        Commands::Health => {
            let res = client
                .get(format!("{}/health", cli.url))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::GetData => {
            let res = client
                .get(format!("{}/data", cli.url))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::PostData { body } => {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            let res = client
                .post(format!("{}/data", cli.url))
                .headers(headers)
                .body(body)
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("API returned status {status}");
    }

    // Error responses carry JSON envelopes too; print whatever came back.
    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
