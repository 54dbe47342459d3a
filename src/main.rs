use std::fs::File;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use tokio::sync::mpsc;

use mdpolish::api::{CompletionClient, ImageOptions, providers};
use mdpolish::config::{ConfigPatch, ConfigStore, JsonFileStore};
use mdpolish::export;

#[derive(Parser)]
#[command(name = "mdpolish", about = "AI-assisted Markdown polishing")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Polish a Markdown file and print the result
    Polish {
        file: PathBuf,
        /// Replace the default polishing instruction
        #[arg(short, long)]
        instruction: Option<String>,
        /// Wait for the full response instead of streaming
        #[arg(long)]
        no_stream: bool,
    },
    /// Generate an image and print its URL
    Image {
        prompt: String,
        /// Output size, e.g. "2K" or "1024x1024"
        #[arg(long)]
        size: Option<String>,
    },
    /// Export a Markdown file as a standalone HTML document
    Export {
        file: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the built-in provider presets
    Providers,
    /// Update and show stored settings
    Config {
        /// Switch to a provider preset (adopts its base URL and model)
        #[arg(long)]
        provider: Option<String>,
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        base_url: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        temperature: Option<f32>,
        #[arg(long)]
        max_tokens: Option<u32>,
        #[arg(long)]
        system_prompt: Option<String>,
    },
}

/// Loads the persisted config and builds the client. An env key fills in
/// for an empty stored key but never overrides one the user saved.
fn build_client() -> CompletionClient {
    let store: Box<dyn ConfigStore> = Box::new(JsonFileStore::new(
        JsonFileStore::default_path().unwrap_or_else(|| PathBuf::from("mdpolish-config.json")),
    ));
    let mut config = store.load().unwrap_or_default();
    if config.api_key.trim().is_empty()
        && let Ok(key) = std::env::var("MDPOLISH_API_KEY")
    {
        config.api_key = key;
    }
    CompletionClient::with_config(config, store)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // File logger - writes to mdpolish.log in the current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("mdpolish.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }
    info!("mdpolish starting up");

    match args.command {
        Command::Polish {
            file,
            instruction,
            no_stream,
        } => {
            let text = std::fs::read_to_string(&file)?;
            let client = build_client();
            if no_stream {
                let polished = client.complete(&text, instruction.as_deref()).await?;
                println!("{polished}");
            } else {
                let (tx, mut rx) = mpsc::channel::<String>(64);
                let printer = tokio::spawn(async move {
                    use std::io::Write as _;
                    let mut stdout = std::io::stdout();
                    while let Some(chunk) = rx.recv().await {
                        let _ = stdout.write_all(chunk.as_bytes());
                        let _ = stdout.flush();
                    }
                    let _ = stdout.write_all(b"\n");
                });
                client
                    .complete_stream(&text, instruction.as_deref(), tx)
                    .await?;
                let _ = printer.await;
            }
        }
        Command::Image { prompt, size } => {
            let client = build_client();
            let options = ImageOptions {
                size,
                ..Default::default()
            };
            let url = client.generate_image(&prompt, &options).await?;
            println!("{url}");
        }
        Command::Export { file, output } => {
            let text = std::fs::read_to_string(&file)?;
            let title = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "document".to_string());
            let html = export::to_document(&text, &title);
            match output {
                Some(path) => std::fs::write(path, html)?,
                None => print!("{html}"),
            }
        }
        Command::Providers => {
            for p in providers() {
                let base = if p.base_url.is_empty() {
                    "(user-supplied)"
                } else {
                    p.base_url
                };
                println!("{:<10} {:<18} {base}", p.id, p.name);
                for model in p.models {
                    println!("{:<10} - {model}", "");
                }
            }
        }
        Command::Config {
            provider,
            api_key,
            base_url,
            model,
            temperature,
            max_tokens,
            system_prompt,
        } => {
            let mut client = build_client();
            if let Some(id) = provider {
                client.switch_provider(&id);
            }
            client.configure(ConfigPatch {
                api_key,
                base_url,
                model,
                temperature,
                max_tokens,
                system_prompt,
                ..Default::default()
            });
            let config = client.config();
            println!("provider:    {}", config.provider_id);
            println!("base URL:    {}", config.base_url);
            println!("model:       {}", config.model);
            println!("temperature: {}", config.temperature);
            println!("max tokens:  {}", config.max_tokens);
            println!(
                "API key:     {}",
                if config.is_valid() { "set" } else { "not set" }
            );
        }
    }

    Ok(())
}
