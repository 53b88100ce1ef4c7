pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "shipping")]
#[command(about = "Shipping CLI - operator tools for the Daily Shipping API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Mint a development bearer token signed with AUTH_JWT_SECRET")]
    Token(commands::token::TokenArgs),

    #[command(about = "Check server health status from the /health endpoint")]
    Health {
        #[arg(long, default_value = "http://localhost:8080", help = "Server base URL")]
        url: String,
    },

    #[command(about = "Print the PostgreSQL schema created on bootstrap")]
    Schema,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Token(args) => commands::token::handle(args, output_format),
        Commands::Health { url } => commands::health::handle(&url, output_format).await,
        Commands::Schema => commands::schema::handle(output_format),
    }
}
