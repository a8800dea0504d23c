mod config;
mod discord;
mod handler;
mod health;
mod log;
mod store;

use anyhow::{Context as _, Result};
use serenity::prelude::*;
use std::sync::Arc;
use tokio::sync::RwLock;

use config::Config;
use handler::BotHandler;
use store::SeenStore;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    print_config_info(&config);

    let store = SeenStore::load(&config.data_file)
        .await
        .context("Failed to load seen-user data")?;

    let config = Arc::new(config);
    let store = Arc::new(RwLock::new(store));

    let port = config.port;
    tokio::spawn(async move {
        if let Err(e) = health::serve(port).await {
            log::error(format!("Health server error: {e:#}"));
        }
    });

    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES;

    let handler = BotHandler {
        config: Arc::clone(&config),
        store: Arc::clone(&store),
    };

    let mut client = Client::builder(&config.token, intents)
        .event_handler(handler)
        .await
        .context("Failed to create Discord client")?;

    println!("[+] Starting Discord bot...\n");

    if let Err(why) = client.start().await {
        log::error(format!("Client error: {:?}", why));
    }

    Ok(())
}

fn print_config_info(config: &Config) {
    println!("📋 Configuration loaded:");
    println!("   Welcome channel: #{}", config.welcome_channel_name);
    println!("   Data file: {}", config.data_file.display());
    println!("   Health port: {}", config.port);
    println!();
}
