use serenity::all::Mentionable;
use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::discord;
use crate::log;
use crate::store::SeenStore;

pub struct BotHandler {
  pub config: Arc<Config>,
  pub store: Arc<RwLock<SeenStore>>,
}

#[async_trait]
impl EventHandler for BotHandler {
  async fn ready(&self, _ctx: Context, ready: Ready) {
    log::success(format!(
      "Logged in as {} (id={})",
      ready.user.name, ready.user.id
    ));
  }

  async fn message(&self, ctx: Context, msg: Message) {
    if msg.author.bot {
      return;
    }
    let Some(guild_id) = msg.guild_id else {
      return; // ignore DMs
    };

    let guild_key = guild_id.to_string();
    let user_key = msg.author.id.to_string();

    {
      let mut store = self.store.write().await;
      if !store.mark_seen(&guild_key, &user_key) {
        return;
      }
      // mirror the in-memory mark to disk before greeting; if that fails
      // the event stops here and no welcome goes out
      if let Err(e) = store.save(&self.config.data_file).await {
        log::warn(format!("Failed to persist seen users, skipping welcome: {e:#}"));
        return;
      }
    }

    let guild = match guild_id.to_partial_guild(&ctx.http).await {
      Ok(guild) => guild,
      Err(e) => {
        log::error(format!("Failed to fetch guild {}: {}", guild_id, e));
        return;
      }
    };

    let destination = match guild_id.channels(&ctx.http).await {
      Ok(channels) => discord::resolve_destination(
        channels.values().map(|c| (c.id, c.name.as_str(), c.kind)),
        &self.config.welcome_channel_name,
        msg.channel_id,
      ),
      Err(e) => {
        log::error(format!("Failed to list channels for guild {}: {}", guild_id, e));
        msg.channel_id
      }
    };

    let text = discord::welcome_text(msg.author.mention(), &guild.name);

    // A failed or timed-out send aborts only this event; send_welcome
    // already logged it.
    let _ = discord::send_welcome(&ctx, destination, &text).await;
  }
}
