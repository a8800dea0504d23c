use anyhow::Result;
use serenity::builder::CreateMessage;
use serenity::model::channel::ChannelType;
use serenity::model::id::ChannelId;
use serenity::prelude::*;
use tokio::time::{Duration, timeout};

use crate::log;

pub fn welcome_text(mention: impl std::fmt::Display, guild_name: &str) -> String {
  format!("👋 Welcome {} to **{}**! 🎉", mention, guild_name)
}

/// Picks the channel the welcome goes to: the text channel whose name is
/// exactly the configured welcome channel name, else the channel the
/// triggering message was posted in. Voice channels and categories never
/// match, whatever they are named. If several text channels share the
/// name, the lowest channel id wins.
pub fn resolve_destination<'a, I>(
  channels: I,
  welcome_channel_name: &str,
  origin: ChannelId,
) -> ChannelId
where
  I: IntoIterator<Item = (ChannelId, &'a str, ChannelType)>,
{
  channels
    .into_iter()
    .filter(|(_, name, kind)| *kind == ChannelType::Text && *name == welcome_channel_name)
    .map(|(id, _, _)| id)
    .min()
    .unwrap_or(origin)
}

pub async fn send_welcome(ctx: &Context, channel_id: ChannelId, text: &str) -> Result<()> {
  let send_future = channel_id.send_message(&ctx.http, CreateMessage::new().content(text));

  match timeout(Duration::from_secs(10), send_future).await {
    Ok(Ok(_)) => {
      log::success(format!("Sent welcome message to channel {}", channel_id));
      Ok(())
    }
    Ok(Err(e)) => {
      log::error(format!(
        "Failed to send welcome message to channel {}: {}",
        channel_id, e
      ));
      Err(e.into())
    }
    Err(_) => {
      log::error(format!(
        "Timeout (10s) while sending welcome message to channel {}",
        channel_id
      ));
      Err(anyhow::anyhow!("Message send timeout after 10 seconds"))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn prefers_text_channel_with_configured_name() {
    let channels = [
      (ChannelId::new(901), "random", ChannelType::Text),
      (ChannelId::new(902), "general", ChannelType::Text),
      (ChannelId::new(903), "memes", ChannelType::Text),
    ];
    let dest = resolve_destination(channels, "general", ChannelId::new(901));
    assert_eq!(dest, ChannelId::new(902));
  }

  #[test]
  fn falls_back_to_originating_channel() {
    let channels = [
      (ChannelId::new(901), "random", ChannelType::Text),
      (ChannelId::new(903), "memes", ChannelType::Text),
    ];
    let dest = resolve_destination(channels, "general", ChannelId::new(901));
    assert_eq!(dest, ChannelId::new(901));
  }

  #[test]
  fn channel_name_match_is_exact() {
    let channels = [(ChannelId::new(902), "General", ChannelType::Text)];
    let dest = resolve_destination(channels, "general", ChannelId::new(901));
    assert_eq!(dest, ChannelId::new(901));
  }

  #[test]
  fn non_text_channels_never_match() {
    // a voice channel and a category named "general", no text channel
    let channels = [
      (ChannelId::new(902), "general", ChannelType::Voice),
      (ChannelId::new(903), "general", ChannelType::Category),
    ];
    let dest = resolve_destination(channels, "general", ChannelId::new(901));
    assert_eq!(dest, ChannelId::new(901));
  }

  #[test]
  fn duplicate_names_pick_lowest_id() {
    let channels = [
      (ChannelId::new(905), "general", ChannelType::Text),
      (ChannelId::new(902), "general", ChannelType::Text),
    ];
    let dest = resolve_destination(channels, "general", ChannelId::new(901));
    assert_eq!(dest, ChannelId::new(902));
  }

  #[test]
  fn welcome_text_names_user_and_guild() {
    let text = welcome_text("<@42>", "Rustacean Station");
    assert!(text.contains("<@42>"));
    assert!(text.contains("**Rustacean Station**"));
  }
}
