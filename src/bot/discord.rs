//! Discord transport built on serenity.
//!
//! Message events go to the [`Dispatcher`]; replies are sent back to the originating
//! channel as plain messages or rich embeds. The `ready` event starts the reset scheduler.
//! Discord may deliver `ready` again after a reconnect, which the scheduler's idempotent
//! start absorbs.
use anyhow::{Context as _, Result};
use log::{debug, info, warn};
use serenity::all::{
    Client, Colour, Context, CreateEmbed, CreateMessage, EventHandler, GatewayIntents, Message,
    Ready,
};
use serenity::async_trait;
use std::sync::Arc;

use super::dispatch::Dispatcher;
use super::reply::{EmbedView, Reply};
use crate::config::Config;
use crate::quest::{ColorHint, ResetScheduler};

pub fn colour(hint: ColorHint) -> Colour {
    match hint {
        ColorHint::Active => Colour::new(0x2ECC71),
        ColorHint::Neutral => Colour::new(0x3498DB),
        ColorHint::Default => Colour::new(0x95A5A6),
    }
}

fn to_embed(view: &EmbedView) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(&view.title)
        .colour(colour(view.color));
    if let Some(description) = &view.description {
        embed = embed.description(description);
    }
    for field in &view.fields {
        embed = embed.field(&field.name, &field.value, field.inline);
    }
    embed
}

pub struct DiscordHandler {
    dispatcher: Arc<Dispatcher>,
    scheduler: Arc<ResetScheduler>,
}

impl DiscordHandler {
    pub fn new(dispatcher: Arc<Dispatcher>, scheduler: Arc<ResetScheduler>) -> Self {
        Self {
            dispatcher,
            scheduler,
        }
    }
}

#[async_trait]
impl EventHandler for DiscordHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("Logged in as {}", ready.user.name);
        if !self.scheduler.start(self.dispatcher.board().clone()) {
            debug!("Reconnected; reset scheduler already running");
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let Some(reply) = self.dispatcher.handle(&msg.content).await else {
            return;
        };
        let sent = match reply {
            Reply::Text(text) => msg.channel_id.say(&ctx.http, text).await,
            Reply::Embed(view) => {
                let builder = CreateMessage::new().embed(to_embed(&view));
                msg.channel_id.send_message(&ctx.http, builder).await
            }
        };
        if let Err(e) = sent {
            warn!("Failed to send reply to channel {}: {}", msg.channel_id, e);
        }
    }
}

/// Connect to Discord and run until the gateway closes or Ctrl-C is received.
///
/// The token is read from the environment variable named by `bot.token_env`; a missing
/// token is a startup error.
pub async fn run(
    config: &Config,
    dispatcher: Arc<Dispatcher>,
    scheduler: Arc<ResetScheduler>,
) -> Result<()> {
    let token = std::env::var(&config.bot.token_env).with_context(|| {
        format!(
            "Bot token not found: set the {} environment variable",
            config.bot.token_env
        )
    })?;

    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;
    let handler = DiscordHandler::new(dispatcher, scheduler);
    let mut client = Client::builder(&token, intents)
        .event_handler(handler)
        .await
        .context("Failed to build Discord client")?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received shutdown signal");
            shard_manager.shutdown_all().await;
        }
    });

    info!("Connecting to Discord as '{}'...", config.bot.name);
    client
        .start()
        .await
        .context("Discord client stopped with an error")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_map_to_distinct_colours() {
        let active = colour(ColorHint::Active);
        let neutral = colour(ColorHint::Neutral);
        let default = colour(ColorHint::Default);
        assert_ne!(active, neutral);
        assert_ne!(neutral, default);
        assert_ne!(active, default);
    }
}
