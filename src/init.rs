use std::sync::Arc;

use poise::serenity_prelude::{self as serenity, Client, ClientBuilder};
use tracing::Instrument;

use crate::{
    commands::{self, topic::TopicCommand},
    constants::DEFAULT_PREFIX,
    formatters, telemetry, Data,
};

fn init_topic_commands() -> Vec<Arc<TopicCommand>> {
    let topic_commands = vec![
        Arc::new(TopicCommand::new(
            "wiki",
            "Links to wiki topics",
            "WIKI_ITEMS_PATH",
            formatters::link,
        )),
        Arc::new(TopicCommand::new(
            "support",
            "Sends support prompts to help users provide more details",
            "SUPPORT_ITEMS_PATH",
            formatters::lines,
        )),
    ];

    for command in &topic_commands {
        tracing::info!(command = %command.name(), "loading topic menu...");
        command.init();
    }

    topic_commands
}

fn init_prefix() -> String {
    std::env::var("BOT_PREFIX")
        .ok()
        .filter(|prefix| !prefix.trim().is_empty())
        .unwrap_or_else(|| {
            tracing::info!("no BOT_PREFIX set, using {}", DEFAULT_PREFIX);
            DEFAULT_PREFIX.to_string()
        })
}

async fn init_discord_client(token: &str, prefix: String, data: Data) -> anyhow::Result<Client> {
    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT;

    let commands = data
        .topic_commands()
        .iter()
        .map(|command| command.to_poise_command())
        .chain([
            commands::mods::mods(),
            commands::help::help(),
            commands::status::status(),
        ])
        .collect();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands,
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(prefix),
                ..Default::default()
            },
            ..Default::default()
        })
        .setup(|ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands)
                    .await
                    .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when registering commands"))?;

                Ok(data)
            }.in_current_span())
        })
        .build();

    let client = ClientBuilder::new(token, intents)
        .framework(framework)
        .activity(serenity::ActivityData::custom("/wiki · /support"))
        .await?;

    Ok(client)
}

pub async fn init() -> anyhow::Result<Client> {
    telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("failed to initialize telemetry: {e}"))?;

    tracing::info!("initializing...");

    let token = std::env::var("DISCORD_TOKEN")
        .map_err(|_| anyhow::anyhow!("missing DISCORD_TOKEN"))?;

    let data = Data::new(init_topic_commands());
    let client = init_discord_client(&token, init_prefix(), data).await?;

    tracing::info!("finished initializing!");
    Ok(client)
}
