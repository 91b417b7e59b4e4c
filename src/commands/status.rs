use std::time::UNIX_EPOCH;

use crate::{
    commands::get_bot_avatar,
    constants::{version::get_version, POISE_VERSION, STARTUP_TIME},
    Context, Error,
};
use poise::serenity_prelude as serenity;

/// Get the bot's status
#[poise::command(prefix_command)]
#[tracing::instrument(skip_all)]
pub async fn status(ctx: Context<'_>) -> Result<(), Error> {
    let menus = ctx
        .data()
        .topic_commands()
        .iter()
        .map(|command| {
            let loaded = match command.menu().menu_items() {
                Some(snapshot) => format!("{} topics", snapshot.len()),
                None => "not loaded".to_string(),
            };

            format!("`/{}`: {}", command.name(), loaded)
        })
        .collect::<Vec<_>>()
        .join("\n");

    let uptime = STARTUP_TIME
        .duration_since(UNIX_EPOCH)
        .map(|since| format!("<t:{}:R>", since.as_secs()))
        .unwrap_or_else(|_| "unknown".to_string());

    ctx.send(poise::CreateReply::default().embed(
        serenity::CreateEmbed::new()
            .field("version", get_version(), false)
            .field(
                "rust",
                format!("[{0}](https://releases.rs/docs/{0})", rustc_version_runtime::version()),
                true,
            )
            .field(
                "poise",
                format!("[{0}](https://docs.rs/crate/poise/{0})", POISE_VERSION),
                true,
            )
            .field("uptime", uptime, true)
            .field("menus", menus, false)
            .thumbnail(get_bot_avatar(ctx)),
    ))
    .await
    .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when sending reply"))?;

    Ok(())
}
