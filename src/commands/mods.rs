use crate::{
    constants::mods::DETAILS_PROMPT,
    interaction::{PoiseInteraction, TopicInteraction},
    Context, Error,
};

/// Moderator commands
#[poise::command(
    slash_command,
    subcommand_required,
    subcommands("details"),
    user_cooldown = 5
)]
pub async fn mods(_: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Prompts the user to provide more details about their problem
#[poise::command(slash_command, user_cooldown = 5)]
#[tracing::instrument(skip_all)]
pub async fn details(ctx: Context<'_>) -> Result<(), Error> {
    send_details(&PoiseInteraction::new(ctx)).await;

    Ok(())
}

async fn send_details<I>(interaction: &I)
where
    I: TopicInteraction + ?Sized,
{
    let sent: Result<(), Error> = async {
        interaction.reply_private("Details prompt sent!").await?;
        interaction.post_to_channel(DETAILS_PROMPT).await
    }
    .await;

    if let Err(e) = sent {
        tracing::error!(err = ?e, "unable to send details prompt");

        if let Err(e) = interaction
            .reply_private(&format!("Unable to send details prompt: {e}"))
            .await
        {
            tracing::error!(err = ?e, "an error occurred when reporting failure");
        }
    }
}
