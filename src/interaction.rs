use std::time::Duration;

use async_trait::async_trait;
use poise::{
    serenity_prelude::{
        ComponentInteractionCollector, ComponentInteractionDataKind, CreateActionRow,
        CreateInteractionResponse, CreateMessage, MessageId,
    },
    ReplyHandle,
};
use tokio::sync::Mutex;

use crate::{menu::TopicMenu, Context, Error};

/// the parts of a single command invocation the topic commands talk to.
#[async_trait]
pub trait TopicInteraction: Send + Sync {
    /// shows `menu` to the invoking user only.
    async fn send_prompt(&self, menu: &TopicMenu) -> Result<(), Error>;

    /// waits for the invoking user to pick one option of `menu`.
    ///
    /// resolves to `None` once `timeout` elapses without a selection.
    async fn await_selection(
        &self,
        menu: &TopicMenu,
        timeout: Duration,
    ) -> Result<Option<String>, Error>;

    /// private reply to the invoking user. replaces the prompt when one was shown.
    async fn reply_private(&self, content: &str) -> Result<(), Error>;

    /// public message in the channel the command was invoked from.
    async fn post_to_channel(&self, content: &str) -> Result<(), Error>;
}

pub struct PoiseInteraction<'a> {
    ctx: Context<'a>,
    prompt: Mutex<Option<ReplyHandle<'a>>>,
}

impl<'a> PoiseInteraction<'a> {
    pub fn new(ctx: Context<'a>) -> Self {
        Self {
            ctx,
            prompt: Mutex::new(None),
        }
    }

    async fn prompt_message_id(&self) -> Option<MessageId> {
        let prompt = self.prompt.lock().await;

        match prompt.as_ref() {
            Some(handle) => handle
                .message()
                .await
                .inspect_err(
                    |e| tracing::warn!(err = ?e, "couldn't resolve the prompt message"),
                )
                .ok()
                .map(|msg| msg.id),
            None => None,
        }
    }
}

#[async_trait]
impl<'a> TopicInteraction for PoiseInteraction<'a> {
    async fn send_prompt(&self, menu: &TopicMenu) -> Result<(), Error> {
        let handle = self
            .ctx
            .send(
                poise::CreateReply::default()
                    .content("Select a topic")
                    .components(vec![CreateActionRow::SelectMenu(menu.to_select_menu())])
                    .ephemeral(true),
            )
            .await
            .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when sending prompt"))?;

        *self.prompt.lock().await = Some(handle);

        Ok(())
    }

    async fn await_selection(
        &self,
        menu: &TopicMenu,
        timeout: Duration,
    ) -> Result<Option<String>, Error> {
        let mut collector = ComponentInteractionCollector::new(self.ctx)
            .author_id(self.ctx.author().id)
            .custom_ids(vec![menu.custom_id.clone()])
            .timeout(timeout);

        if let Some(message_id) = self.prompt_message_id().await {
            collector = collector.message_id(message_id);
        }

        let Some(mci) = collector.await else {
            return Ok(None);
        };

        mci.create_response(self.ctx, CreateInteractionResponse::Acknowledge)
            .await
            .inspect_err(
                |e| tracing::error!(err = ?e, "an error occurred when acknowledging selection"),
            )?;

        selected_value(mci.data.kind).map(Some)
    }

    async fn reply_private(&self, content: &str) -> Result<(), Error> {
        let reply = poise::CreateReply::default()
            .content(content)
            .components(vec![])
            .ephemeral(true);

        let prompt = self.prompt.lock().await;

        let sent = match prompt.as_ref() {
            Some(handle) => handle.edit(self.ctx, reply).await,
            None => self.ctx.send(reply).await.map(|_| ()),
        };

        sent.inspect_err(|e| tracing::error!(err = ?e, "an error occurred when sending reply"))?;

        Ok(())
    }

    async fn post_to_channel(&self, content: &str) -> Result<(), Error> {
        self.ctx
            .channel_id()
            .send_message(self.ctx, CreateMessage::new().content(content))
            .await
            .inspect_err(
                |e| tracing::error!(err = ?e, "an error occurred when posting to channel"),
            )?;

        Ok(())
    }
}

/// the picked option of a string select. any other component is an error, not a timeout.
fn selected_value(kind: ComponentInteractionDataKind) -> Result<String, Error> {
    match kind {
        ComponentInteractionDataKind::StringSelect { values } => values
            .into_iter()
            .next()
            .ok_or_else(|| "the selection carried no value".into()),
        other => Err(format!("expected a string select interaction, got {other:?}").into()),
    }
}
