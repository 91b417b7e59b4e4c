use std::sync::Arc;

use commands::topic::TopicCommand;
use constants::STARTUP_TIME;

mod commands;
mod constants;
mod formatters;
mod init;
mod interaction;
mod menu;
mod models;
mod telemetry;

#[derive(Clone)]
pub struct Data {
    topic_commands: Arc<Vec<Arc<TopicCommand>>>,
}

impl Data {
    pub fn new(topic_commands: Vec<Arc<TopicCommand>>) -> Self {
        Self {
            topic_commands: Arc::new(topic_commands),
        }
    }

    pub fn topic_commands(&self) -> &[Arc<TopicCommand>] {
        &self.topic_commands
    }

    pub fn topic_command(&self, name: &str) -> Option<&TopicCommand> {
        self.topic_commands
            .iter()
            .find(|command| command.name() == name)
            .map(AsRef::as_ref)
    }
}

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let _ = &*STARTUP_TIME;

    let mut client = init::init().await?;

    client.start().await.inspect_err(
        |e| tracing::error!(err = ?e, "the discord client stopped with an error"),
    )?;

    Ok(())
}
