use std::sync::Arc;

use poise::serenity_prelude::Permissions;

use crate::{
    interaction::{PoiseInteraction, TopicInteraction},
    formatters::FormatError,
    menu::{MenuError, MenuHelper},
    models::topic::TopicEntry,
    Context, Data, Error,
};

pub type Formatter = fn(&TopicEntry) -> Result<String, FormatError>;

/// a slash command posting one entry of a menu file to the channel.
pub struct TopicCommand {
    name: String,
    description: String,
    formatter: Formatter,
    permissions: Option<Permissions>,
    menu: Arc<MenuHelper>,
}

impl TopicCommand {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        env_var: impl Into<String>,
        formatter: Formatter,
    ) -> Self {
        let name = name.into();

        Self {
            menu: Arc::new(MenuHelper::new(name.clone(), env_var)),
            description: description.into(),
            formatter,
            permissions: None,
            name,
        }
    }

    /// only members with `permissions` see the command by default.
    pub fn restricted_to(mut self, permissions: Permissions) -> Self {
        self.permissions = Some(permissions);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn menu(&self) -> &MenuHelper {
        &self.menu
    }

    /// loads the menu file and starts watching it.
    pub fn init(&self) {
        let _ = self.menu.load();
        self.menu.watch();
    }

    /// the registrable command, cloned from the shared [`topic`] template.
    pub fn to_poise_command(&self) -> poise::Command<Data, Error> {
        let mut command = topic();

        command.name = self.name.clone();
        command.qualified_name = self.name.clone();
        command.identifying_name = self.name.clone();
        command.description = Some(self.description.clone());

        if let Some(param) = command.parameters.first_mut() {
            param.description = Some(format!("The name of the {} topic to send", self.name));
        }

        if let Some(permissions) = self.permissions {
            command.default_member_permissions = permissions;
        }

        command
    }

    /// runs one invocation. every failure ends up as a private reply, nothing is returned.
    #[tracing::instrument(skip(self, interaction), fields(command = %self.name))]
    pub async fn execute<I>(&self, interaction: &I, topic: Option<String>)
    where
        I: TopicInteraction + ?Sized,
    {
        let reply = match self.send_topic(interaction, topic).await {
            Ok(()) => return,
            Err(MenuError::SelectionTimeout(timeout)) => {
                tracing::debug!(?timeout, "no topic selected in time");
                format!("No response received, canceling sending the {}", self.name)
            }
            Err(e) => {
                tracing::error!(err = ?e, "unable to send {}", self.name);
                format!("Unable to send {}: {e}", self.name)
            }
        };

        if let Err(e) = interaction.reply_private(&reply).await {
            tracing::error!(err = ?e, "an error occurred when reporting failure");
        }
    }

    async fn send_topic<I>(&self, interaction: &I, topic: Option<String>) -> Result<(), MenuError>
    where
        I: TopicInteraction + ?Sized,
    {
        let topic = match topic {
            Some(topic) => topic,
            None => self.menu.prompt_for_topic(interaction).await?,
        };

        let snapshot = match self.menu.menu_items() {
            Some(snapshot) if !snapshot.is_empty() => snapshot,
            _ => {
                return self
                    .reply(
                        interaction,
                        &format!(
                            "{} command is not properly configured. Please contact an administrator.",
                            self.name
                        ),
                    )
                    .await;
            }
        };

        let Some(entry) = snapshot.lookup(&topic) else {
            return self
                .reply(
                    interaction,
                    &format!("No {} entry for {} found", self.name, topic),
                )
                .await;
        };

        // nothing is acknowledged or posted for an entry that cannot be rendered.
        let content = (self.formatter)(entry)?;

        self.reply(interaction, &format!("{} sent!", capitalize(&self.name)))
            .await?;

        interaction
            .post_to_channel(&content)
            .await
            .map_err(MenuError::Interaction)
    }

    async fn reply<I>(&self, interaction: &I, content: &str) -> Result<(), MenuError>
    where
        I: TopicInteraction + ?Sized,
    {
        interaction
            .reply_private(content)
            .await
            .map_err(MenuError::Interaction)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// template for every topic command, see [`TopicCommand::to_poise_command`].
#[poise::command(slash_command, user_cooldown = 5)]
#[tracing::instrument(skip_all)]
pub async fn topic(
    ctx: Context<'_>,
    #[description = "The name of the topic to send"] topic: Option<String>,
) -> Result<(), Error> {
    let name = &ctx.command().name;

    let Some(command) = ctx.data().topic_command(name) else {
        tracing::error!(command = %name, "no topic command registered under this name");
        return Ok(());
    };

    let interaction = PoiseInteraction::new(ctx);
    command.execute(&interaction, topic).await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        formatters,
        interaction::mock::{MockInteraction, Sent},
        menu::tests::{helper_for, menu_file},
    };

    static ONE_ENTRY: &str =
        r#"[{"label": "A", "description": "d", "value": "a", "content": ["x", "y"]}]"#;

    fn loaded(var: &str, json: &str) -> (TopicCommand, tempfile::NamedTempFile) {
        let file = menu_file(json);
        let menu = helper_for("support", var, &file);
        menu.load().unwrap();

        let command = TopicCommand {
            name: "support".into(),
            description: "Sends support prompts".into(),
            formatter: formatters::lines,
            permissions: None,
            menu: Arc::new(menu),
        };

        (command, file)
    }

    #[tokio::test]
    async fn direct_topic_acknowledges_then_posts() {
        let (command, _file) = loaded("TOPICBOT_TEST_EXEC_DIRECT", ONE_ENTRY);
        let interaction = MockInteraction::default();

        command.execute(&interaction, Some("a".into())).await;

        assert_eq!(
            interaction.sent(),
            vec![
                Sent::Private("Support sent!".into()),
                Sent::Channel("x\ny".into()),
            ]
        );
    }

    #[tokio::test]
    async fn unknown_topic_is_reported_privately() {
        let (command, _file) = loaded("TOPICBOT_TEST_EXEC_MISSING", ONE_ENTRY);
        let interaction = MockInteraction::default();

        command.execute(&interaction, Some("missing".into())).await;

        assert_eq!(
            interaction.sent(),
            vec![Sent::Private("No support entry for missing found".into())]
        );
    }

    #[tokio::test]
    async fn topic_lookup_is_case_sensitive() {
        let (command, _file) = loaded("TOPICBOT_TEST_EXEC_CASE", ONE_ENTRY);
        let interaction = MockInteraction::default();

        command.execute(&interaction, Some("A".into())).await;

        assert_eq!(
            interaction.sent(),
            vec![Sent::Private("No support entry for A found".into())]
        );
    }

    #[tokio::test]
    async fn empty_menu_is_not_configured() {
        let (command, _file) = loaded("TOPICBOT_TEST_EXEC_EMPTY", "[]");
        let interaction = MockInteraction::default();

        command.execute(&interaction, Some("a".into())).await;

        assert_eq!(
            interaction.sent(),
            vec![Sent::Private(
                "support command is not properly configured. Please contact an administrator."
                    .into()
            )]
        );
    }

    #[tokio::test]
    async fn unloaded_menu_is_not_configured() {
        let command = TopicCommand::new(
            "wiki",
            "Links to wiki topics",
            "TOPICBOT_TEST_EXEC_UNLOADED",
            formatters::link,
        );
        let interaction = MockInteraction::default();

        command.execute(&interaction, Some("a".into())).await;

        assert_eq!(
            interaction.sent(),
            vec![Sent::Private(
                "wiki command is not properly configured. Please contact an administrator.".into()
            )]
        );
    }

    #[tokio::test]
    async fn prompted_topic_is_sent() {
        let (command, _file) = loaded("TOPICBOT_TEST_EXEC_PROMPT", ONE_ENTRY);
        let interaction = MockInteraction::selecting("a");

        command.execute(&interaction, None).await;

        assert_eq!(
            interaction.sent(),
            vec![
                Sent::Prompt {
                    custom_id: "support-selector".into(),
                    values: vec!["a".into()],
                },
                Sent::Private("Support sent!".into()),
                Sent::Channel("x\ny".into()),
            ]
        );
    }

    #[tokio::test]
    async fn prompt_timeout_cancels_without_posting() {
        let (command, _file) = loaded("TOPICBOT_TEST_EXEC_TIMEOUT", ONE_ENTRY);
        let interaction = MockInteraction::default();

        command.execute(&interaction, None).await;

        assert_eq!(
            interaction.sent(),
            vec![
                Sent::Prompt {
                    custom_id: "support-selector".into(),
                    values: vec!["a".into()],
                },
                Sent::Private("No response received, canceling sending the support".into()),
            ]
        );
    }

    #[tokio::test]
    async fn prompt_on_unloaded_menu_asks_for_an_administrator() {
        let command = TopicCommand::new(
            "wiki",
            "Links to wiki topics",
            "TOPICBOT_TEST_EXEC_PROMPT_UNLOADED",
            formatters::link,
        );
        let interaction = MockInteraction::selecting("a");

        command.execute(&interaction, None).await;

        assert_eq!(
            interaction.sent(),
            vec![Sent::Private(
                "Unable to send wiki: Menu not properly initialized. Please contact an administrator."
                    .into()
            )]
        );
    }

    #[tokio::test]
    async fn failed_post_is_reported_with_its_cause() {
        let (command, _file) = loaded("TOPICBOT_TEST_EXEC_POST_FAIL", ONE_ENTRY);
        let interaction = MockInteraction::failing_channel();

        command.execute(&interaction, Some("a".into())).await;

        assert_eq!(
            interaction.sent(),
            vec![
                Sent::Private("Support sent!".into()),
                Sent::Private("Unable to send support: channel unavailable".into()),
            ]
        );
    }

    #[tokio::test]
    async fn link_command_renders_hyperlink() {
        let file = menu_file(
            r#"[{"label": "Docs", "description": "Getting started", "value": "docs", "href": "https://example.com"}]"#,
        );
        std::env::set_var("TOPICBOT_TEST_EXEC_LINK", file.path());
        let command = TopicCommand::new(
            "wiki",
            "Links to wiki topics",
            "TOPICBOT_TEST_EXEC_LINK",
            formatters::link,
        );
        command.menu().load().unwrap();
        let interaction = MockInteraction::default();

        command.execute(&interaction, Some("docs".into())).await;

        assert_eq!(
            interaction.sent(),
            vec![
                Sent::Private("Wiki sent!".into()),
                Sent::Channel(
                    "Check out the following link for more information: [Getting started](https://example.com)"
                        .into()
                ),
            ]
        );
    }

    #[tokio::test]
    async fn link_entry_without_href_is_not_posted() {
        let file = menu_file(r#"[{"label": "Docs", "description": "Getting started", "value": "docs"}]"#);
        std::env::set_var("TOPICBOT_TEST_EXEC_NO_HREF", file.path());
        let command = TopicCommand::new(
            "wiki",
            "Links to wiki topics",
            "TOPICBOT_TEST_EXEC_NO_HREF",
            formatters::link,
        );
        command.menu().load().unwrap();
        let interaction = MockInteraction::default();

        command.execute(&interaction, Some("docs".into())).await;

        assert_eq!(
            interaction.sent(),
            vec![Sent::Private("Unable to send wiki: entry docs has no link".into())]
        );
    }

    #[tokio::test]
    async fn unusable_selection_is_a_failure_not_a_timeout() {
        let (command, _file) = loaded("TOPICBOT_TEST_EXEC_BAD_SELECTION", ONE_ENTRY);
        let interaction = MockInteraction::failing_selection();

        command.execute(&interaction, None).await;

        assert_eq!(
            interaction.sent(),
            vec![
                Sent::Prompt {
                    custom_id: "support-selector".into(),
                    values: vec!["a".into()],
                },
                Sent::Private(
                    "Unable to send support: expected a string select interaction, got Button"
                        .into()
                ),
            ]
        );
    }

    #[test]
    fn capitalize_only_touches_the_first_letter() {
        assert_eq!(capitalize("support"), "Support");
        assert_eq!(capitalize("wiki"), "Wiki");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn poise_command_takes_the_definition() {
        let command = TopicCommand::new(
            "support",
            "Sends support prompts to help users provide more details",
            "TOPICBOT_TEST_POISE_COMMAND",
            formatters::lines,
        )
        .restricted_to(Permissions::MANAGE_MESSAGES)
        .to_poise_command();

        assert_eq!(command.name, "support");
        assert_eq!(command.qualified_name, "support");
        assert_eq!(
            command.description.as_deref(),
            Some("Sends support prompts to help users provide more details")
        );
        assert_eq!(
            command.parameters[0].description.as_deref(),
            Some("The name of the support topic to send")
        );
        assert_eq!(
            command.default_member_permissions,
            Permissions::MANAGE_MESSAGES
        );
    }

    #[test]
    fn topic_commands_have_a_per_user_cooldown() {
        for command in [
            TopicCommand::new("wiki", "Links", "TOPICBOT_TEST_COOLDOWN_WIKI", formatters::link),
            TopicCommand::new(
                "support",
                "Sends support prompts",
                "TOPICBOT_TEST_COOLDOWN_SUPPORT",
                formatters::lines,
            ),
        ] {
            let command = command.to_poise_command();

            assert_eq!(
                command.cooldown_config.read().unwrap().user,
                Some(Duration::from_secs(5))
            );
        }
    }

    #[test]
    fn unrestricted_commands_keep_default_permissions() {
        let command = TopicCommand::new("wiki", "Links", "TOPICBOT_TEST_POISE_OPEN", formatters::link)
            .to_poise_command();

        assert_eq!(command.default_member_permissions, Permissions::empty());
    }
}
