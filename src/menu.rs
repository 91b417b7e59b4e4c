//! loading, caching and prompting for the topic menus backing `/wiki` and `/support`.
//!
//! a [`MenuHelper`] owns the snapshot of one menu file. the snapshot is swapped as a
//! whole on every successful load, so a command that grabbed it through
//! [`MenuHelper::menu_items`] keeps a consistent view even if the file is reloaded
//! halfway through the invocation.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock},
    time::Duration,
};

use poise::serenity_prelude::{CreateSelectMenu, CreateSelectMenuKind, CreateSelectMenuOption};

use crate::{
    constants::{MAX_MENU_OPTIONS, SELECTION_TIMEOUT},
    formatters::FormatError,
    interaction::TopicInteraction,
    models::topic::TopicEntry,
    Error,
};

mod watch;

#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    #[error("environment variable {var} is not set")]
    Configuration { var: String },
    #[error("failed to read menu items from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse menu items from {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Menu not properly initialized. Please contact an administrator.")]
    Uninitialized,
    #[error("no selection received within {}s", .0.as_secs())]
    SelectionTimeout(Duration),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("{0}")]
    Interaction(Error),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuOption {
    pub label: String,
    pub description: String,
    pub value: String,
}

impl From<&TopicEntry> for MenuOption {
    fn from(entry: &TopicEntry) -> Self {
        Self {
            label: entry.label.clone(),
            description: entry.description.clone(),
            value: entry.value.clone(),
        }
    }
}

/// every entry of a menu file plus the options shown in the dropdown, in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuSnapshot {
    entries: Vec<TopicEntry>,
    options: Vec<MenuOption>,
}

impl MenuSnapshot {
    pub fn new(entries: Vec<TopicEntry>) -> Self {
        let options = entries.iter().map(MenuOption::from).collect();

        Self { entries, options }
    }

    pub fn entries(&self) -> &[TopicEntry] {
        &self.entries
    }

    pub fn options(&self) -> &[MenuOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// first entry whose `value` is exactly `value`.
    pub fn lookup(&self, value: &str) -> Option<&TopicEntry> {
        self.entries.iter().find(|entry| entry.value == value)
    }
}

/// the dropdown sent to a user, built from the current snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicMenu {
    pub custom_id: String,
    pub placeholder: String,
    pub options: Vec<MenuOption>,
}

impl TopicMenu {
    pub fn to_select_menu(&self) -> CreateSelectMenu {
        let options = self
            .options
            .iter()
            .map(|option| {
                CreateSelectMenuOption::new(&option.label, &option.value)
                    .description(&option.description)
            })
            .collect();

        CreateSelectMenu::new(&self.custom_id, CreateSelectMenuKind::String { options })
            .placeholder(&self.placeholder)
    }
}

pub struct MenuHelper {
    name: String,
    env_var: String,
    custom_id: String,
    placeholder: String,
    snapshot: RwLock<Option<Arc<MenuSnapshot>>>,
}

impl MenuHelper {
    pub fn new(name: impl Into<String>, env_var: impl Into<String>) -> Self {
        let name = name.into();

        Self {
            custom_id: format!("{name}-selector"),
            placeholder: format!("Select a {name} topic"),
            env_var: env_var.into(),
            snapshot: RwLock::new(None),
            name,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// path of the menu file, read from the configured environment variable.
    pub fn source_path(&self) -> Result<PathBuf, MenuError> {
        match std::env::var(&self.env_var) {
            Ok(path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
            _ => Err(MenuError::Configuration {
                var: self.env_var.clone(),
            }),
        }
    }

    /// reads the menu file and swaps in the new snapshot.
    ///
    /// on failure the previous snapshot, if any, stays in place.
    #[tracing::instrument(skip(self), fields(menu = %self.name))]
    pub fn load(&self) -> Result<(), MenuError> {
        let path = self
            .source_path()
            .inspect_err(|e| tracing::error!(err = %e, "unable to load menu items"))?;

        tracing::debug!(path = %path.display(), "loading menu items");

        let snapshot = read_snapshot(&path).inspect_err(|e| {
            tracing::error!(
                err = ?e,
                path = %path.display(),
                "failed to load menu items, keeping the previously loaded ones"
            )
        })?;

        if let Some(hidden) = snapshot
            .entries()
            .get(MAX_MENU_OPTIONS..)
            .filter(|hidden| !hidden.is_empty())
        {
            let hidden = hidden
                .iter()
                .map(|entry| entry.value.as_str())
                .collect::<Vec<_>>()
                .join(", ");

            tracing::warn!(
                count = snapshot.len(),
                %hidden,
                "menu has more entries than discord can show, only the first {} will be selectable",
                MAX_MENU_OPTIONS
            );
        }

        tracing::info!(count = snapshot.len(), path = %path.display(), "loaded menu items");

        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(snapshot));

        Ok(())
    }

    /// the current snapshot, or `None` if no load has succeeded yet.
    pub fn menu_items(&self) -> Option<Arc<MenuSnapshot>> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// the dropdown for the current snapshot. `None` when there is nothing to pick from.
    pub fn menu(&self) -> Option<TopicMenu> {
        let snapshot = self.menu_items().filter(|snapshot| !snapshot.is_empty())?;

        Some(TopicMenu {
            custom_id: self.custom_id.clone(),
            placeholder: self.placeholder.clone(),
            options: snapshot
                .options()
                .iter()
                .take(MAX_MENU_OPTIONS)
                .cloned()
                .collect(),
        })
    }

    /// shows the dropdown and waits for the invoking user to pick a topic.
    pub async fn prompt_for_topic<I>(&self, interaction: &I) -> Result<String, MenuError>
    where
        I: TopicInteraction + ?Sized,
    {
        let menu = self.menu().ok_or(MenuError::Uninitialized)?;

        interaction
            .send_prompt(&menu)
            .await
            .map_err(MenuError::Interaction)?;

        interaction
            .await_selection(&menu, SELECTION_TIMEOUT)
            .await
            .map_err(MenuError::Interaction)?
            .ok_or(MenuError::SelectionTimeout(SELECTION_TIMEOUT))
    }
}

fn read_snapshot(path: &Path) -> Result<MenuSnapshot, MenuError> {
    let raw = std::fs::read_to_string(path).map_err(|source| MenuError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let entries: Vec<TopicEntry> =
        serde_json::from_str(&raw).map_err(|source| MenuError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(MenuSnapshot::new(entries))
}
