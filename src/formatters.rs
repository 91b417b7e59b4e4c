//! renderers turning a [`TopicEntry`] into the message posted to the channel.

use crate::models::topic::{TopicContent, TopicEntry};

pub static DEFAULT_LINK_PREAMBLE: &str = "Check out the following link for more information:";

/// an entry lacking the field its command renders.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("entry {value} has no content")]
    MissingContent { value: String },
    #[error("entry {value} has no link")]
    MissingHref { value: String },
}

/// joins list content with newlines, passes plain text through.
pub fn lines(entry: &TopicEntry) -> Result<String, FormatError> {
    match &entry.content {
        Some(TopicContent::Lines(lines)) => Ok(lines.join("\n")),
        Some(TopicContent::Text(text)) => Ok(text.clone()),
        None => Err(FormatError::MissingContent {
            value: entry.value.clone(),
        }),
    }
}

/// renders `<preamble> [<description>](<href>)`.
pub fn link(entry: &TopicEntry) -> Result<String, FormatError> {
    let preamble = entry.preamble.as_deref().unwrap_or(DEFAULT_LINK_PREAMBLE);

    let href = entry
        .href
        .as_deref()
        .filter(|href| !href.trim().is_empty())
        .ok_or_else(|| FormatError::MissingHref {
            value: entry.value.clone(),
        })?;

    Ok(format!("{} {}", preamble, hyperlink(&entry.description, href)))
}

fn hyperlink(text: &str, url: &str) -> String {
    format!("[{text}]({url})")
}
