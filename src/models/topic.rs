use serde::{Deserialize, Serialize};

/// one selectable record from a topic menu file.
///
/// `content` is used by the plain topic commands, `href` and `preamble` by the
/// link commands. none of them are required when parsing; the formatter of the
/// command decides what gets rendered.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct TopicEntry {
    pub label: String,
    pub description: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<TopicContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preamble: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum TopicContent {
    Text(String),
    Lines(Vec<String>),
}
