use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize};

pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Opaque backend identifier. Numbers and strings are both accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TodoId(String);

impl TodoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TodoId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for TodoId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for TodoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TodoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Unsigned(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(value) => Self(value.to_string()),
            RawId::Unsigned(value) => Self(value.to_string()),
            RawId::Text(value) => Self(value),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub done: bool,
}

impl Todo {
    /// Description to display, `None` when missing or blank.
    pub fn visible_description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|description| !description.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
}

impl NewTodo {
    pub fn from_input(title: &str, description: &str) -> Result<Self, TodoValidationError> {
        let fields = validate_fields(title, description)?;
        Ok(Self {
            title: fields.title,
            description: fields.description,
        })
    }
}

/// Partial update body; absent fields are left out of the JSON entirely.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

impl TodoPatch {
    pub fn done(done: bool) -> Self {
        Self {
            done: Some(done),
            ..Self::default()
        }
    }

    pub fn content(title: &str, description: &str) -> Result<Self, TodoValidationError> {
        let fields = validate_fields(title, description)?;
        Ok(Self {
            title: Some(fields.title),
            description: Some(fields.description),
            done: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TodoValidationError {
    #[error("title is required")]
    EmptyTitle,

    #[error("title exceeds {max} characters ({actual})")]
    TitleTooLong { actual: usize, max: usize },

    #[error("description exceeds {max} characters ({actual})")]
    DescriptionTooLong { actual: usize, max: usize },
}

struct ValidFields {
    title: String,
    description: Option<String>,
}

fn validate_fields(title: &str, description: &str) -> Result<ValidFields, TodoValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TodoValidationError::EmptyTitle);
    }

    let title_chars = title.chars().count();
    if title_chars > TITLE_MAX_CHARS {
        return Err(TodoValidationError::TitleTooLong {
            actual: title_chars,
            max: TITLE_MAX_CHARS,
        });
    }

    let description = description.trim();
    let description_chars = description.chars().count();
    if description_chars > DESCRIPTION_MAX_CHARS {
        return Err(TodoValidationError::DescriptionTooLong {
            actual: description_chars,
            max: DESCRIPTION_MAX_CHARS,
        });
    }

    Ok(ValidFields {
        title: title.to_owned(),
        description: (!description.is_empty()).then(|| description.to_owned()),
    })
}
