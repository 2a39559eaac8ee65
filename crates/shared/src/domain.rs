use serde::{Deserialize, Serialize};

/// Storage key under which the theme preference lives.
pub const THEME_STORAGE_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Only the exact value `"dark"` selects dark mode; anything else, or
    /// nothing at all, falls back to light.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSurface {
    Link,
    Text,
    File,
}

impl InputSurface {
    pub const ALL: [InputSurface; 3] = [Self::Link, Self::Text, Self::File];

    /// Multipart field name the backend reads this surface from.
    pub fn form_field(self) -> &'static str {
        match self {
            Self::Link => "pubmed_link",
            Self::Text => "abstract_text",
            Self::File => "file",
        }
    }

    pub fn others(self) -> [InputSurface; 2] {
        match self {
            Self::Link => [Self::Text, Self::File],
            Self::Text => [Self::Link, Self::File],
            Self::File => [Self::Link, Self::Text],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: String,
    pub mime_type: Option<String>,
    pub contents: Vec<u8>,
}

/// The single source a submission carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionPayload {
    AbstractText(String),
    UploadedFile(UploadedFile),
    PubMedLink(String),
}

impl SubmissionPayload {
    pub fn surface(&self) -> InputSurface {
        match self {
            Self::AbstractText(_) => InputSurface::Text,
            Self::UploadedFile(_) => InputSurface::File,
            Self::PubMedLink(_) => InputSurface::Link,
        }
    }
}
