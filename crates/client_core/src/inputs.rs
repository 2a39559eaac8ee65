//! The three mutually exclusive submission sources.

use std::path::{Path, PathBuf};

use shared::domain::InputSurface;

pub const PLAIN_TEXT_MIME: &str = "text/plain";

/// A file chosen through the picker or dropped on the drop area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub path: PathBuf,
    pub name: String,
    pub mime_type: Option<String>,
}

impl FileHandle {
    /// Builds a handle whose MIME type is guessed from the file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = mime_guess::from_path(&path)
            .first()
            .map(|mime| mime.essence_str().to_string());
        Self {
            path,
            name,
            mime_type,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn is_plain_text(&self) -> bool {
        self.mime_type.as_deref() == Some(PLAIN_TEXT_MIME)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    pub value: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileField {
    pub selected: Option<FileHandle>,
    pub disabled: bool,
}

/// What a submission would carry right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSelection {
    Link(String),
    Text(String),
    File(FileHandle),
    Empty,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSurfaces {
    pub link: InputField,
    pub text: InputField,
    pub file: FileField,
}

impl InputSurfaces {
    pub fn is_disabled(&self, surface: InputSurface) -> bool {
        match surface {
            InputSurface::Link => self.link.disabled,
            InputSurface::Text => self.text.disabled,
            InputSurface::File => self.file.disabled,
        }
    }

    pub fn enabled_surfaces(&self) -> Vec<InputSurface> {
        InputSurface::ALL
            .into_iter()
            .filter(|surface| !self.is_disabled(*surface))
            .collect()
    }

    fn set_disabled(&mut self, surface: InputSurface, disabled: bool) {
        match surface {
            InputSurface::Link => self.link.disabled = disabled,
            InputSurface::Text => self.text.disabled = disabled,
            InputSurface::File => self.file.disabled = disabled,
        }
    }

    /// Disables the other two surfaces while `surface` holds something,
    /// re-enables them once it is empty again.
    fn claim(&mut self, surface: InputSurface, occupied: bool) {
        for other in surface.others() {
            self.set_disabled(other, occupied);
        }
    }

    pub fn set_link(&mut self, value: String) {
        let occupied = !value.trim().is_empty();
        self.link.value = value;
        self.claim(InputSurface::Link, occupied);
    }

    pub fn set_text(&mut self, value: String) {
        let occupied = !value.trim().is_empty();
        self.text.value = value;
        self.claim(InputSurface::Text, occupied);
    }

    pub fn select_file(&mut self, file: Option<FileHandle>) {
        let occupied = file.is_some();
        self.file.selected = file;
        self.claim(InputSurface::File, occupied);
    }

    /// Moves the contents of a read text file into the text field, leaving
    /// the text field as the one active surface.
    pub fn adopt_file_contents(&mut self, contents: String) {
        self.file.selected = None;
        self.text.disabled = false;
        self.set_text(contents);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn selection(&self) -> FormSelection {
        if !self.link.value.trim().is_empty() {
            FormSelection::Link(self.link.value.trim().to_string())
        } else if !self.text.value.trim().is_empty() {
            FormSelection::Text(self.text.value.clone())
        } else if let Some(file) = &self.file.selected {
            FormSelection::File(file.clone())
        } else {
            FormSelection::Empty
        }
    }
}
