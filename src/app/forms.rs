//! Author input forms
//!
//! Forms trim their text fields and reject blank required values before
//! anything reaches the content model.

use crate::domain::content::ItemFields;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{field} must not be empty")]
    EmptyInput { field: &'static str },
}

fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::EmptyInput { field });
    }
    Ok(trimmed.to_string())
}

/// Module name dialog contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleForm {
    pub name: String,
}

impl ModuleForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the trimmed module name
    pub fn submit(&self) -> Result<String, FormError> {
        required(&self.name, "module name")
    }
}

/// Link dialog contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkForm {
    pub title: String,
    pub url: String,
}

impl LinkForm {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    pub fn submit(&self) -> Result<ItemFields, FormError> {
        let title = required(&self.title, "link title")?;
        let url = required(&self.url, "link url")?;
        Ok(ItemFields::link(title, url))
    }
}

/// A file picked in the upload dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

/// Upload dialog contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    pub title: String,
    pub file: Option<SelectedFile>,
}

impl UploadForm {
    pub fn new(title: impl Into<String>, file: Option<SelectedFile>) -> Self {
        Self {
            title: title.into(),
            file,
        }
    }

    pub fn submit(&self) -> Result<ItemFields, FormError> {
        let title = required(&self.title, "file title")?;
        let file = self
            .file
            .as_ref()
            .ok_or(FormError::EmptyInput { field: "file" })?;
        Ok(ItemFields::file(
            title,
            file.name.clone(),
            file.size,
            file.mime_type.clone(),
        ))
    }
}
