//! Icon classification for items
//!
//! Links get the link icon; files are classified by the lower-cased
//! extension after the last `.` in the file name.

use crate::domain::content::{Item, ItemPayload};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemIcon {
    Link,
    Image,
    Pdf,
    Document,
    Spreadsheet,
    Video,
    Audio,
    GenericFile,
}

impl ItemIcon {
    pub fn for_item(item: &Item) -> Self {
        match &item.payload {
            ItemPayload::Link { .. } => ItemIcon::Link,
            ItemPayload::File { file_name, .. } => Self::for_file_name(file_name),
        }
    }

    pub fn for_file_name(file_name: &str) -> Self {
        // A name without a dot is taken whole as the extension
        let extension = file_name.rsplit('.').next().unwrap_or_default().to_lowercase();
        match extension.as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "svg" => ItemIcon::Image,
            "pdf" => ItemIcon::Pdf,
            "doc" | "docx" => ItemIcon::Document,
            "xls" | "xlsx" => ItemIcon::Spreadsheet,
            "mp4" | "mov" | "webm" => ItemIcon::Video,
            "mp3" | "wav" | "ogg" => ItemIcon::Audio,
            _ => ItemIcon::GenericFile,
        }
    }
}
