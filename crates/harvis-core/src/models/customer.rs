//! Customer records shown on the onboarding dashboard.

use std::{path::Path, str::FromStr};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Dashboard status of a customer application.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CustomerStatus {
    InProgress,
    OnHold,
    Completed,
}

impl CustomerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::InProgress => "in-progress",
            CustomerStatus::OnHold => "on-hold",
            CustomerStatus::Completed => "completed",
        }
    }

    /// Badge text used in the customer table.
    pub fn label(&self) -> &'static str {
        match self {
            CustomerStatus::InProgress => "In Progress",
            CustomerStatus::OnHold => "On Hold",
            CustomerStatus::Completed => "Completed",
        }
    }
}

impl FromStr for CustomerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in-progress" | "in progress" => Ok(CustomerStatus::InProgress),
            "on-hold" | "on hold" => Ok(CustomerStatus::OnHold),
            "completed" => Ok(CustomerStatus::Completed),
            _ => Err(format!("Invalid customer status: {s}")),
        }
    }
}

/// A customer application under onboarding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    pub id: u64,
    pub company: String,
    pub application_id: String,
    pub submission_date: Date,
    pub current_stage: String,
    pub status: CustomerStatus,
    pub last_updated: Date,
}

/// Per-status totals for the dashboard header cards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CustomerCounts {
    pub total: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub on_hold: usize,
}

/// Accepted upload formats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Pdf,
    Doc,
    Docx,
    Jpeg,
    Png,
}

impl DocumentType {
    /// Resolves a document type from a MIME type.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        match media_type {
            "application/pdf" => Some(DocumentType::Pdf),
            "application/msword" => Some(DocumentType::Doc),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(DocumentType::Docx)
            }
            "image/jpeg" => Some(DocumentType::Jpeg),
            "image/png" => Some(DocumentType::Png),
            _ => None,
        }
    }

    /// Resolves a document type from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentType::Pdf),
            "doc" => Some(DocumentType::Doc),
            "docx" => Some(DocumentType::Docx),
            "jpg" | "jpeg" => Some(DocumentType::Jpeg),
            "png" => Some(DocumentType::Png),
            _ => None,
        }
    }
}

/// An uploaded identity document, as far as validation is concerned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadedDocument {
    pub file_name: String,
    /// `None` when the format is not one of the accepted types
    pub document_type: Option<DocumentType>,
    pub size_bytes: u64,
}

impl UploadedDocument {
    /// Largest accepted upload.
    pub const MAX_SIZE_BYTES: u64 = 10 * 1024 * 1024;

    /// Describes a file on disk without reading its contents.
    pub fn from_path(path: &Path, size_bytes: u64) -> Self {
        Self {
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            document_type: DocumentType::from_path(path),
            size_bytes,
        }
    }
}

/// Add-customer form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCustomer {
    pub company: String,
    pub document: Option<UploadedDocument>,
}
