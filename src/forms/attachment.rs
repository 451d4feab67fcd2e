//! Attachment - In-Memory File Handles
//!
//! Files are held in memory between selection and submission. The only
//! client-side validation is the size guard at selection time; anything else
//! (type sniffing, scanning) is the backend's job.

use crate::api::client::DocumentPart;
use crate::constants::MAX_UPLOAD_BYTES;
use crate::error::{Error, Result};

/// One selected file
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Original file name
    pub filename: String,
    /// MIME type as reported at selection
    pub content_type: String,
    /// File contents
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Accept a selected file, rejecting anything over the size limit
    pub fn select(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self> {
        let filename = filename.into();
        let size = bytes.len() as u64;
        if size > MAX_UPLOAD_BYTES {
            return Err(Error::UploadTooLarge {
                name: filename,
                size,
                limit: MAX_UPLOAD_BYTES,
            });
        }
        Ok(Self {
            filename,
            content_type: content_type.into(),
            bytes,
        })
    }

    /// Convert to a multipart document part under the given field name
    pub fn into_part(self, field: &str) -> DocumentPart {
        DocumentPart {
            field: field.to_string(),
            filename: self.filename,
            content_type: self.content_type,
            bytes: self.bytes,
        }
    }
}

/// Fill an attachment slot from a selection; on rejection the slot keeps its
/// previous value and the error is returned for the user-facing alert
pub fn attach(
    slot: &mut Option<Attachment>,
    filename: impl Into<String>,
    content_type: impl Into<String>,
    bytes: Vec<u8>,
) -> Result<()> {
    *slot = Some(Attachment::select(filename, content_type, bytes)?);
    Ok(())
}
