//! Two-Phase Submission
//!
//! Phase 1 POSTs the structured payload and obtains the record id; phase 2
//! uploads any selected documents tagged with that id. A phase-2 failure
//! leaves the created record without documents: there is no compensating
//! rollback, the outcome is surfaced as `PartialSubmission` and the user must
//! resubmit (the payload's correlation id lets the backend dedup).

use crate::api::client::{ApiClient, CreatedResponse, DocumentPart};
use crate::api::resources::paths;
use crate::domain::record::RecordId;
use crate::error::{Error, Result};
use crate::forms::associate::AssociateForm;
use crate::forms::volunteer::VolunteerForm;

/// Submit an associate application
pub async fn submit_associate(api: &ApiClient, form: &AssociateForm) -> Result<RecordId> {
    let payload = form.build_payload();
    submit(api, paths::ASSOCIATES, &payload, form.attachments()).await
}

/// Submit a volunteer application
pub async fn submit_volunteer(api: &ApiClient, form: &VolunteerForm) -> Result<RecordId> {
    let payload = form.build_payload();
    submit(api, paths::VOLUNTEERS, &payload, form.attachments()).await
}

async fn submit<P: serde::Serialize>(
    api: &ApiClient,
    path: &str,
    payload: &P,
    files: Vec<DocumentPart>,
) -> Result<RecordId> {
    let created: CreatedResponse = api.post(path, payload).await?;
    let record_id = created.id;
    tracing::info!("Application created with id {record_id}");

    if !files.is_empty() {
        if let Err(err) = api
            .upload_documents(path, &record_id.to_string(), files)
            .await
        {
            tracing::error!("Document upload for {record_id} failed: {err}");
            return Err(Error::PartialSubmission {
                record_id: record_id.to_string(),
                message: err.to_string(),
            });
        }
    }

    Ok(record_id)
}
