//! `POST /process-image`: one exam page in, its text out.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info};
use uuid::Uuid;

use paperforge_core::{CompletionRequest, ProcessImageResponse, UploadRequest};
use paperforge_logging::{redact_sensitive_data, EventLogger, RequestEvent};
use paperforge_understanding::{build_prompt, clean_completion, resolve_image_mime};

use crate::error::ProcessError;
use crate::server::GatewayState;

pub const FILE_FIELD: &str = "file";
pub const SECTION_FIELD: &str = "section";

/// Handler for `POST /process-image`.
///
/// The multipart rejection is taken as a value so a malformed body still gets
/// the regular error reply instead of axum's plain-text rejection.
pub async fn process_image(
    State(state): State<Arc<GatewayState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let request_id = Uuid::new_v4().to_string();

    let upload = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err(e) => return fail(&state, &request_id, "", e),
    };

    info!(
        request_id = %request_id,
        section = %upload.section,
        bytes = upload.image.len(),
        mime = %upload.content_type,
        "Processing page"
    );
    EventLogger::log_event(
        &request_id,
        RequestEvent::Received {
            section: upload.section.clone(),
            image_bytes: upload.image.len(),
            mime_type: upload.content_type.clone(),
        },
    );

    match extract(&state, &upload).await {
        Ok((text, provider, model, latency_ms)) => {
            EventLogger::log_event(
                &request_id,
                RequestEvent::Completed {
                    section: upload.section.clone(),
                    provider,
                    model,
                    text_chars: text.chars().count(),
                    latency_ms,
                },
            );
            Json(ProcessImageResponse { text }).into_response()
        }
        Err(e) => fail(&state, &request_id, &upload.section, e),
    }
}

fn fail(state: &GatewayState, request_id: &str, section: &str, err: ProcessError) -> Response {
    let message = redact_sensitive_data(&err.to_string());
    error!(request_id = %request_id, section = %section, error = %message, "Error processing image");
    EventLogger::log_event(
        request_id,
        RequestEvent::Failed {
            section: section.to_string(),
            error_msg: message,
        },
    );
    err.into_reply(state.strict_errors)
}

/// Pull `file` and `section` out of the form. Unknown fields are skipped.
async fn read_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<UploadRequest, ProcessError> {
    let mut multipart = multipart.map_err(|e| ProcessError::Upload(e.to_string()))?;

    let mut file = None;
    let mut section = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ProcessError::Upload(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            FILE_FIELD => {
                let declared = field.content_type().map(str::to_owned);
                let filename = field.file_name().map(str::to_owned);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ProcessError::Upload(e.to_string()))?;
                file = Some((bytes, declared, filename));
            }
            SECTION_FIELD => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ProcessError::Upload(e.to_string()))?;
                section = Some(text);
            }
            _ => {}
        }
    }

    let (image, declared, filename) = file.ok_or(ProcessError::MissingField(FILE_FIELD))?;
    let section = section.ok_or(ProcessError::MissingField(SECTION_FIELD))?;

    if image.is_empty() {
        return Err(ProcessError::Upload("uploaded file is empty".into()));
    }

    let content_type = resolve_image_mime(declared.as_deref(), filename.as_deref(), &image);
    Ok(UploadRequest {
        image,
        content_type,
        section,
    })
}

/// Returns the cleaned text with provider, model and latency for logging.
async fn extract(
    state: &GatewayState,
    upload: &UploadRequest,
) -> Result<(String, String, String, u64), ProcessError> {
    let provider = state
        .provider
        .as_ref()
        .ok_or_else(|| ProcessError::NotConfigured(state.provider_name.clone()))?;

    let prompt = build_prompt(state.include_section.then_some(upload.section.as_str()));
    let request = CompletionRequest::new(prompt, upload.image.clone(), upload.content_type.clone())
        .with_temperature(state.temperature)
        .with_max_tokens(state.max_tokens);

    let response = provider.extract_text(&request).await?;
    Ok((
        clean_completion(&response.text),
        response.provider,
        response.model,
        response.latency_ms,
    ))
}
