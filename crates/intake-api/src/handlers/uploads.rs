use crate::error::{HttpAppError, ValidatedMultipart};
use crate::handlers::Flash;
use crate::state::AppState;
use crate::utils::upload::read_multipart_form;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use intake_core::models::{Intake, UploadForm, UploadFormResponse, UploadResponse};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

pub const DOCUMENT_ADDED: &str = "The document was added!";

#[derive(Debug, Serialize)]
pub struct UploadListResponse {
    pub uploads: Vec<UploadResponse>,
}

#[derive(Debug, Serialize)]
pub struct UploadFormPage {
    pub upload: UploadFormResponse,
    pub errors: BTreeMap<&'static str, Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct UploadCreatedResponse {
    pub flash: Flash,
    pub upload: UploadResponse,
}

pub async fn list_uploads(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UploadListResponse>, HttpAppError> {
    let uploads = state.documents.list().await?;

    Ok(Json(UploadListResponse {
        uploads: uploads.into_iter().map(UploadResponse::from).collect(),
    }))
}

pub async fn new_upload() -> Json<UploadFormPage> {
    Json(UploadFormPage {
        upload: UploadFormResponse::from(&UploadForm::default()),
        errors: BTreeMap::new(),
    })
}

pub async fn create_upload(
    State(state): State<Arc<AppState>>,
    ValidatedMultipart(multipart): ValidatedMultipart,
) -> Result<Response, HttpAppError> {
    let mut submitted = read_multipart_form(multipart).await?;
    let form = UploadForm::new(
        submitted.text("uploader_name"),
        submitted.take_file("document"),
    );

    let response = match state.documents.create(form).await? {
        Intake::Created(upload) => (
            StatusCode::SEE_OTHER,
            [(header::LOCATION, "/uploads")],
            Json(UploadCreatedResponse {
                flash: Flash {
                    success: DOCUMENT_ADDED,
                },
                upload: upload.into(),
            }),
        )
            .into_response(),
        Intake::Rejected { form, errors } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(UploadFormPage {
                upload: UploadFormResponse::from(&form),
                errors: errors.to_map(),
            }),
        )
            .into_response(),
    };

    Ok(response)
}
