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
use intake_core::models::{Intake, PhotoForm, PhotoFormResponse, PhotoResponse};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

pub const PHOTO_ADDED: &str = "The photo was added!";

#[derive(Debug, Serialize)]
pub struct PhotoListResponse {
    pub photos: Vec<PhotoResponse>,
}

#[derive(Debug, Serialize)]
pub struct PhotoFormPage {
    pub photo: PhotoFormResponse,
    pub errors: BTreeMap<&'static str, Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct PhotoCreatedResponse {
    pub flash: Flash,
    pub photo: PhotoResponse,
}

pub async fn list_photos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PhotoListResponse>, HttpAppError> {
    let photos = state.photos.list().await?;

    Ok(Json(PhotoListResponse {
        photos: photos.into_iter().map(PhotoResponse::from).collect(),
    }))
}

pub async fn new_photo() -> Json<PhotoFormPage> {
    Json(PhotoFormPage {
        photo: PhotoFormResponse::from(&PhotoForm::default()),
        errors: BTreeMap::new(),
    })
}

pub async fn create_photo(
    State(state): State<Arc<AppState>>,
    ValidatedMultipart(multipart): ValidatedMultipart,
) -> Result<Response, HttpAppError> {
    let mut submitted = read_multipart_form(multipart).await?;
    let form = PhotoForm::new(submitted.text("title"), submitted.take_file("image"));

    match state.photos.create(form).await? {
        Intake::Created(photo) => Ok((
            StatusCode::SEE_OTHER,
            [(header::LOCATION, "/")],
            Json(PhotoCreatedResponse {
                flash: Flash {
                    success: PHOTO_ADDED,
                },
                photo: photo.into(),
            }),
        )
            .into_response()),
        Intake::Rejected { form, errors } => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(PhotoFormPage {
                photo: PhotoFormResponse::from(&form),
                errors: errors.to_map(),
            }),
        )
            .into_response()),
    }
}
