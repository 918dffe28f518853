//! Form extractor for filename based conversion

use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header,
    Form,
};
use mdconvert_core::models::ConvertByFilenameForm;

use crate::error::HttpAppError;

/// Accepts `file_name` / `output_filename` either URL-encoded or as multipart form
/// fields. Rejections render as a 400 in the API error format.
#[derive(Debug, Clone)]
pub struct ConvertForm(pub ConvertByFilenameForm);

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.to_ascii_lowercase().starts_with("multipart/form-data"))
        .unwrap_or(false)
}

impl<S> FromRequest<S> for ConvertForm
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_multipart(&req) {
            let Form(form) = Form::<ConvertByFilenameForm>::from_request(req, state).await?;
            return Ok(ConvertForm(form));
        }

        let mut multipart = Multipart::from_request(req, state).await?;
        let mut form = ConvertByFilenameForm::default();
        while let Some(field) = multipart.next_field().await? {
            let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();
            match field_name.as_str() {
                "file_name" => form.file_name = field.text().await?,
                "output_filename" => form.output_filename = Some(field.text().await?),
                _ => {}
            }
        }
        Ok(ConvertForm(form))
    }
}
