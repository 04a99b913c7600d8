//! Builds typed forms from either urlencoded or multipart bodies.

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use yatube_core::forms::{CommentForm, ImageUpload, PostForm};

pub struct PostSubmission(pub PostForm);

fn assign(form: &mut PostForm, name: &str, value: String) {
    match name {
        "text" => form.text = value,
        "group" => form.group = Some(value),
        // Checkbox: present and not explicitly off.
        "image-clear" => form.clear_image = !matches!(value.as_str(), "" | "false" | "off" | "0"),
        _ => {}
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"))
}

#[async_trait]
impl<S> FromRequest<S> for PostSubmission
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut form = PostForm::default();

        if !is_multipart(&req) {
            let Form(fields) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            for (name, value) in fields {
                assign(&mut form, &name, value);
            }
            return Ok(PostSubmission(form));
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(IntoResponse::into_response)?
        {
            let name = field.name().unwrap_or_default().to_string();

            if name == "image" {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(IntoResponse::into_response)?;

                // Browsers send an empty part when no file was picked.
                if !filename.is_empty() || !data.is_empty() {
                    form.image = Some(ImageUpload {
                        filename,
                        content_type,
                        data,
                    });
                }
            } else {
                let value = field.text().await.map_err(IntoResponse::into_response)?;
                assign(&mut form, &name, value);
            }
        }

        Ok(PostSubmission(form))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CommentFields {
    #[serde(default)]
    pub text: String,
}

impl From<CommentFields> for CommentForm {
    fn from(fields: CommentFields) -> Self {
        CommentForm { text: fields.text }
    }
}
