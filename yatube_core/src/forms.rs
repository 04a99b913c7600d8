//! Typed submissions. Each form keeps the raw values it was posted with so a
//! rejected submission can be shown back to the author with its errors.

use bytes::Bytes;
use serde::Serialize;

use crate::{error::FieldErrors, ids::GroupId};

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";
pub const INVALID_IMAGE: &str =
    "Upload a valid image. The file you uploaded was either not an image or a corrupted image.";

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl ImageUpload {
    pub fn extension(&self) -> Option<String> {
        self.filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }

    fn looks_like_image(&self) -> bool {
        let type_ok = self
            .content_type
            .as_deref()
            .map_or(true, |ct| ct.starts_with("image/"));
        let ext_ok = self
            .extension()
            .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()));

        type_ok && ext_ok && !self.data.is_empty()
    }
}

/// What an edit does to the post's current image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageChange {
    Keep,
    Clear,
    Replace(ImageUpload),
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PostForm {
    pub text: String,
    /// Group id as posted; empty means "no group".
    pub group: Option<String>,
    #[serde(skip)]
    pub image: Option<ImageUpload>,
    #[serde(rename = "image-clear")]
    pub clear_image: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanPostForm {
    pub text: String,
    pub group_id: Option<GroupId>,
    pub image: ImageChange,
}

impl PostForm {
    pub fn clean(&self) -> Result<CleanPostForm, FieldErrors> {
        let mut errors = FieldErrors::default();

        let text = self.text.trim();
        if text.is_empty() {
            errors.add("text", REQUIRED);
        }

        let group_id = match self.group.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match raw.parse::<GroupId>() {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.add("group", INVALID_CHOICE);
                    None
                }
            },
        };

        let image = match &self.image {
            Some(upload) if !upload.looks_like_image() => {
                errors.add("image", INVALID_IMAGE);
                ImageChange::Keep
            }
            Some(upload) => ImageChange::Replace(upload.clone()),
            None if self.clear_image => ImageChange::Clear,
            None => ImageChange::Keep,
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CleanPostForm {
            text: text.to_string(),
            group_id,
            image,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CommentForm {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanCommentForm {
    pub text: String,
}

impl CommentForm {
    pub fn clean(&self) -> Result<CleanCommentForm, FieldErrors> {
        let text = self.text.trim();
        if text.is_empty() {
            let mut errors = FieldErrors::default();
            errors.add("text", REQUIRED);
            return Err(errors);
        }

        Ok(CleanCommentForm {
            text: text.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(name: &str) -> ImageUpload {
        ImageUpload {
            filename: name.to_string(),
            content_type: Some("image/png".to_string()),
            data: Bytes::from_static(b"\x89PNG\r\n\x1a\n"),
        }
    }

    #[test]
    fn blank_text_is_required() {
        for text in ["", "   ", "\n\t"] {
            let form = PostForm {
                text: text.to_string(),
                ..Default::default()
            };
            let errors = form.clean().unwrap_err();
            assert_eq!(errors.get("text"), Some(&[REQUIRED.to_string()][..]));
        }
    }

    #[test]
    fn text_is_trimmed_and_group_optional() {
        let form = PostForm {
            text: "  hello  ".to_string(),
            group: Some(String::new()),
            ..Default::default()
        };
        let clean = form.clean().unwrap();
        assert_eq!(clean.text, "hello");
        assert_eq!(clean.group_id, None);
        assert_eq!(clean.image, ImageChange::Keep);
    }

    #[test]
    fn malformed_group_is_an_invalid_choice() {
        let form = PostForm {
            text: "hello".to_string(),
            group: Some("not-an-id".to_string()),
            ..Default::default()
        };
        assert!(form.clean().unwrap_err().has("group"));
    }

    #[test]
    fn non_images_are_rejected() {
        let mut upload = png("notes.txt");
        upload.content_type = Some("text/plain".to_string());
        let form = PostForm {
            text: "hello".to_string(),
            image: Some(upload),
            ..Default::default()
        };
        assert!(form.clean().unwrap_err().has("image"));
    }

    #[test]
    fn image_upload_wins_over_clear() {
        let form = PostForm {
            text: "hello".to_string(),
            image: Some(png("cat.PNG")),
            clear_image: true,
            ..Default::default()
        };
        assert!(matches!(form.clean().unwrap().image, ImageChange::Replace(_)));

        let form = PostForm {
            text: "hello".to_string(),
            clear_image: true,
            ..Default::default()
        };
        assert_eq!(form.clean().unwrap().image, ImageChange::Clear);
    }

    #[test]
    fn comment_requires_text() {
        let form = CommentForm {
            text: " ".to_string(),
        };
        assert!(form.clean().unwrap_err().has("text"));

        let form = CommentForm {
            text: " nice post ".to_string(),
        };
        assert_eq!(form.clean().unwrap().text, "nice post");
    }
}
