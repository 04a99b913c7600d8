//! JSON view models handed to whatever renders the pages.

use serde::Serialize;
use yatube_core::{
    entity::prelude::GroupModel,
    error::FieldErrors,
    forms::PostForm,
    ids::{GroupId, PostId},
    service::listings::PostDetail,
};

/// A post page plus whether the viewer may open its edit form.
#[derive(Debug, Serialize)]
pub struct PostDetailView {
    #[serde(flatten)]
    pub detail: PostDetail,
    pub can_edit: bool,
}

#[derive(Debug, Serialize)]
pub struct GroupChoice {
    pub id: GroupId,
    pub title: String,
}

impl From<GroupModel> for GroupChoice {
    fn from(group: GroupModel) -> Self {
        GroupChoice {
            id: group.id,
            title: group.title,
        }
    }
}

/// The create/edit page: submitted values, their errors and the choices
/// the group field offers.
#[derive(Debug, Serialize)]
pub struct PostFormView {
    pub form: PostForm,
    pub errors: FieldErrors,
    pub groups: Vec<GroupChoice>,
    pub is_edit: bool,
    pub post_id: Option<PostId>,
    pub current_image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StaticPage {
    pub page: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub detail: &'static str,
}
