use sea_orm::DatabaseConnection;
use thiserror::Error;
use tracing::info;

use crate::{entity::prelude::*, ids::GroupId};

/// Longest slug the groups table accepts.
pub const MAX_SLUG_LEN: usize = 40;

#[derive(Debug, Error)]
pub enum GroupsServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),

    #[error("group not found")]
    GroupNotFound,

    #[error("invalid slug: {0:?}")]
    InvalidSlug(String),
}

#[derive(Clone)]
pub struct GroupsService {
    db: DatabaseConnection,
}

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= MAX_SLUG_LEN
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl GroupsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Groups are set up administratively; posts only ever reference them.
    pub async fn create_group(
        &self,
        title: &str,
        slug: &str,
        description: &str,
    ) -> Result<GroupModel, GroupsServiceError> {
        if !is_valid_slug(slug) {
            return Err(GroupsServiceError::InvalidSlug(slug.to_string()));
        }

        let group = GroupActiveModel {
            id: Set(GroupId::new()),
            title: Set(title.to_string()),
            slug: Set(slug.to_string()),
            description: Set(description.to_string()),
        };
        let group = Group::insert(group).exec_with_returning(&self.db).await?;
        info!(slug = %group.slug, "created group");

        Ok(group)
    }

    pub async fn get_group(&self, group_id: GroupId) -> Result<GroupModel, GroupsServiceError> {
        Group::find_by_id(group_id)
            .one(&self.db)
            .await?
            .ok_or(GroupsServiceError::GroupNotFound)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<GroupModel, GroupsServiceError> {
        Group::find()
            .filter(GroupColumn::Slug.eq(slug))
            .one(&self.db)
            .await?
            .ok_or(GroupsServiceError::GroupNotFound)
    }

    /// All groups by title, for the post form's group choices.
    pub async fn list_groups(&self) -> Result<Vec<GroupModel>, GroupsServiceError> {
        let groups = Group::find()
            .order_by_asc(GroupColumn::Title)
            .all(&self.db)
            .await?;

        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    #[tokio::test]
    async fn test_create_and_lookup_by_slug() {
        let db = test_utils::setup_test_db().await;
        let service = GroupsService::new(db);

        let group = service
            .create_group("Cats", "cats", "All about cats")
            .await
            .unwrap();
        let fetched = service.get_by_slug("cats").await.unwrap();
        assert_eq!(group, fetched);
        assert_eq!(fetched.to_string(), "Cats");

        let by_id = service.get_group(group.id).await.unwrap();
        assert_eq!(by_id.slug, "cats");
    }

    #[tokio::test]
    async fn test_unknown_slug_is_not_found() {
        let db = test_utils::setup_test_db().await;
        let service = GroupsService::new(db);

        let result = service.get_by_slug("unknown-slug").await;
        assert!(matches!(result, Err(GroupsServiceError::GroupNotFound)));
    }

    #[tokio::test]
    async fn test_slug_rules() {
        let db = test_utils::setup_test_db().await;
        let service = GroupsService::new(db);

        let too_long = "x".repeat(MAX_SLUG_LEN + 1);
        for slug in ["", "with space", "slash/y", too_long.as_str()] {
            let result = service.create_group("t", slug, "d").await;
            assert!(matches!(result, Err(GroupsServiceError::InvalidSlug(_))), "{slug}");
        }

        service.create_group("t", "ok_slug-1", "d").await.unwrap();
        let duplicate = service.create_group("t2", "ok_slug-1", "d").await;
        assert!(matches!(duplicate, Err(GroupsServiceError::DbError(_))));
    }

    #[tokio::test]
    async fn test_list_groups_sorted_by_title() {
        let db = test_utils::setup_test_db().await;
        let service = GroupsService::new(db);

        service.create_group("Zebras", "zebras", "").await.unwrap();
        service.create_group("Ants", "ants", "").await.unwrap();

        let titles: Vec<String> = service
            .list_groups()
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.title)
            .collect();
        assert_eq!(titles, vec!["Ants", "Zebras"]);
    }
}
