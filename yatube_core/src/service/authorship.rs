//! Ownership check gating post edits.

use crate::{entity::prelude::PostModel, ids::AuthorId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorship {
    Allow,
    Deny,
}

impl Authorship {
    pub fn is_allowed(self) -> bool {
        self == Authorship::Allow
    }
}

/// Only a post's own author may edit it. A denied edit is not an error:
/// callers send the visitor back to the post instead.
pub fn check(acting: AuthorId, post: &PostModel) -> Authorship {
    if post.author_id == acting {
        Authorship::Allow
    } else {
        Authorship::Deny
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{entity::now_timestamp, ids::PostId};

    fn post_by(author_id: AuthorId) -> PostModel {
        PostModel {
            id: PostId::new(),
            text: "text".to_string(),
            pub_date: now_timestamp(),
            author_id,
            group_id: None,
            image: None,
        }
    }

    #[test]
    fn author_is_allowed() {
        let author = AuthorId::new();
        assert_eq!(check(author, &post_by(author)), Authorship::Allow);
    }

    #[test]
    fn anyone_else_is_denied() {
        let post = post_by(AuthorId::new());
        let verdict = check(AuthorId::new(), &post);
        assert_eq!(verdict, Authorship::Deny);
        assert!(!verdict.is_allowed());
    }
}
