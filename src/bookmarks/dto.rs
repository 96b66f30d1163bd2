use serde::{Deserialize, Serialize};

use crate::extract::{double_option, finish, require_non_empty, Validate};
use crate::store::{Bookmark, BookmarkChanges, NewBookmark};

/// Body for `POST /bookmarks`. There is no owner field; the owner comes from the token.
#[derive(Debug, Deserialize)]
pub struct CreateBookmarkRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl Validate for CreateBookmarkRequest {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();
        require_non_empty(&mut problems, "title", &self.title);
        finish(problems)
    }
}

impl From<CreateBookmarkRequest> for NewBookmark {
    fn from(r: CreateBookmarkRequest) -> Self {
        Self {
            title: r.title,
            description: r.description,
            link: r.link,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EditBookmarkRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub link: Option<Option<String>>,
}

impl Validate for EditBookmarkRequest {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();
        match &self.title {
            Some(Some(title)) => require_non_empty(&mut problems, "title", title),
            Some(None) => problems.push("title should not be null".into()),
            None => {}
        }
        finish(problems)
    }
}

impl From<EditBookmarkRequest> for BookmarkChanges {
    fn from(r: EditBookmarkRequest) -> Self {
        Self {
            title: r.title.flatten(),
            description: r.description,
            link: r.link,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookmarkList {
    pub total: usize,
    pub data: Vec<Bookmark>,
}

impl From<Vec<Bookmark>> for BookmarkList {
    fn from(data: Vec<Bookmark>) -> Self {
        Self {
            total: data.len(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_ignores_client_supplied_owner() {
        let req: CreateBookmarkRequest =
            serde_json::from_str(r#"{"title":"B","link":null,"authorId":99}"#).unwrap();
        assert_eq!(req.title, "B");
        assert_eq!(req.link, None);
        assert_eq!(req.description, None);
    }

    #[test]
    fn create_requires_a_title() {
        let req = CreateBookmarkRequest {
            title: " ".into(),
            description: None,
            link: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn edit_rejects_null_title() {
        let req: EditBookmarkRequest = serde_json::from_str(r#"{"title":null}"#).unwrap();
        assert_eq!(
            req.validate().unwrap_err(),
            vec!["title should not be null".to_string()]
        );
        let absent: EditBookmarkRequest = serde_json::from_str(r#"{"link":null}"#).unwrap();
        assert!(absent.validate().is_ok());
    }

    #[test]
    fn edit_distinguishes_null_from_absent() {
        let req: EditBookmarkRequest =
            serde_json::from_str(r#"{"title":"T","description":null}"#).unwrap();
        let changes = BookmarkChanges::from(req);
        assert_eq!(changes.title.as_deref(), Some("T"));
        assert_eq!(changes.description, Some(None));
        assert_eq!(changes.link, None);
    }
}
