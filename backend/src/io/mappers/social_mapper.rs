//! Mappers for the social feed: posts, comments and bookmarks.

use shared::{Bookmark, BookmarkRow, Comment, CommentRow, Post, PostRow};

use super::EntityMapper;

pub struct PostMapper;

impl EntityMapper for PostMapper {
    type Row = PostRow;
    type Model = Post;

    const NAME: &'static str = "post";
    const DATE_FIELDS: &'static [&'static str] = &["createdAt", "updatedAt"];
    const JSON_FIELDS: &'static [&'static str] = &["mediaUrls", "tags"];
}

pub struct CommentMapper;

impl EntityMapper for CommentMapper {
    type Row = CommentRow;
    type Model = Comment;

    const NAME: &'static str = "comment";
    const DATE_FIELDS: &'static [&'static str] = &["createdAt", "updatedAt"];
}

pub struct BookmarkMapper;

impl EntityMapper for BookmarkMapper {
    type Row = BookmarkRow;
    type Model = Bookmark;

    const NAME: &'static str = "bookmark";
    const DATE_FIELDS: &'static [&'static str] = &["createdAt"];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MappingError;
    use chrono::{TimeZone, Utc};

    fn sample_post_row() -> PostRow {
        PostRow {
            id: "post-1".to_string(),
            author_id: "user-1".to_string(),
            business_id: Some("biz-1".to_string()),
            content: "Grand opening this Saturday!".to_string(),
            media_urls: Some("[\"https://cdn.example.com/a.jpg\"]".to_string()),
            tags: Some("[\"food\",\"atlanta\"]".to_string()),
            like_count: 12,
            comment_count: 3,
            is_pinned: false,
            created_at: "2024-03-01T09:00:00Z".to_string(),
            updated_at: "2024-03-01T09:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_post_to_model() {
        let post = PostMapper::to_model(&sample_post_row()).unwrap();

        assert_eq!(post.business_id.as_deref(), Some("biz-1"));
        assert_eq!(post.media_urls, Some(vec!["https://cdn.example.com/a.jpg".to_string()]));
        assert_eq!(post.tags, Some(vec!["food".to_string(), "atlanta".to_string()]));
        assert_eq!(post.like_count, 12);
        assert_eq!(post.created_at, Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_post_bidirectional_conversion() {
        let row = sample_post_row();
        let post = PostMapper::to_model(&row).unwrap();
        assert_eq!(PostMapper::to_row(&post).unwrap(), row);
    }

    #[test]
    fn test_post_without_media() {
        let row = PostRow {
            media_urls: None,
            tags: Some(String::new()),
            ..sample_post_row()
        };

        let post = PostMapper::to_model(&row).unwrap();
        assert_eq!(post.media_urls, None);
        assert_eq!(post.tags, None);
    }

    #[test]
    fn test_post_with_bad_timestamp_does_not_fit_model() {
        let row = PostRow {
            created_at: "last tuesday".to_string(),
            ..sample_post_row()
        };

        // The raw text survives mapping but cannot fill a timestamp field.
        let err = PostMapper::to_model(&row).unwrap_err();
        assert!(matches!(err, MappingError::Shape(_)));
    }

    #[test]
    fn test_comment_list_conversion() {
        let rows = vec![
            CommentRow {
                id: "c1".to_string(),
                post_id: "post-1".to_string(),
                author_id: "user-2".to_string(),
                parent_id: None,
                content: "Congrats!".to_string(),
                created_at: "2024-03-01T10:00:00Z".to_string(),
                updated_at: "2024-03-01T10:00:00Z".to_string(),
            },
            CommentRow {
                id: "c2".to_string(),
                post_id: "post-1".to_string(),
                author_id: "user-1".to_string(),
                parent_id: Some("c1".to_string()),
                content: "Thank you!".to_string(),
                created_at: "2024-03-01 10:05:00+00".to_string(),
                updated_at: "2024-03-01 10:05:00+00".to_string(),
            },
        ];

        let comments = CommentMapper::to_models(&rows).unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[1].parent_id.as_deref(), Some("c1"));
        assert_eq!(
            comments[1].created_at,
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 5, 0).unwrap()
        );

        // Postgres-style timestamps come back normalized.
        let rows_back = CommentMapper::to_rows(&comments).unwrap();
        assert_eq!(rows_back[1].created_at, "2024-03-01T10:05:00Z");
    }

    #[test]
    fn test_bookmark_to_model() {
        let row = BookmarkRow {
            id: "bm-1".to_string(),
            post_id: "post-1".to_string(),
            user_id: "user-3".to_string(),
            created_at: "2024-03-02T00:00:00Z".to_string(),
        };

        let bookmark = BookmarkMapper::to_model(&row).unwrap();
        assert_eq!(bookmark.user_id, "user-3");
        assert_eq!(BookmarkMapper::to_row(&bookmark).unwrap(), row);
    }
}
