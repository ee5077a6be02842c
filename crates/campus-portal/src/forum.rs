//! In-memory forum board.
//!
//! Publishing and commenting only touch the board held in memory; nothing is
//! persisted. New posts go to the top of the board, comments are appended to
//! their post.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::model::{Comment, ForumCategory, ForumPost};

/// Author used for posts published from this board.
pub const DEFAULT_AUTHOR: &str = "Étudiant Démo";

/// Author used for comments added from this board.
pub const DEFAULT_COMMENTER: &str = "Commentateur Démo";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForumError {
    #[error("Veuillez remplir le titre et le contenu du message.")]
    MissingFields,

    #[error("comment is empty")]
    EmptyComment,

    #[error("no forum post with id '{0}'")]
    UnknownPost(String),

    #[error("unknown forum category '{0}'")]
    UnknownCategory(String),
}

/// A post about to be published.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    /// `General` when unset.
    pub category: Option<ForumCategory>,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        PostDraft {
            title: title.into(),
            content: content.into(),
            category: None,
        }
    }

    pub fn category(mut self, category: ForumCategory) -> Self {
        self.category = Some(category);
        self
    }
}

/// Formats a point in time like the stored post dates
/// (`2024-03-05T10:00:00.000Z`).
fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The forum's posts, newest first.
#[derive(Debug, Clone)]
pub struct ForumBoard {
    posts: Vec<ForumPost>,
    author: String,
    commenter: String,
}

impl ForumBoard {
    pub fn new(posts: Vec<ForumPost>) -> Self {
        ForumBoard {
            posts,
            author: DEFAULT_AUTHOR.to_string(),
            commenter: DEFAULT_COMMENTER.to_string(),
        }
    }

    /// Sets the name signed on published posts.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Sets the name signed on comments.
    pub fn with_commenter(mut self, commenter: impl Into<String>) -> Self {
        self.commenter = commenter.into();
        self
    }

    pub fn posts(&self) -> &[ForumPost] {
        &self.posts
    }

    pub fn into_posts(self) -> Vec<ForumPost> {
        self.posts
    }

    pub fn get(&self, id: &str) -> Option<&ForumPost> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Publishes a draft dated now. See [`ForumBoard::publish_at`].
    pub fn publish(&mut self, draft: PostDraft) -> Result<&ForumPost, ForumError> {
        self.publish_at(draft, Utc::now())
    }

    /// Publishes a draft at the top of the board.
    ///
    /// Title and content must not be blank. The id is `f` followed by the new
    /// number of posts.
    pub fn publish_at(
        &mut self,
        draft: PostDraft,
        at: DateTime<Utc>,
    ) -> Result<&ForumPost, ForumError> {
        if draft.title.trim().is_empty() || draft.content.trim().is_empty() {
            return Err(ForumError::MissingFields);
        }

        let post = ForumPost {
            id: format!("f{}", self.posts.len() + 1),
            title: draft.title,
            content: draft.content,
            author: self.author.clone(),
            category: draft.category.unwrap_or_default(),
            date: iso_timestamp(at),
            comments: Vec::new(),
        };
        info!(id = %post.id, category = %post.category, "forum post published");

        self.posts.insert(0, post);
        Ok(&self.posts[0])
    }

    /// Comments on a post, dated now. See [`ForumBoard::comment_at`].
    pub fn comment(&mut self, post_id: &str, content: &str) -> Result<&Comment, ForumError> {
        self.comment_at(post_id, content, Utc::now())
    }

    /// Appends a comment to a post.
    ///
    /// The id is the post id, `c`, and the new number of comments.
    pub fn comment_at(
        &mut self,
        post_id: &str,
        content: &str,
        at: DateTime<Utc>,
    ) -> Result<&Comment, ForumError> {
        if content.trim().is_empty() {
            return Err(ForumError::EmptyComment);
        }
        let commenter = self.commenter.clone();
        let post = self
            .posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or_else(|| ForumError::UnknownPost(post_id.to_string()))?;

        let comment = Comment {
            id: format!("{}c{}", post.id, post.comments.len() + 1),
            post_id: post.id.clone(),
            author: commenter,
            content: content.to_string(),
            date: iso_timestamp(at),
        };
        debug!(post = %post.id, id = %comment.id, "comment added");

        post.comments.push(comment);
        let last = post.comments.len() - 1;
        Ok(&post.comments[last])
    }
}
