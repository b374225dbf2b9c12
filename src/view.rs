use std::collections::HashSet;

use crate::post::{MediaKind, Post};

pub const SHARE_LABEL: &str = "↗ Share";
pub const COMMENT_PLACEHOLDER: &str = "Write a comment...";
pub const POSTED_AT_LABEL: &str = "just now";

/// Everything the render surface needs to draw one post.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostView {
    pub index: usize,
    pub avatar: String,
    pub author: String,
    pub text: Option<String>,
    pub media: Option<(String, MediaKind)>,
    pub liked: bool,
    pub like_label: String,
    pub comment_label: String,
    pub comments: Vec<String>,
    pub comments_expanded: bool,
}

impl PostView {
    pub fn from_post(index: usize, post: &Post, comments_expanded: bool) -> Self {
        let like_glyph = if post.liked_by_current_user { "❤️" } else { "♡" };

        PostView {
            index,
            avatar: post.avatar_glyph.clone(),
            author: post.author.clone(),
            text: Some(post.text.clone()).filter(|text| !text.trim().is_empty()),
            media: post
                .media_ref()
                .map(|(uri, kind)| (uri.to_owned(), kind)),
            liked: post.liked_by_current_user,
            like_label: format!("{} {}", like_glyph, post.like_count),
            comment_label: format!("💬 {}", post.comments.len()),
            comments: post.comments.clone(),
            comments_expanded,
        }
    }
}

/// Which posts have their comment panel open. Presentation state only; it is
/// never persisted and is not part of the store.
#[derive(Default, Debug)]
pub struct CommentPanels {
    expanded: HashSet<usize>,
}

impl CommentPanels {
    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }

    /// Flips the panel and returns whether it is now expanded.
    pub fn toggle(&mut self, index: usize) -> bool {
        if !self.expanded.remove(&index) {
            self.expanded.insert(index);
            true
        } else {
            false
        }
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }
}

pub fn post_views(posts: &[Post], panels: &CommentPanels) -> Vec<PostView> {
    posts
        .iter()
        .enumerate()
        .map(|(index, post)| PostView::from_post(index, post, panels.is_expanded(index)))
        .collect()
}
