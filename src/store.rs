use log::{debug, warn};

use crate::error::{FeedError, Result};
use crate::post::{Author, Media, Post};
use crate::slot::PersistenceSlot;

/// Shown and copied when a shared post has no text of its own.
pub const SHARE_FALLBACK_TEXT: &str = "Post";

/// Sole owner of the feed. Posts are kept newest-first and every successful
/// mutation is written to the slot before the call returns.
pub struct PostStore<S: PersistenceSlot> {
    slot: S,
    key: String,
    posts: Vec<Post>,
}

impl<S: PersistenceSlot> PostStore<S> {
    /// Opens the store, reading whatever the slot holds under `key`.
    pub fn open(slot: S, key: &str) -> Self {
        let mut store = PostStore {
            slot,
            key: key.to_owned(),
            posts: Vec::new(),
        };
        store.posts = store.load();
        store
    }

    /// Reads the persisted feed. Missing or malformed data yields an empty feed.
    pub fn load(&self) -> Vec<Post> {
        match self.try_load() {
            Ok(posts) => posts,
            Err(err) => {
                warn!("discarding stored posts under {:?}: {}", self.key, err);
                Vec::new()
            }
        }
    }

    fn try_load(&self) -> Result<Vec<Post>> {
        let data = match self.slot.read(&self.key)? {
            Some(data) => data,
            None => return Ok(Vec::new()),
        };
        // the page script stored `null` before any post existed
        let posts: Option<Vec<Post>> = serde_json::from_str(&data)?;
        let posts = posts
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .filter_map(|(index, post)| match post.validate() {
                Ok(()) => Some(post),
                Err(err) => {
                    warn!("dropping stored post {}: {}", index, err);
                    None
                }
            })
            .collect();

        Ok(posts)
    }

    /// Overwrites the slot with the whole in-memory feed.
    pub fn save(&self) -> Result<()> {
        let data = serde_json::to_string(&self.posts)
            .map_err(|err| FeedError::Persistence(err.to_string()))?;
        self.slot.write(&self.key, &data)?;
        debug!("saved {} posts", self.posts.len());
        Ok(())
    }

    /// Applies `mutate` and persists, restoring the previous feed if either fails.
    fn commit<T>(&mut self, mutate: impl FnOnce(&mut Vec<Post>) -> Result<T>) -> Result<T> {
        let previous = self.posts.clone();
        let result = mutate(&mut self.posts).and_then(|value| {
            self.save()?;
            Ok(value)
        });
        if result.is_err() {
            self.posts = previous;
        }
        result
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, index: usize) -> Result<&Post> {
        self.posts
            .get(index)
            .ok_or_else(|| FeedError::post_index(index, self.posts.len()))
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    pub fn create_post(&mut self, author: &Author, text: &str, media: Option<Media>) -> Result<&Post> {
        let post = Post::new(author, text, media)?;

        self.commit(move |posts| {
            posts.insert(0, post);
            Ok(())
        })?;
        debug!("created post by {}, feed has {} posts", author.name, self.posts.len());

        Ok(&self.posts[0])
    }

    pub fn toggle_like(&mut self, index: usize) -> Result<()> {
        self.commit(|posts| {
            let len = posts.len();
            let post = posts
                .get_mut(index)
                .ok_or_else(|| FeedError::post_index(index, len))?;
            post.toggle_like();
            debug!(
                "post {} liked={} likes={}",
                index, post.liked_by_current_user, post.like_count
            );
            Ok(())
        })
    }

    pub fn add_comment(&mut self, index: usize, text: &str) -> Result<()> {
        self.post(index)?;

        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        self.commit(|posts| {
            posts[index].comments.push(text.to_owned());
            debug!("post {} now has {} comments", index, posts[index].comments.len());
            Ok(())
        })
    }

    pub fn delete_comment(&mut self, post_index: usize, comment_index: usize) -> Result<()> {
        self.commit(|posts| {
            let len = posts.len();
            let comments = &mut posts
                .get_mut(post_index)
                .ok_or_else(|| FeedError::post_index(post_index, len))?
                .comments;
            if comment_index >= comments.len() {
                return Err(FeedError::comment_index(comment_index, comments.len()));
            }
            comments.remove(comment_index);
            debug!("deleted comment {} of post {}", comment_index, post_index);
            Ok(())
        })
    }

    pub fn share_text(&self, index: usize) -> Result<String> {
        let post = self.post(index)?;
        if post.text.trim().is_empty() {
            Ok(SHARE_FALLBACK_TEXT.to_owned())
        } else {
            Ok(post.text.clone())
        }
    }
}
