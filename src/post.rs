use crate::error::{FeedError, Result};

#[derive(Hash, Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classifies a declared MIME type the way the file picker reports it
    /// (`image/png`, `video/mp4`, ...). Anything else is unsupported.
    pub fn from_mime_type(mime_type: &str) -> Option<Self> {
        if mime_type.starts_with("image") {
            Some(MediaKind::Image)
        } else if mime_type.starts_with("video") {
            Some(MediaKind::Video)
        } else {
            None
        }
    }
}

#[derive(Hash, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub avatar: String,
}

impl Author {
    pub fn new(name: &str, avatar: &str) -> Self {
        Author {
            name: name.to_owned(),
            avatar: avatar.to_owned(),
        }
    }
}

/// A media reference attached to a post. The uri is usually a session-scoped
/// object URL and may not resolve after a reload.
#[derive(Hash, Clone, Debug, PartialEq, Eq)]
pub struct Media {
    pub uri: String,
    pub kind: Option<MediaKind>,
}

impl Media {
    pub fn new(uri: &str, kind: MediaKind) -> Self {
        Media {
            uri: uri.to_owned(),
            kind: Some(kind),
        }
    }
}

// Field names match the `socialfeed_posts` records written by earlier
// versions of the page.
#[derive(Hash, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    #[serde(rename = "name")]
    pub author: String,
    #[serde(rename = "avatar")]
    pub avatar_glyph: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub media: Option<String>,
    #[serde(rename = "mediaType", default)]
    pub media_kind: Option<MediaKind>,
    #[serde(rename = "likes", default)]
    pub like_count: u64,
    #[serde(rename = "liked", default)]
    pub liked_by_current_user: bool,
    #[serde(default)]
    pub comments: Vec<String>,
}

impl Post {
    pub fn new(author: &Author, text: &str, media: Option<Media>) -> Result<Self> {
        let text = text.trim();

        let (media, media_kind) = match media {
            Some(Media { uri, kind: Some(kind) }) => (Some(uri), Some(kind)),
            Some(Media { kind: None, .. }) => {
                return Err(FeedError::Validation(
                    "media must be an image or a video".into(),
                ))
            }
            None => (None, None),
        };

        let post = Post {
            author: author.name.clone(),
            avatar_glyph: author.avatar.clone(),
            text: text.to_owned(),
            media,
            media_kind,
            like_count: 0,
            liked_by_current_user: false,
            comments: Vec::new(),
        };
        post.validate()?;

        Ok(post)
    }

    /// Checks the invariants every stored post has to hold.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() && self.media_ref().is_none() {
            return Err(FeedError::Validation(
                "a post needs text or an image/video".into(),
            ));
        }
        if self.media.is_some() && self.media_kind.is_none() {
            return Err(FeedError::Validation(
                "media must be an image or a video".into(),
            ));
        }
        if self.liked_by_current_user && self.like_count == 0 {
            return Err(FeedError::Validation(
                "liked post with a like count of zero".into(),
            ));
        }
        Ok(())
    }

    pub fn media_ref(&self) -> Option<(&str, MediaKind)> {
        match (&self.media, self.media_kind) {
            (Some(uri), Some(kind)) => Some((uri.as_str(), kind)),
            _ => None,
        }
    }

    pub fn toggle_like(&mut self) {
        if self.liked_by_current_user {
            self.liked_by_current_user = false;
            self.like_count = self.like_count.saturating_sub(1);
        } else {
            self.liked_by_current_user = true;
            self.like_count += 1;
        }
    }
}
