use log::{debug, warn};

use crate::error::{FeedError, Result};
use crate::post::{Author, Media, MediaKind};
use crate::slot::PersistenceSlot;
use crate::store::PostStore;
use crate::view::{post_views, CommentPanels, PostView};

pub const SHARE_CONFIRMATION: &str = "Post copied!";
pub const UNSUPPORTED_MEDIA_WARNING: &str = "Only image or video allowed";

/// A file picked by the user: a session-scoped object URL and the MIME type
/// the browser declared for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaSelection {
    pub uri: String,
    pub mime_type: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedEvent {
    Like(usize),
    ToggleComments(usize),
    Share(usize),
    DeleteComment(usize, usize),
    SubmitComment(usize, String),
    SubmitPost {
        text: String,
        media: Option<MediaSelection>,
    },
}

impl FeedEvent {
    /// Decodes a click target from its `data-*` attribute.
    pub fn from_click_data(attribute: &str, value: &str) -> Option<Self> {
        match attribute {
            "like" => value.parse().ok().map(FeedEvent::Like),
            "comment" => value.parse().ok().map(FeedEvent::ToggleComments),
            "share" => value.parse().ok().map(FeedEvent::Share),
            "delcomment" => {
                let (post, comment) = value.split_once('-')?;
                Some(FeedEvent::DeleteComment(
                    post.parse().ok()?,
                    comment.parse().ok()?,
                ))
            }
            _ => None,
        }
    }
}

/// What the render surface has to do after an event was handled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Nothing,
    Rerender(Vec<PostView>),
    PanelToggled { index: usize, expanded: bool },
    CopyToClipboard(String),
    /// A comment was added; clear its input, then redraw.
    CommentAdded(Vec<PostView>),
    /// A post was created; clear the composer, then redraw.
    PostCreated(Vec<PostView>),
    Warn(String),
}

pub struct FeedPresenter<S: PersistenceSlot> {
    store: PostStore<S>,
    current_user: Author,
    panels: CommentPanels,
}

impl<S: PersistenceSlot> FeedPresenter<S> {
    pub fn new(store: PostStore<S>, current_user: Author) -> Self {
        FeedPresenter {
            store,
            current_user,
            panels: CommentPanels::default(),
        }
    }

    pub fn store(&self) -> &PostStore<S> {
        &self.store
    }

    /// Fresh view-models for a full redraw. Every full redraw starts with all
    /// comment panels collapsed.
    pub fn render(&mut self) -> Vec<PostView> {
        self.panels.collapse_all();
        post_views(self.store.posts(), &self.panels)
    }

    pub fn handle(&mut self, event: FeedEvent) -> Result<Outcome> {
        debug!("feed event {:?}", event);

        match event {
            FeedEvent::Like(index) => {
                self.store.toggle_like(index)?;
                Ok(Outcome::Rerender(self.render()))
            }
            FeedEvent::ToggleComments(index) => {
                self.store.post(index)?;
                let expanded = self.panels.toggle(index);
                Ok(Outcome::PanelToggled { index, expanded })
            }
            FeedEvent::Share(index) => Ok(Outcome::CopyToClipboard(self.store.share_text(index)?)),
            FeedEvent::DeleteComment(post_index, comment_index) => {
                self.store.delete_comment(post_index, comment_index)?;
                Ok(Outcome::Rerender(self.render()))
            }
            FeedEvent::SubmitComment(index, value) => {
                if value.trim().is_empty() {
                    return Ok(Outcome::Nothing);
                }
                self.store.add_comment(index, &value)?;
                Ok(Outcome::CommentAdded(self.render()))
            }
            FeedEvent::SubmitPost { text, media } => self.submit_post(&text, media),
        }
    }

    fn submit_post(&mut self, text: &str, media: Option<MediaSelection>) -> Result<Outcome> {
        if text.trim().is_empty() && media.is_none() {
            return Ok(Outcome::Nothing);
        }

        let media = match media {
            Some(selection) => match MediaKind::from_mime_type(&selection.mime_type) {
                Some(kind) => Some(Media::new(&selection.uri, kind)),
                None => {
                    warn!("rejected media of type {:?}", selection.mime_type);
                    return Ok(Outcome::Warn(UNSUPPORTED_MEDIA_WARNING.to_owned()));
                }
            },
            None => None,
        };

        let author = self.current_user.clone();
        self.store.create_post(&author, text, media)?;
        Ok(Outcome::PostCreated(self.render()))
    }
}

/// Message shown to the user when an interaction fails.
pub fn user_message(err: &FeedError) -> String {
    match err {
        FeedError::Validation(msg) => msg.clone(),
        FeedError::Index { .. } => "That post is no longer available.".to_owned(),
        FeedError::Persistence(_) => "Could not save your changes.".to_owned(),
        FeedError::PersistenceRead(_) => "Could not read saved posts.".to_owned(),
        FeedError::Clipboard(_) => "Could not copy the post.".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::MemorySlot;

    const KEY: &str = "socialfeed_posts";

    fn presenter() -> FeedPresenter<MemorySlot> {
        FeedPresenter::new(
            PostStore::open(MemorySlot::new(), KEY),
            Author::new("You", "Y"),
        )
    }

    fn post(presenter: &mut FeedPresenter<MemorySlot>, text: &str) -> Outcome {
        presenter
            .handle(FeedEvent::SubmitPost {
                text: text.to_owned(),
                media: None,
            })
            .unwrap()
    }

    fn selection(mime_type: &str) -> Option<MediaSelection> {
        Some(MediaSelection {
            uri: "blob:f".into(),
            mime_type: mime_type.into(),
        })
    }

    #[test]
    fn decodes_click_data() {
        assert_eq!(FeedEvent::from_click_data("like", "2"), Some(FeedEvent::Like(2)));
        assert_eq!(
            FeedEvent::from_click_data("comment", "0"),
            Some(FeedEvent::ToggleComments(0))
        );
        assert_eq!(FeedEvent::from_click_data("share", "7"), Some(FeedEvent::Share(7)));
        assert_eq!(
            FeedEvent::from_click_data("delcomment", "1-4"),
            Some(FeedEvent::DeleteComment(1, 4))
        );
        assert_eq!(FeedEvent::from_click_data("delcomment", "14"), None);
        assert_eq!(FeedEvent::from_click_data("like", "x"), None);
        assert_eq!(FeedEvent::from_click_data("input", "0"), None);
    }

    #[test]
    fn submit_post_as_current_user() {
        let mut presenter = presenter();
        match post(&mut presenter, " Hello world ") {
            Outcome::PostCreated(views) => {
                assert_eq!(views.len(), 1);
                assert_eq!(views[0].author, "You");
                assert_eq!(views[0].avatar, "Y");
                assert_eq!(views[0].text.as_deref(), Some("Hello world"));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn empty_submit_does_nothing() {
        let mut presenter = presenter();
        assert_eq!(post(&mut presenter, "   "), Outcome::Nothing);
        assert!(presenter.store().is_empty());
    }

    #[test]
    fn unsupported_media_warns() {
        let mut presenter = presenter();
        let outcome = presenter
            .handle(FeedEvent::SubmitPost {
                text: "with a pdf".into(),
                media: selection("application/pdf"),
            })
            .unwrap();

        assert_eq!(outcome, Outcome::Warn(UNSUPPORTED_MEDIA_WARNING.into()));
        assert!(presenter.store().is_empty());
    }

    #[test]
    fn media_only_post() {
        let mut presenter = presenter();
        let outcome = presenter
            .handle(FeedEvent::SubmitPost {
                text: String::new(),
                media: selection("video/mp4"),
            })
            .unwrap();

        match outcome {
            Outcome::PostCreated(views) => {
                assert_eq!(views[0].media, Some(("blob:f".into(), MediaKind::Video)))
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn like_rerenders() {
        let mut presenter = presenter();
        post(&mut presenter, "a");

        match presenter.handle(FeedEvent::Like(0)).unwrap() {
            Outcome::Rerender(views) => assert_eq!(views[0].like_label, "❤️ 1"),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn share_copies_text() {
        let mut presenter = presenter();
        post(&mut presenter, "share me");

        assert_eq!(
            presenter.handle(FeedEvent::Share(0)).unwrap(),
            Outcome::CopyToClipboard("share me".into())
        );
    }

    #[test]
    fn panels_collapse_on_rerender() {
        let mut presenter = presenter();
        post(&mut presenter, "a");
        post(&mut presenter, "b");

        assert_eq!(
            presenter.handle(FeedEvent::ToggleComments(1)).unwrap(),
            Outcome::PanelToggled {
                index: 1,
                expanded: true
            }
        );

        match presenter.handle(FeedEvent::Like(0)).unwrap() {
            Outcome::Rerender(views) => assert!(views.iter().all(|v| !v.comments_expanded)),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(
            presenter.handle(FeedEvent::ToggleComments(1)).unwrap(),
            Outcome::PanelToggled {
                index: 1,
                expanded: true
            }
        );
    }

    #[test]
    fn comments_round_trip() {
        let mut presenter = presenter();
        post(&mut presenter, "a");

        assert_eq!(
            presenter
                .handle(FeedEvent::SubmitComment(0, "  ".into()))
                .unwrap(),
            Outcome::Nothing
        );
        assert!(matches!(
            presenter.handle(FeedEvent::SubmitComment(0, "nice".into())),
            Ok(Outcome::CommentAdded(_))
        ));
        assert_eq!(presenter.store().posts()[0].comments, vec!["nice"]);

        presenter.handle(FeedEvent::DeleteComment(0, 0)).unwrap();
        assert!(presenter.store().posts()[0].comments.is_empty());
    }

    #[test]
    fn bad_indices_fail() {
        let mut presenter = presenter();
        for event in [
            FeedEvent::Like(0),
            FeedEvent::ToggleComments(0),
            FeedEvent::Share(0),
            FeedEvent::DeleteComment(0, 0),
            FeedEvent::SubmitComment(0, "x".into()),
        ] {
            let err = presenter.handle(event).unwrap_err();
            assert!(matches!(err, FeedError::Index { .. }));
            assert_eq!(user_message(&err), "That post is no longer available.");
        }
    }
}
