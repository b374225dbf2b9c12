use crate::post::Author;
use crate::{
    CURRENT_USER_AVATAR, CURRENT_USER_NAME, POSTS_LOCAL_STORAGE_KEY, ROOT_ELEMENT_SELECTOR,
    SUGGESTED_PROFILES, THEME_LOCAL_STORAGE_KEY,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedConfig {
    pub posts_key: String,
    pub theme_key: String,
    pub root_selector: String,
    pub current_user: Author,
    pub suggested_profiles: Vec<String>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig {
            posts_key: POSTS_LOCAL_STORAGE_KEY.to_owned(),
            theme_key: THEME_LOCAL_STORAGE_KEY.to_owned(),
            root_selector: ROOT_ELEMENT_SELECTOR.to_owned(),
            current_user: Author::new(CURRENT_USER_NAME, CURRENT_USER_AVATAR),
            suggested_profiles: SUGGESTED_PROFILES.iter().map(|name| name.to_string()).collect(),
        }
    }
}
