use std::collections::HashSet;

use crate::post::Post;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub username: String,
    pub avatar: String,
}

/// One profile per distinct author, in feed order.
pub fn profiles(posts: &[Post]) -> Vec<Profile> {
    let mut seen = HashSet::new();

    posts
        .iter()
        .map(|post| Profile {
            username: post.author.to_lowercase(),
            avatar: post.avatar_glyph.clone(),
        })
        .filter(|profile| seen.insert(profile.username.clone()))
        .collect()
}

/// Case-insensitive substring match on the username. An empty query matches
/// every profile.
pub fn search_profiles(posts: &[Post], query: &str) -> Vec<Profile> {
    let query = query.to_lowercase();

    profiles(posts)
        .into_iter()
        .filter(|profile| profile.username.contains(&query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::Author;

    fn posts() -> Vec<Post> {
        [("Ana", "A"), ("You", "Y"), ("ana", "a"), ("Bob", "B")]
            .iter()
            .map(|(name, avatar)| Post::new(&Author::new(name, avatar), "x", None).unwrap())
            .collect()
    }

    fn usernames(profiles: Vec<Profile>) -> Vec<String> {
        profiles.into_iter().map(|p| p.username).collect()
    }

    #[test]
    fn deduplicates_authors() {
        let profiles = profiles(&posts());
        assert_eq!(usernames(profiles.clone()), vec!["ana", "you", "bob"]);
        assert_eq!(profiles[0].avatar, "A");
    }

    #[test]
    fn case_insensitive_match() {
        assert_eq!(usernames(search_profiles(&posts(), "AN")), vec!["ana"]);
        assert_eq!(usernames(search_profiles(&posts(), "o")), vec!["you", "bob"]);
        assert_eq!(search_profiles(&posts(), "").len(), 3);
        assert!(search_profiles(&posts(), "zed").is_empty());
    }
}
