/// Sidebar sections, keyed by the `data-action` of their nav item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Home,
    Search,
    Explore,
    Reels,
    Messages,
    Notifications,
    Create,
    Profile,
    Menu,
}

pub const SECTIONS: [Section; 9] = [
    Section::Home,
    Section::Search,
    Section::Explore,
    Section::Reels,
    Section::Messages,
    Section::Notifications,
    Section::Create,
    Section::Profile,
    Section::Menu,
];

pub const MENU_ITEMS: [&str; 3] = ["Settings", "Saved", "Logout"];

impl Section {
    pub fn from_action(action: &str) -> Option<Self> {
        SECTIONS.iter().copied().find(|section| section.action() == action)
    }

    pub fn action(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Search => "search",
            Section::Explore => "explore",
            Section::Reels => "reels",
            Section::Messages => "messages",
            Section::Notifications => "notifications",
            Section::Create => "create",
            Section::Profile => "profile",
            Section::Menu => "menu",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Search => "Search",
            Section::Explore => "Explore",
            Section::Reels => "Reels",
            Section::Messages => "Messages",
            Section::Notifications => "Notifications",
            Section::Create => "Create",
            Section::Profile => "Profile",
            Section::Menu => "Menu",
        }
    }

    /// Sections that replace the feed with a titled placeholder card.
    pub fn placeholder_title(self) -> Option<&'static str> {
        match self {
            Section::Explore | Section::Reels | Section::Messages | Section::Notifications => {
                Some(self.label())
            }
            _ => None,
        }
    }
}

/// Label a follow button shows after being clicked.
pub fn toggle_follow_label(label: &str) -> &'static str {
    if label == "Follow" {
        "Following"
    } else {
        "Follow"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_round_trip() {
        for section in SECTIONS {
            assert_eq!(Section::from_action(section.action()), Some(section));
        }
        assert_eq!(Section::from_action("settings"), None);
    }

    #[test]
    fn placeholders() {
        assert_eq!(Section::Reels.placeholder_title(), Some("Reels"));
        assert_eq!(Section::Home.placeholder_title(), None);
        assert_eq!(Section::Profile.placeholder_title(), None);
    }

    #[test]
    fn follow_label() {
        assert_eq!(toggle_follow_label("Follow"), "Following");
        assert_eq!(toggle_follow_label("Following"), "Follow");
    }
}
