use serde::{Deserialize, Serialize};

/// Id the seed data assigns to the signed-in user before any stable id
/// exists. Resolution treats it as an alias for the signed-in user.
pub const CURRENT_USER_ID: &str = "current";

/// A member of the network. Copies embedded in posts, comments and friend
/// requests are snapshots taken at write time, not live references, so a
/// later profile edit does not rewrite them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
}

/// Partial profile form: only the supplied fields are merged into the
/// signed-in user. The id and avatar are not editable.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
}

impl User {
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if update.title.is_some() {
            self.title = update.title;
        }
        if update.bio.is_some() {
            self.bio = update.bio;
        }
        if update.location.is_some() {
            self.location = update.location;
        }
        if update.website.is_some() {
            self.website = update.website;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn someone() -> User {
        User {
            id: "u9".to_string(),
            name: "Ala".to_string(),
            avatar: "https://example.com/a.png".to_string(),
            title: Some("Developer".to_string()),
            bio: None,
            location: None,
            website: None,
        }
    }

    #[test]
    fn apply_merges_only_supplied_fields() {
        let mut user = someone();
        user.apply(ProfileUpdate {
            bio: Some("Hello".to_string()),
            ..ProfileUpdate::default()
        });
        assert_eq!(user.bio.as_deref(), Some("Hello"));
        assert_eq!(user.name, "Ala");
        assert_eq!(user.title.as_deref(), Some("Developer"));
    }

    #[test]
    fn apply_never_touches_the_id() {
        let mut user = someone();
        user.apply(ProfileUpdate {
            name: Some("Ola".to_string()),
            ..ProfileUpdate::default()
        });
        assert_eq!(user.id, "u9");
        assert_eq!(user.name, "Ola");
    }
}
