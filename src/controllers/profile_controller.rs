use crate::error::FeedtuiError;
use crate::models::{ProfileUpdate, Session, User};

/// Shallow-merge the supplied fields into the signed-in user. Snapshots
/// already embedded in posts and comments are left as they were.
pub fn update_profile(session: &mut Session, update: ProfileUpdate) {
    session.current_user.apply(update);
}

/// The editable profile as a JSON form for the external editor.
pub fn profile_form(user: &User) -> Result<String, FeedtuiError> {
    let form = ProfileUpdate {
        name: Some(user.name.clone()),
        title: user.title.clone(),
        bio: user.bio.clone(),
        location: user.location.clone(),
        website: user.website.clone(),
    };
    Ok(serde_json::to_string_pretty(&form)?)
}

pub fn parse_profile_form(text: &str) -> Result<ProfileUpdate, FeedtuiError> {
    Ok(serde_json::from_str(text)?)
}
