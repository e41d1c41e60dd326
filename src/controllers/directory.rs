use crate::models::{Session, User, CURRENT_USER_ID};

/// Every user the session knows about, deduplicated by id: the signed-in
/// user first, then post authors, comment authors, friends and invite
/// senders in traversal order. A later sighting of an id replaces the
/// earlier snapshot in place.
pub fn all_users(session: &Session) -> Vec<User> {
    let mut users: Vec<User> = Vec::new();
    upsert(&mut users, &session.current_user);
    for post in &session.posts {
        upsert(&mut users, &post.user);
        for comment in &post.comments {
            upsert(&mut users, &comment.user);
        }
    }
    for friend in &session.friends {
        upsert(&mut users, friend);
    }
    for request in &session.friend_requests {
        upsert(&mut users, &request.from);
    }
    users
}

fn upsert(users: &mut Vec<User>, user: &User) {
    match users.iter_mut().find(|u| u.id == user.id) {
        Some(slot) => *slot = user.clone(),
        None => users.push(user.clone()),
    }
}

/// An empty id, the signed-in user's id and the `"current"` alias all
/// resolve to the signed-in user; anything else goes through the directory.
pub fn resolve_user(session: &Session, user_id: &str) -> Option<User> {
    if user_id.is_empty()
        || user_id == session.current_user.id
        || user_id == CURRENT_USER_ID
    {
        return Some(session.current_user.clone());
    }
    all_users(session).into_iter().find(|u| u.id == user_id)
}
