use crate::controllers::directory;
use crate::models::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendStatus {
    Friend,
    Pending,
    None,
}

/// Add a directory-known user to the friends list. Unknown ids and
/// existing friends are no-ops.
pub fn add_friend(session: &mut Session, user_id: &str) {
    if session.friends.iter().any(|f| f.id == user_id) {
        return;
    }
    if let Some(user) = directory::all_users(session).into_iter().find(|u| u.id == user_id) {
        session.friends.push(user);
    }
}

pub fn remove_friend(session: &mut Session, user_id: &str) {
    session.friends.retain(|f| f.id != user_id);
}

/// Accepting moves the sender into the friends list and drops the request.
pub fn accept_request(session: &mut Session, request_id: &str) {
    if let Some(pos) = session
        .friend_requests
        .iter()
        .position(|r| r.id == request_id)
    {
        let request = session.friend_requests.remove(pos);
        session.friends.push(request.from);
    }
}

pub fn reject_request(session: &mut Session, request_id: &str) {
    session.friend_requests.retain(|r| r.id != request_id);
}

/// Friend status wins over a pending invite when both would match.
pub fn status_of(session: &Session, user_id: &str) -> FriendStatus {
    if session.friends.iter().any(|f| f.id == user_id) {
        FriendStatus::Friend
    } else if session
        .friend_requests
        .iter()
        .any(|r| r.from.id == user_id)
    {
        FriendStatus::Pending
    } else {
        FriendStatus::None
    }
}
