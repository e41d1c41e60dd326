use crate::models::{Post, User};

/// Case-insensitive substring filter over content, author name and author
/// title. A blank query is the identity; relative order is preserved.
pub fn filter_posts(posts: &[Post], query: &str) -> Vec<Post> {
    if query.trim().is_empty() {
        return posts.to_vec();
    }
    let needle = query.trim().to_lowercase();
    posts
        .iter()
        .filter(|post| {
            post.content.to_lowercase().contains(&needle)
                || matches_user(&post.user, &needle)
        })
        .cloned()
        .collect()
}

/// Filter the friends list by name or title; blank query keeps everyone.
pub fn filter_friends(friends: &[User], query: &str) -> Vec<User> {
    if query.trim().is_empty() {
        return friends.to_vec();
    }
    let needle = query.trim().to_lowercase();
    friends
        .iter()
        .filter(|friend| matches_user(friend, &needle))
        .cloned()
        .collect()
}

/// People search: never lists the signed-in user and shows nothing until
/// something is typed.
pub fn filter_users(users: &[User], query: &str, current_user_id: &str) -> Vec<User> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.trim().to_lowercase();
    users
        .iter()
        .filter(|user| user.id != current_user_id && matches_user(user, &needle))
        .cloned()
        .collect()
}

fn matches_user(user: &User, needle: &str) -> bool {
    user.name.to_lowercase().contains(needle)
        || user
            .title
            .as_deref()
            .is_some_and(|title| title.to_lowercase().contains(needle))
}
