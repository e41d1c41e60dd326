use chrono::Utc;
use uuid::Uuid;

use crate::models::{non_empty, Comment, FileAttachment, Post, Session};

/// Prepend a post authored by the signed-in user. A post with neither text
/// nor media is a no-op; the feed stays newest-first.
pub fn create_post(
    session: &mut Session,
    content: String,
    images: Vec<String>,
    files: Vec<FileAttachment>,
) {
    if content.trim().is_empty() && images.is_empty() && files.is_empty() {
        return;
    }
    let post = Post {
        id: Uuid::new_v4().to_string(),
        user: session.current_user.clone(),
        content,
        images: non_empty(images),
        files: non_empty(files),
        timestamp: Utc::now(),
        likes: 0,
        liked_by_user: false,
        comments: Vec::new(),
    };
    session.posts.insert(0, post);
}

/// Flip the signed-in user's like on a post. Likes never go below zero.
pub fn toggle_like(session: &mut Session, post_id: &str) {
    if let Some(post) = find_post(session, post_id) {
        if post.liked_by_user {
            post.likes = post.likes.saturating_sub(1);
        } else {
            post.likes += 1;
        }
        post.liked_by_user = !post.liked_by_user;
    }
}

/// Append a comment (oldest-first) authored by the signed-in user. Unknown
/// post or blank content is a no-op.
pub fn add_comment(session: &mut Session, post_id: &str, content: String) {
    if content.trim().is_empty() {
        return;
    }
    let author = session.current_user.clone();
    if let Some(post) = find_post(session, post_id) {
        post.comments.push(Comment {
            id: Uuid::new_v4().to_string(),
            user: author,
            content,
            timestamp: Utc::now(),
            likes: 0,
        });
    }
}

/// Comments have no unlike: every matched call adds exactly one like.
pub fn like_comment(session: &mut Session, post_id: &str, comment_id: &str) {
    if let Some(post) = find_post(session, post_id) {
        if let Some(comment) = post.comments.iter_mut().find(|c| c.id == comment_id) {
            comment.likes += 1;
        }
    }
}

/// Full replace of a post's content and media; author, likes, comments and
/// timestamp stay untouched. Editing never deletes, see [`delete_post`].
pub fn edit_post(
    session: &mut Session,
    post_id: &str,
    content: String,
    images: Vec<String>,
    files: Vec<FileAttachment>,
) {
    if let Some(post) = find_post(session, post_id) {
        post.content = content;
        post.images = non_empty(images);
        post.files = non_empty(files);
    }
}

pub fn delete_post(session: &mut Session, post_id: &str) {
    session.posts.retain(|p| p.id != post_id);
}

fn find_post<'a>(session: &'a mut Session, post_id: &str) -> Option<&'a mut Post> {
    session.posts.iter_mut().find(|p| p.id == post_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_post_prepends_a_fresh_entry() {
        let mut session = Session::seed();
        create_post(&mut session, "hello".to_string(), Vec::new(), Vec::new());

        let post = &session.posts[0];
        assert_eq!(post.content, "hello");
        assert_eq!(post.likes, 0);
        assert!(!post.liked_by_user);
        assert!(post.comments.is_empty());
        assert_eq!(post.user.id, session.current_user.id);
        assert_eq!(post.images, None);
        assert_eq!(post.files, None);
    }

    #[test]
    fn create_post_without_text_or_media_is_a_noop() {
        let mut session = Session::seed();
        let before = session.posts.len();
        create_post(&mut session, "   \n".to_string(), Vec::new(), Vec::new());
        assert_eq!(session.posts.len(), before);
    }

    #[test]
    fn media_only_post_is_allowed() {
        let mut session = Session::seed();
        create_post(
            &mut session,
            String::new(),
            vec!["https://example.com/p.png".to_string()],
            Vec::new(),
        );
        assert_eq!(
            session.posts[0].images.as_ref().map(Vec::len),
            Some(1)
        );
    }

    #[test]
    fn toggle_like_is_an_involution() {
        let mut session = Session::seed();
        session.posts[0].likes = 5;
        session.posts[0].liked_by_user = false;
        let id = session.posts[0].id.clone();

        toggle_like(&mut session, &id);
        assert_eq!(session.posts[0].likes, 6);
        assert!(session.posts[0].liked_by_user);

        toggle_like(&mut session, &id);
        assert_eq!(session.posts[0].likes, 5);
        assert!(!session.posts[0].liked_by_user);
    }

    #[test]
    fn unlike_floors_at_zero() {
        let mut session = Session::seed();
        session.posts[0].likes = 0;
        session.posts[0].liked_by_user = true;
        let id = session.posts[0].id.clone();

        toggle_like(&mut session, &id);
        assert_eq!(session.posts[0].likes, 0);
        assert!(!session.posts[0].liked_by_user);
    }

    #[test]
    fn toggle_like_on_unknown_post_is_a_noop() {
        let mut session = Session::seed();
        let before = session.posts.clone();
        toggle_like(&mut session, "nope");
        assert_eq!(session.posts, before);
    }

    #[test]
    fn comments_append_oldest_first() {
        let mut session = Session::seed();
        add_comment(&mut session, "1", "first".to_string());
        add_comment(&mut session, "1", "second".to_string());

        let comments = &session.posts[0].comments;
        // "1" already carried one seed comment
        assert_eq!(comments.len(), 3);
        assert_eq!(comments[1].content, "first");
        assert_eq!(comments[2].content, "second");
        assert_eq!(comments[2].user.id, session.current_user.id);
    }

    #[test]
    fn blank_or_misaddressed_comment_is_a_noop() {
        let mut session = Session::seed();
        add_comment(&mut session, "1", "  ".to_string());
        add_comment(&mut session, "nope", "hello".to_string());
        assert_eq!(session.posts[0].comments.len(), 1);
    }

    #[test]
    fn like_comment_adds_exactly_one() {
        let mut session = Session::seed();
        assert_eq!(session.posts[0].comments[0].likes, 5);
        like_comment(&mut session, "1", "c1");
        assert_eq!(session.posts[0].comments[0].likes, 6);
        like_comment(&mut session, "1", "c1");
        assert_eq!(session.posts[0].comments[0].likes, 7);
        // unmatched ids change nothing
        like_comment(&mut session, "1", "nope");
        like_comment(&mut session, "nope", "c1");
        assert_eq!(session.posts[0].comments[0].likes, 7);
    }

    #[test]
    fn edit_post_replaces_content_and_normalizes_media() {
        let mut session = Session::seed();
        edit_post(
            &mut session,
            "2",
            "updated".to_string(),
            Vec::new(),
            Vec::new(),
        );
        let post = session.posts.iter().find(|p| p.id == "2").unwrap();
        assert_eq!(post.content, "updated");
        assert_eq!(post.images, None);
        assert_eq!(post.files, None);
        // everything else survives the edit
        assert_eq!(post.likes, 28);
        assert!(post.liked_by_user);
    }

    #[test]
    fn edit_post_never_removes_the_post() {
        let mut session = Session::seed();
        edit_post(&mut session, "3", String::new(), Vec::new(), Vec::new());
        assert!(session.posts.iter().any(|p| p.id == "3"));
    }

    #[test]
    fn delete_post_removes_exactly_the_match() {
        let mut session = Session::seed();
        delete_post(&mut session, "2");
        let ids: Vec<&str> = session.posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
        delete_post(&mut session, "2");
        assert_eq!(session.posts.len(), 2);
    }
}
