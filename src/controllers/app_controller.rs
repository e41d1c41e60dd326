use std::env;
use std::fs;
use std::io;
use std::process::Command;

use crossterm::event::{self, Event, KeyCode};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::controllers::friends_controller::{self, FriendStatus};
use crate::controllers::{directory, feed_controller, profile_controller, search};
use crate::error::FeedtuiError;
use crate::models::{FriendRequest, Post, Session, User};
use crate::views::{tui, StatefulList};

/// The screen currently shown. Every view is reachable from every other by
/// plain navigation; the only guarded spot is profile resolution, which
/// renders not-found content instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Feed,
    Friends,
    Profile(String),
    Error,
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// One row of the friends screen: pending invites first, then friends,
/// then people-search matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FriendsRow {
    Request(FriendRequest),
    Friend(User),
    Match { user: User, status: FriendStatus },
}

impl FriendsRow {
    pub fn user(&self) -> &User {
        match self {
            FriendsRow::Request(request) => &request.from,
            FriendsRow::Friend(user) => user,
            FriendsRow::Match { user, .. } => user,
        }
    }
}

/// Text entry goes through `$EDITOR`; the key handler only says what the
/// composed text is for, the event loop does the terminal round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compose {
    NewPost,
    Comment { post_id: String },
    EditPost { post_id: String },
    Profile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
    Compose(Compose),
}

pub struct App {
    pub session: Session,
    pub view: View,
    pub search_query: String,
    pub friends_query: String,
    pub input_mode: InputMode,
    pub feed: StatefulList<Post>,
    pub friends_rows: StatefulList<FriendsRow>,
    pub profile_posts: StatefulList<Post>,
}

impl App {
    pub fn new(session: Session) -> App {
        let mut app = App {
            session,
            view: View::Feed,
            search_query: String::new(),
            friends_query: String::new(),
            input_mode: InputMode::Normal,
            feed: StatefulList::with_items(Vec::new()),
            friends_rows: StatefulList::with_items(Vec::new()),
            profile_posts: StatefulList::with_items(Vec::new()),
        };
        app.refresh();
        app
    }

    pub fn navigate_to(&mut self, view: View) {
        self.view = view;
    }

    /// The "back to feed" action also drops any live search query.
    pub fn back_to_feed(&mut self) {
        self.search_query.clear();
        self.view = View::Feed;
    }

    /// A non-blank query always lands on the feed, wherever it was typed.
    pub fn set_search_query(&mut self, query: String) {
        if !query.trim().is_empty() {
            self.view = View::Feed;
        }
        self.search_query = query;
    }

    /// Recompute the derived lists for the active view from the current
    /// session snapshot, keeping the selection where possible.
    pub fn refresh(&mut self) {
        match self.view.clone() {
            View::Feed => {
                let posts = search::filter_posts(&self.session.posts, &self.search_query);
                self.feed.replace(posts);
            }
            View::Friends => {
                let rows = self.friends_rows_snapshot();
                self.friends_rows.replace(rows);
            }
            View::Profile(user_id) => {
                let posts = match directory::resolve_user(&self.session, &user_id) {
                    Some(user) => self
                        .session
                        .posts
                        .iter()
                        .filter(|post| post.user.id == user.id)
                        .cloned()
                        .collect(),
                    None => Vec::new(),
                };
                self.profile_posts.replace(posts);
            }
            View::Error | View::NotFound => {}
        }
    }

    fn friends_rows_snapshot(&self) -> Vec<FriendsRow> {
        let mut rows: Vec<FriendsRow> = self
            .session
            .friend_requests
            .iter()
            .cloned()
            .map(FriendsRow::Request)
            .collect();
        rows.extend(
            search::filter_friends(&self.session.friends, &self.friends_query)
                .into_iter()
                .map(FriendsRow::Friend),
        );
        let users = directory::all_users(&self.session);
        for user in search::filter_users(&users, &self.friends_query, &self.session.current_user.id)
        {
            let status = friends_controller::status_of(&self.session, &user.id);
            if status == FriendStatus::Friend {
                // already listed in the friends section above
                continue;
            }
            rows.push(FriendsRow::Match { user, status });
        }
        rows
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Outcome {
        if self.input_mode == InputMode::Search {
            self.handle_search_key(code);
            return Outcome::Continue;
        }
        if code == KeyCode::Char('q') {
            return Outcome::Quit;
        }
        match self.view.clone() {
            View::Feed => self.handle_feed_key(code),
            View::Friends => self.handle_friends_key(code),
            View::Profile(user_id) => self.handle_profile_key(code, &user_id),
            View::Error | View::NotFound => {
                if matches!(code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('b')) {
                    self.back_to_feed();
                }
                Outcome::Continue
            }
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Enter => self.input_mode = InputMode::Normal,
            KeyCode::Backspace => {
                if self.view == View::Friends {
                    self.friends_query.pop();
                } else {
                    let mut query = self.search_query.clone();
                    query.pop();
                    self.set_search_query(query);
                }
            }
            KeyCode::Char(c) => {
                if self.view == View::Friends {
                    self.friends_query.push(c);
                } else {
                    let mut query = self.search_query.clone();
                    query.push(c);
                    self.set_search_query(query);
                }
            }
            _ => {}
        }
    }

    fn handle_feed_key(&mut self, code: KeyCode) -> Outcome {
        match code {
            KeyCode::Down | KeyCode::Char('j') => self.feed.next(),
            KeyCode::Up | KeyCode::Char('k') => self.feed.previous(),
            KeyCode::Home => self.feed.first(),
            KeyCode::End => self.feed.last(),
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Esc => self.back_to_feed(),
            KeyCode::Char('f') => self.navigate_to(View::Friends),
            KeyCode::Char('o') => {
                let id = self.session.current_user.id.clone();
                self.navigate_to(View::Profile(id));
            }
            KeyCode::Char('n') => return Outcome::Compose(Compose::NewPost),
            KeyCode::Char('l') => {
                if let Some(id) = self.feed.selected().map(|post| post.id.clone()) {
                    feed_controller::toggle_like(&mut self.session, &id);
                }
            }
            KeyCode::Char('c') => {
                if let Some(post_id) = self.feed.selected().map(|post| post.id.clone()) {
                    return Outcome::Compose(Compose::Comment { post_id });
                }
            }
            KeyCode::Char('e') => {
                let own = self
                    .feed
                    .selected()
                    .filter(|post| owned_by_current(&self.session, post))
                    .map(|post| post.id.clone());
                if let Some(post_id) = own {
                    return Outcome::Compose(Compose::EditPost { post_id });
                }
            }
            KeyCode::Char('d') => {
                let own = self
                    .feed
                    .selected()
                    .filter(|post| owned_by_current(&self.session, post))
                    .map(|post| post.id.clone());
                if let Some(post_id) = own {
                    feed_controller::delete_post(&mut self.session, &post_id);
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.like_selected_comment(c, false);
            }
            KeyCode::Enter | KeyCode::Char('p') => {
                if let Some(author_id) = self.feed.selected().map(|post| post.user.id.clone()) {
                    self.navigate_to(View::Profile(author_id));
                }
            }
            _ => {}
        }
        Outcome::Continue
    }

    fn handle_friends_key(&mut self, code: KeyCode) -> Outcome {
        match code {
            KeyCode::Down | KeyCode::Char('j') => self.friends_rows.next(),
            KeyCode::Up | KeyCode::Char('k') => self.friends_rows.previous(),
            KeyCode::Home => self.friends_rows.first(),
            KeyCode::End => self.friends_rows.last(),
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Esc | KeyCode::Char('b') => self.back_to_feed(),
            KeyCode::Char('o') => {
                let id = self.session.current_user.id.clone();
                self.navigate_to(View::Profile(id));
            }
            KeyCode::Char('a') => {
                if let Some(FriendsRow::Request(request)) = self.friends_rows.selected() {
                    let id = request.id.clone();
                    friends_controller::accept_request(&mut self.session, &id);
                }
            }
            KeyCode::Char('x') => {
                if let Some(FriendsRow::Request(request)) = self.friends_rows.selected() {
                    let id = request.id.clone();
                    friends_controller::reject_request(&mut self.session, &id);
                }
            }
            KeyCode::Char('d') => {
                if let Some(FriendsRow::Friend(user)) = self.friends_rows.selected() {
                    let id = user.id.clone();
                    friends_controller::remove_friend(&mut self.session, &id);
                }
            }
            KeyCode::Char('f') => {
                if let Some(FriendsRow::Match {
                    user,
                    status: FriendStatus::None,
                }) = self.friends_rows.selected()
                {
                    let id = user.id.clone();
                    friends_controller::add_friend(&mut self.session, &id);
                }
            }
            KeyCode::Enter | KeyCode::Char('p') => {
                if let Some(user_id) = self
                    .friends_rows
                    .selected()
                    .map(|row| row.user().id.clone())
                {
                    self.navigate_to(View::Profile(user_id));
                }
            }
            _ => {}
        }
        Outcome::Continue
    }

    fn handle_profile_key(&mut self, code: KeyCode, user_id: &str) -> Outcome {
        match code {
            KeyCode::Down | KeyCode::Char('j') => self.profile_posts.next(),
            KeyCode::Up | KeyCode::Char('k') => self.profile_posts.previous(),
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Esc | KeyCode::Char('b') => self.back_to_feed(),
            KeyCode::Char('f') => self.navigate_to(View::Friends),
            KeyCode::Char('l') => {
                if let Some(id) = self.profile_posts.selected().map(|post| post.id.clone()) {
                    feed_controller::toggle_like(&mut self.session, &id);
                }
            }
            KeyCode::Char('c') => {
                if let Some(post_id) = self.profile_posts.selected().map(|post| post.id.clone()) {
                    return Outcome::Compose(Compose::Comment { post_id });
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.like_selected_comment(c, true);
            }
            KeyCode::Char('e') => {
                let is_own = directory::resolve_user(&self.session, user_id)
                    .is_some_and(|user| user.id == self.session.current_user.id);
                if is_own {
                    return Outcome::Compose(Compose::Profile);
                }
            }
            _ => {}
        }
        Outcome::Continue
    }

    /// Digit keys 1-9 like the nth comment of the selected post.
    fn like_selected_comment(&mut self, digit: char, on_profile: bool) {
        let list = if on_profile {
            &self.profile_posts
        } else {
            &self.feed
        };
        let target = list.selected().and_then(|post| {
            let slot = (digit.to_digit(10)? as usize).checked_sub(1)?;
            let comment = post.comments.get(slot)?;
            Some((post.id.clone(), comment.id.clone()))
        });
        if let Some((post_id, comment_id)) = target {
            feed_controller::like_comment(&mut self.session, &post_id, &comment_id);
        }
    }
}

fn owned_by_current(session: &Session, post: &Post) -> bool {
    directory::resolve_user(session, &post.user.id)
        .is_some_and(|user| user.id == session.current_user.id)
}

pub fn start_app(session: Session) -> Result<(), FeedtuiError> {
    let mut terminal = tui::setup_terminal()?;
    let mut app = App::new(session);

    let res = run_app(&mut terminal, &mut app);

    tui::restore_terminal(&mut terminal)?;
    res
}

pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), FeedtuiError> {
    loop {
        app.refresh();
        terminal.draw(|f| tui::render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match app.handle_key(key.code) {
                Outcome::Quit => return Ok(()),
                Outcome::Continue => {}
                Outcome::Compose(compose) => {
                    let initial = compose_initial(app, &compose)?;
                    // the editor needs the real screen back
                    tui::restore_terminal(terminal)?;
                    let composed = compose_in_editor(&initial);
                    *terminal = tui::setup_terminal()?;
                    match composed {
                        Ok(text) => apply_compose(app, &compose, text),
                        Err(err) => eprintln!("{:?}", err),
                    }
                }
            }
        }
    }
}

fn compose_initial(app: &App, compose: &Compose) -> Result<String, FeedtuiError> {
    match compose {
        Compose::EditPost { post_id } => Ok(app
            .session
            .posts
            .iter()
            .find(|post| post.id == *post_id)
            .map(|post| post.content.clone())
            .unwrap_or_default()),
        Compose::Profile => profile_controller::profile_form(&app.session.current_user),
        Compose::NewPost | Compose::Comment { .. } => Ok(String::new()),
    }
}

fn apply_compose(app: &mut App, compose: &Compose, text: String) {
    let content = text.trim_end().to_string();
    match compose {
        Compose::NewPost => {
            feed_controller::create_post(&mut app.session, content, Vec::new(), Vec::new());
        }
        Compose::Comment { post_id } => {
            feed_controller::add_comment(&mut app.session, post_id, content);
        }
        Compose::EditPost { post_id } => {
            let media = app
                .session
                .posts
                .iter()
                .find(|post| post.id == *post_id)
                .map(|post| {
                    (
                        post.images.clone().unwrap_or_default(),
                        post.files.clone().unwrap_or_default(),
                    )
                });
            if let Some((images, files)) = media {
                if content.trim().is_empty() && images.is_empty() && files.is_empty() {
                    // nothing would be left, treat as an abandoned edit
                    return;
                }
                feed_controller::edit_post(&mut app.session, post_id, content, images, files);
            }
        }
        Compose::Profile => {
            // a malformed form is dropped, like every other unmet precondition
            if let Ok(update) = profile_controller::parse_profile_form(&text) {
                profile_controller::update_profile(&mut app.session, update);
            }
        }
    }
}

fn compose_in_editor(initial: &str) -> Result<String, FeedtuiError> {
    let editor = env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    let mut temp_path = env::temp_dir();
    temp_path.push("feedtui-note");
    fs::write(&temp_path, initial)?;

    let status = Command::new(editor).arg(&temp_path).status()?;

    if !status.success() {
        return Err(FeedtuiError::Editor(
            "editor exited with non-zero status".to_string(),
        ));
    }

    let content = fs::read_to_string(&temp_path)?;
    let _ = fs::remove_file(&temp_path);
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(Session::seed())
    }

    #[test]
    fn back_to_feed_clears_the_search_query() {
        let mut app = app();
        app.set_search_query("design".to_string());
        app.navigate_to(View::Friends);
        app.back_to_feed();
        assert_eq!(app.view, View::Feed);
        assert_eq!(app.search_query, "");
    }

    #[test]
    fn typing_a_live_query_lands_on_the_feed() {
        let mut app = app();
        app.navigate_to(View::Profile("u1".to_string()));
        app.handle_key(KeyCode::Char('/'));
        app.handle_key(KeyCode::Char('d'));
        assert_eq!(app.view, View::Feed);
        assert_eq!(app.search_query, "d");
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn feed_search_narrows_the_visible_posts() {
        let mut app = app();
        app.set_search_query("design".to_string());
        app.refresh();
        assert_eq!(app.feed.items.len(), 1);
        assert_eq!(app.feed.items[0].id, "2");
    }

    #[test]
    fn friends_search_stays_on_the_friends_view() {
        let mut app = app();
        app.navigate_to(View::Friends);
        app.handle_key(KeyCode::Char('/'));
        app.handle_key(KeyCode::Char('z'));
        assert_eq!(app.view, View::Friends);
        assert_eq!(app.friends_query, "z");
        assert_eq!(app.search_query, "");
    }

    #[test]
    fn like_key_toggles_the_selected_post() {
        let mut app = app();
        app.handle_key(KeyCode::Char('l'));
        assert_eq!(app.session.posts[0].likes, 43);
        assert!(app.session.posts[0].liked_by_user);
        app.handle_key(KeyCode::Char('l'));
        assert_eq!(app.session.posts[0].likes, 42);
    }

    #[test]
    fn digit_keys_like_the_nth_comment() {
        let mut app = app();
        app.handle_key(KeyCode::Char('1'));
        assert_eq!(app.session.posts[0].comments[0].likes, 6);
        // no ninth comment, nothing happens
        app.handle_key(KeyCode::Char('9'));
        assert_eq!(app.session.posts[0].comments[0].likes, 6);
    }

    #[test]
    fn delete_only_works_on_own_posts() {
        let mut app = app();
        app.handle_key(KeyCode::Char('d'));
        assert_eq!(app.session.posts.len(), 3);

        feed_controller::create_post(
            &mut app.session,
            "mine".to_string(),
            Vec::new(),
            Vec::new(),
        );
        app.refresh();
        app.feed.first();
        app.handle_key(KeyCode::Char('d'));
        assert_eq!(app.session.posts.len(), 3);
        assert!(app.session.posts.iter().all(|p| p.content != "mine"));
    }

    #[test]
    fn friends_view_accepts_the_selected_invite() {
        let mut app = app();
        app.handle_key(KeyCode::Char('f'));
        assert_eq!(app.view, View::Friends);
        app.refresh();
        app.handle_key(KeyCode::Char('a'));
        assert!(app.session.friends.iter().any(|f| f.id == "u5"));
        assert_eq!(app.session.friend_requests.len(), 1);
    }

    #[test]
    fn friends_view_rejects_without_creating_an_edge() {
        let mut app = app();
        app.navigate_to(View::Friends);
        app.refresh();
        app.handle_key(KeyCode::Char('x'));
        assert!(app.session.friends.is_empty());
        assert_eq!(app.session.friend_requests.len(), 1);
    }

    #[test]
    fn people_search_can_add_a_friend() {
        let mut app = app();
        app.navigate_to(View::Friends);
        app.friends_query = "anna".to_string();
        app.refresh();
        // rows: fr1, fr2, then the match for Anna
        app.friends_rows.last();
        app.handle_key(KeyCode::Char('f'));
        assert!(app.session.friends.iter().any(|f| f.id == "u1"));
    }

    #[test]
    fn enter_opens_the_selected_authors_profile() {
        let mut app = app();
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.view, View::Profile("u1".to_string()));
        app.refresh();
        assert_eq!(app.profile_posts.items.len(), 1);
        assert_eq!(app.profile_posts.items[0].id, "1");
    }

    #[test]
    fn unresolvable_profile_keeps_state_untouched() {
        let mut app = app();
        app.navigate_to(View::Profile("ghost".to_string()));
        let before = app.session.clone();
        app.refresh();
        assert!(app.profile_posts.items.is_empty());
        assert_eq!(app.session, before);
    }

    #[test]
    fn error_pages_only_lead_back_to_the_feed() {
        let mut app = app();
        app.set_search_query("design".to_string());
        app.navigate_to(View::NotFound);
        app.handle_key(KeyCode::Char('z'));
        assert_eq!(app.view, View::NotFound);
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.view, View::Feed);
        assert_eq!(app.search_query, "");
    }

    #[test]
    fn quit_key_ends_the_loop() {
        let mut app = app();
        assert_eq!(app.handle_key(KeyCode::Char('q')), Outcome::Quit);
    }

    #[test]
    fn compose_keys_request_an_editor_round_trip() {
        let mut app = app();
        assert_eq!(
            app.handle_key(KeyCode::Char('n')),
            Outcome::Compose(Compose::NewPost)
        );
        assert_eq!(
            app.handle_key(KeyCode::Char('c')),
            Outcome::Compose(Compose::Comment {
                post_id: "1".to_string()
            })
        );
    }

    #[test]
    fn composed_edits_preserve_existing_media() {
        let mut app = app();
        apply_compose(
            &mut app,
            &Compose::EditPost {
                post_id: "2".to_string(),
            },
            "poprawione\n".to_string(),
        );
        let post = app.session.posts.iter().find(|p| p.id == "2").unwrap();
        assert_eq!(post.content, "poprawione");
        assert!(post.images.is_some());
        assert!(post.files.is_some());
    }

    #[test]
    fn a_blank_edit_of_a_text_only_post_is_abandoned() {
        let mut app = app();
        apply_compose(
            &mut app,
            &Compose::EditPost {
                post_id: "3".to_string(),
            },
            "   \n".to_string(),
        );
        let post = app.session.posts.iter().find(|p| p.id == "3").unwrap();
        assert!(post.content.starts_with("Dzisiaj na konferencji"));
    }

    #[test]
    fn a_malformed_profile_form_changes_nothing() {
        let mut app = app();
        let before = app.session.current_user.clone();
        apply_compose(&mut app, &Compose::Profile, "not json".to_string());
        assert_eq!(app.session.current_user, before);
    }
}
