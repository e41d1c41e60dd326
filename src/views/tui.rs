use std::io;

use chrono::{DateTime, Utc};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::{Span, Text},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::controllers::app_controller::{App, FriendsRow, InputMode, View};
use crate::controllers::directory;
use crate::controllers::friends_controller::FriendStatus;
use crate::models::{Post, User};

pub fn setup_terminal() -> io::Result<Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

pub fn restore_terminal(
    terminal: &mut Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>,
) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()
}

pub fn render_ui<B: ratatui::backend::Backend>(f: &mut Frame<B>, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.size());

    render_header(f, app, chunks[0]);
    match app.view.clone() {
        View::Feed => render_feed(f, app, chunks[1]),
        View::Friends => render_friends(f, app, chunks[1]),
        View::Profile(user_id) => render_profile(f, app, &user_id, chunks[1]),
        View::Error => render_notice(
            f,
            chunks[1],
            "Something went wrong",
            "An unexpected error occurred. Press Esc to go back to the feed.",
        ),
        View::NotFound => render_notice(
            f,
            chunks[1],
            "Page not found",
            "The page you are looking for does not exist. Press Esc to go back to the feed.",
        ),
    }
    render_help(f, app, chunks[2]);
}

fn render_header<B: ratatui::backend::Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let query = if app.view == View::Friends {
        &app.friends_query
    } else {
        &app.search_query
    };

    let mut spans = vec![
        Span::styled(
            app.session.current_user.name.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "  ·  friends {}  ·  invites {}",
            app.session.friends.len(),
            app.session.friend_requests.len()
        )),
    ];
    if app.input_mode == InputMode::Search || !query.is_empty() {
        spans.push(Span::raw(format!("  ·  search: {}", query)));
    }
    if app.input_mode == InputMode::Search {
        spans.push(Span::styled("▌", Style::default().fg(Color::Yellow)));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().title("feedtui").borders(Borders::ALL));
    f.render_widget(header, area);
}

fn render_feed<B: ratatui::backend::Backend>(f: &mut Frame<B>, app: &mut App, area: Rect) {
    let title = if app.search_query.trim().is_empty() {
        "Feed".to_string()
    } else {
        format!(
            "Feed · {} result(s) for \"{}\"",
            app.feed.items.len(),
            app.search_query.trim()
        )
    };

    let items: Vec<ListItem> = app.feed.items.iter().map(post_item).collect();
    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Gray)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );
    f.render_stateful_widget(list, area, &mut app.feed.state);
}

fn render_friends<B: ratatui::backend::Backend>(f: &mut Frame<B>, app: &mut App, area: Rect) {
    let title = format!(
        "Friends ({}) · Invites ({})",
        app.session.friends.len(),
        app.session.friend_requests.len()
    );

    let items: Vec<ListItem> = app.friends_rows.items.iter().map(friends_row_item).collect();
    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Gray)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );
    f.render_stateful_widget(list, area, &mut app.friends_rows.state);
}

fn render_profile<B: ratatui::backend::Backend>(
    f: &mut Frame<B>,
    app: &mut App,
    user_id: &str,
    area: Rect,
) {
    let Some(user) = directory::resolve_user(&app.session, user_id) else {
        render_notice(
            f,
            area,
            "Profile not found",
            "This user may be unavailable or may have been deleted. Press Esc to go back to the feed.",
        );
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)].as_ref())
        .split(area);

    let is_own = user.id == app.session.current_user.id;
    let mut lines = vec![Line::from(Span::styled(
        format!("{}{}", user.name, title_suffix(&user)),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))];
    if let Some(bio) = &user.bio {
        lines.push(Line::from(bio.clone()));
    }
    if let Some(location) = &user.location {
        lines.push(Line::from(format!("location: {}", location)));
    }
    if let Some(website) = &user.website {
        if !website.is_empty() {
            lines.push(Line::from(format!("website: {}", website)));
        }
    }
    lines.push(Line::from(Span::styled(
        format!("avatar: {}", user.avatar),
        Style::default().fg(Color::DarkGray),
    )));
    if is_own {
        lines.push(Line::from(Span::styled(
            "[e] edit profile",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let card = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Profile").borders(Borders::ALL));
    f.render_widget(card, chunks[0]);

    let items: Vec<ListItem> = app.profile_posts.items.iter().map(post_item).collect();
    let list = List::new(items)
        .block(Block::default().title("Posts").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Gray)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );
    f.render_stateful_widget(list, chunks[1], &mut app.profile_posts.state);
}

fn render_notice<B: ratatui::backend::Backend>(
    f: &mut Frame<B>,
    area: Rect,
    title: &str,
    description: &str,
) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            title.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(description.to_string()),
    ];
    let notice = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(notice, area);
}

fn render_help<B: ratatui::backend::Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let hints = match app.view {
        View::Feed => {
            "j/k move · n new post · l like · c comment · 1-9 like comment · e edit · d delete · Enter profile · f friends · o me · / search · q quit"
        }
        View::Friends => {
            "j/k move · a accept · x reject · d remove · f add friend · Enter profile · / search · Esc feed · q quit"
        }
        View::Profile(_) => {
            "j/k move · l like · c comment · 1-9 like comment · e edit profile · f friends · Esc feed · q quit"
        }
        View::Error | View::NotFound => "Esc back to feed · q quit",
    };
    let help = Paragraph::new(Span::styled(hints, Style::default().fg(Color::DarkGray)));
    f.render_widget(help, area);
}

fn post_item(post: &Post) -> ListItem<'_> {
    // Header line with author and age
    let mut lines = vec![Line::from(vec![Span::styled(
        format!(
            "{}{} · {}",
            post.user.name,
            title_suffix(&post.user),
            relative_time(post.timestamp)
        ),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )])];
    lines.push(Line::from(""));

    let content = Text::raw(&post.content);
    lines.extend(content.lines);

    if let Some(images) = &post.images {
        for url in images {
            lines.push(Line::from(Span::styled(
                format!("[image] {}", url),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }
    if let Some(files) = &post.files {
        for file in files {
            lines.push(Line::from(Span::styled(
                format!("[file] {} ({})", file.name, file.mime_type),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let heart = if post.liked_by_user { "♥" } else { "♡" };
    lines.push(Line::from(Span::styled(
        format!("{} {} · {} comment(s)", heart, post.likes, post.comments.len()),
        Style::default().fg(Color::Magenta),
    )));
    for (index, comment) in post.comments.iter().enumerate() {
        lines.push(Line::from(Span::raw(format!(
            "  ({}) {}: {} · ♥ {}",
            index + 1,
            comment.user.name,
            comment.content,
            comment.likes
        ))));
    }
    lines.push(Line::from(""));

    ListItem::new(lines).style(Style::default())
}

fn friends_row_item(row: &FriendsRow) -> ListItem<'_> {
    match row {
        FriendsRow::Request(request) => ListItem::new(Line::from(vec![
            Span::styled("invite  ", Style::default().fg(Color::Yellow)),
            Span::raw(format!(
                "{}{} · {} · [a]ccept / [x] reject",
                request.from.name,
                title_suffix(&request.from),
                relative_time(request.timestamp)
            )),
        ])),
        FriendsRow::Friend(user) => ListItem::new(Line::from(vec![
            Span::styled("friend  ", Style::default().fg(Color::Green)),
            Span::raw(format!("{}{} · [d] remove", user.name, title_suffix(user))),
        ])),
        FriendsRow::Match { user, status } => {
            let tag = match status {
                FriendStatus::Pending => "invite pending",
                FriendStatus::None => "[f] add friend",
                FriendStatus::Friend => "already friends",
            };
            ListItem::new(Line::from(vec![
                Span::styled("found   ", Style::default().fg(Color::Blue)),
                Span::raw(format!("{}{} · {}", user.name, title_suffix(user), tag)),
            ]))
        }
    }
}

fn title_suffix(user: &User) -> String {
    user.title
        .as_deref()
        .map(|title| format!(" ({})", title))
        .unwrap_or_default()
}

fn relative_time(timestamp: DateTime<Utc>) -> String {
    let minutes = (Utc::now() - timestamp).num_minutes();
    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 60 * 24 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / (60 * 24))
    }
}
