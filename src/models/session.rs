use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FeedtuiError;
use crate::models::{Comment, FileAttachment, FriendRequest, Post, User, CURRENT_USER_ID};

/// Whole-session state: the single source of truth every view reads from
/// and every controller mutates through. Owned by the running app, never a
/// global.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub current_user: User,
    pub posts: Vec<Post>,
    pub friends: Vec<User>,
    pub friend_requests: Vec<FriendRequest>,
}

impl Session {
    /// Load the session fixture. An explicit path must parse; otherwise the
    /// default fixture file is used when it exists, else the built-in seed.
    pub fn load(fixture: Option<&Path>) -> Result<Session, FeedtuiError> {
        match fixture {
            Some(path) => Self::from_file(path),
            None => match default_fixture_file() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::seed()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Session, FeedtuiError> {
        let data = fs::read_to_string(path)
            .map_err(|e| FeedtuiError::Fixture(format!("failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&data)
            .map_err(|e| FeedtuiError::Fixture(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// The built-in mock bootstrap: three posts, two pending invitations,
    /// no friends yet, and the signed-in user under the `"current"` id.
    pub fn seed() -> Session {
        let now = Utc::now();

        let anna = seed_user(
            "u1",
            "Anna Kowalska",
            "https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=150&h=150&fit=crop",
            Some("Senior Developer @ Tech Corp"),
        );
        let piotr = seed_user(
            "u3",
            "Piotr Wiśniewski",
            "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=150&h=150&fit=crop",
            Some("Product Designer"),
        );
        let maria = seed_user(
            "u4",
            "Maria Lewandowska",
            "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=150&h=150&fit=crop",
            Some("Marketing Manager"),
        );

        let posts = vec![
            Post {
                id: "1".to_string(),
                user: anna,
                content: "Właśnie ukończyłam świetny projekt! Współpraca z zespołem była niesamowita. 🚀"
                    .to_string(),
                images: Some(vec![
                    "https://images.unsplash.com/photo-1522071820081-009f0129c71c?w=800&h=600&fit=crop"
                        .to_string(),
                ]),
                files: None,
                timestamp: hours_ago(now, 2),
                likes: 42,
                liked_by_user: false,
                comments: vec![Comment {
                    id: "c1".to_string(),
                    user: seed_user(
                        "u2",
                        "Jan Nowak",
                        "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=150&h=150&fit=crop",
                        None,
                    ),
                    content: "Gratulacje! Świetna robota!".to_string(),
                    timestamp: hours_ago(now, 1),
                    likes: 5,
                }],
            },
            Post {
                id: "2".to_string(),
                user: piotr,
                content: "Nowy design system gotowy! Co myślicie o tych kolorach?".to_string(),
                images: Some(vec![
                    "https://images.unsplash.com/photo-1561070791-2526d30994b5?w=800&h=600&fit=crop"
                        .to_string(),
                ]),
                files: Some(vec![FileAttachment {
                    name: "design-system.pdf".to_string(),
                    mime_type: "application/pdf".to_string(),
                    url: "https://example.com/design-system.pdf".to_string(),
                }]),
                timestamp: hours_ago(now, 5),
                likes: 28,
                liked_by_user: true,
                comments: Vec::new(),
            },
            Post {
                id: "3".to_string(),
                user: maria,
                content:
                    "Dzisiaj na konferencji MarketingPro 2025! Dużo inspiracji i nowych pomysłów. #marketing #konferencja"
                        .to_string(),
                images: None,
                files: None,
                timestamp: hours_ago(now, 8),
                likes: 15,
                liked_by_user: false,
                comments: vec![Comment {
                    id: "c2".to_string(),
                    user: seed_user(
                        "u5",
                        "Tomasz Zając",
                        "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=150&h=150&fit=crop",
                        None,
                    ),
                    content: "Też tam jestem! Może się spotkamy?".to_string(),
                    timestamp: hours_ago(now, 7),
                    likes: 2,
                }],
            },
        ];

        let friend_requests = vec![
            FriendRequest {
                id: "fr1".to_string(),
                from: seed_user(
                    "u5",
                    "Tomasz Lewandowski",
                    "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=150&h=150&fit=crop",
                    Some("Backend Developer"),
                ),
                timestamp: hours_ago(now, 24),
            },
            FriendRequest {
                id: "fr2".to_string(),
                from: seed_user(
                    "u6",
                    "Magdalena Zielińska",
                    "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=150&h=150&fit=crop",
                    Some("Marketing Manager"),
                ),
                timestamp: hours_ago(now, 48),
            },
        ];

        Session {
            current_user: User {
                id: CURRENT_USER_ID.to_string(),
                name: "Jan Kowalski".to_string(),
                avatar: "https://images.unsplash.com/photo-1535713875002-d1d0cf377fde?w=150&h=150&fit=crop"
                    .to_string(),
                title: Some("Software Engineer".to_string()),
                bio: Some(
                    "Pasjonuję się technologią i innowacjami. Zawsze szukam nowych wyzwań!"
                        .to_string(),
                ),
                location: Some("Warszawa, Polska".to_string()),
                website: None,
            },
            posts,
            friends: Vec::new(),
            friend_requests,
        }
    }
}

fn seed_user(id: &str, name: &str, avatar: &str, title: Option<&str>) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        avatar: avatar.to_string(),
        title: title.map(str::to_string),
        bio: None,
        location: None,
        website: None,
    }
}

fn hours_ago(now: DateTime<Utc>, hours: i64) -> DateTime<Utc> {
    now - Duration::hours(hours)
}

fn default_fixture_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config/feedtui/seed.json"))
}
