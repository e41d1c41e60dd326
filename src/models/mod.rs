pub mod post;
pub mod request;
pub mod session;
pub mod user;

// Re-export important structs for convenience
pub use post::{non_empty, Comment, FileAttachment, Post};
pub use request::FriendRequest;
pub use session::Session;
pub use user::{ProfileUpdate, User, CURRENT_USER_ID};
