mod comment;
mod ids;
mod media_item;
mod recent_play;

pub use comment::{Comment, CreateComment};
pub use ids::{CommentId, ContentId};
pub use media_item::{CreateContent, MediaItem, UpdateContent};
pub use recent_play::RecentPlayEntry;
