//! Domain entities - the core business objects.

mod post;
mod subject;
mod user;

pub use post::{Post, PostPatch};
pub use subject::Subject;
pub use user::{User, mask_email, normalize_email, normalize_username};
