pub mod content;
pub mod course;
pub mod discussion;
pub mod user;

pub use content::ContentItem;
pub use course::Course;
pub use discussion::{Discussion, Reply};
pub use user::User;
