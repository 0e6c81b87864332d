mod post;
mod tag;
mod user;

pub use post::*;
pub use tag::*;
pub use user::*;
