//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod layout;
mod user;
mod webpage;

pub use layout::{LayoutArea, Widget};
pub use user::User;
pub use webpage::{SortItem, UrlSegment, Webpage};
