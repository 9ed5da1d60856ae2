//! Entity structs for all ConcreTrack domain objects.
//!
//! Each entity maps to a table in the libSQL database (`clients`, `projects`,
//! `families`, `members`, `users`). Aggregates are assembled in memory by the
//! loader in `ct-db`; nested collections are never persisted as such.
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema`.

mod client;
mod family;
mod member;
mod operative;
mod project;

pub use client::Client;
pub use family::{Family, NewFamily};
pub use member::{Member, NewMember};
pub use operative::{NewOperative, Operative};
pub use project::{NewProject, Project};
