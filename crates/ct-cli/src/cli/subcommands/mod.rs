pub mod client;
pub mod family;
pub mod member;
pub mod project;

pub use client::ClientCommands;
pub use family::FamilyCommands;
pub use member::MemberCommands;
pub use project::ProjectCommands;
