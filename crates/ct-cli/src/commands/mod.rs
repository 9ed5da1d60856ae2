pub mod client;
pub mod dispatch;
pub mod family;
pub mod member;
pub mod project;
pub mod report;
