//! Application services orchestrating the domain.

pub mod link_service;
pub mod redirect_service;

pub use link_service::{CreateLinkCommand, LinkService};
pub use redirect_service::{ClientInfo, RedirectService};
