//! Session verification against the hosted auth provider, plus the route
//! guard that keeps everything except the whitelisted public paths behind a
//! valid session.

pub mod client;
pub mod middleware;

pub use client::{AuthClient, AuthUser, UserProfile};
pub use middleware::CurrentUser;
