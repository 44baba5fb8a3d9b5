//! Profile gamification service: character completion, XP, levels and
//! achievements for the recruitment site's profile pages, served as JSON.

pub mod config;
pub mod errors;
pub mod gamification;
pub mod profile;
pub mod routes;
pub mod state;
