#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod date;
pub mod feed;
mod fs;
pub mod list;
pub mod post;
pub mod site;
mod slug;
pub mod tags;
