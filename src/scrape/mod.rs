// src/scrape/mod.rs
mod http_portal;
mod portal;
mod session;
mod walker;
pub mod wait;

pub use http_portal::HttpPortal;
pub use portal::Portal;
pub use session::HarvestSession;
pub use walker::PaginationWalker;
