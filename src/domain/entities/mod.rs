//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`User`] - An account that owns links
//! - [`Link`] - A short key mapped to a target URL
//! - [`Click`] - A recorded visit to a link
//!
//! # Design Pattern
//!
//! Entities that are persisted have a separate creation struct:
//! - `NewUser`, `NewLink` - For creating new records
//! - `UserPatch` - For partial profile updates
//!
//! Read models assembled from several tables (`LinkSummary`, `LinkDetail`)
//! live next to the entity they describe.

pub mod click;
pub mod link;
pub mod user;

pub use click::{Browser, Click, ClickDetail, RecordedClick};
pub use link::{Link, LinkDetail, LinkSummary, NewLink};
pub use user::{NewUser, User, UserPatch};
