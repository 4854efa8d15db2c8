//! # circle-shared
//!
//! View models for the Circle prototype: the friend carousel, the friend
//! card, the file browser, the header and the floating utility button, plus
//! the fixed demo data they display.
//!
//! Every widget owns its selection state as a plain value and changes it only
//! through named actions. Layout functions turn that state into
//! [`types::Placement`] targets for whatever renderer draws them.

pub mod carousel;
pub mod constants;
pub mod file_browser;
pub mod fixtures;
pub mod header;
pub mod profile_card;
pub mod shell;
pub mod types;
pub mod utility_button;

mod error;

pub use error::ViewError;
