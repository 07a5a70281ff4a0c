//! Coursegen Domain Layer
//!
//! This crate contains the domain model shared by every other coursegen crate.
//! It has ZERO external dependencies and defines the value objects and trait
//! seams that the infrastructure and application layers build upon.
//!
//! ## Key Concepts
//!
//! - **Identifier**: The user-chosen marker word ("Module", "Section", "Topic")
//!   that precedes a number in a course outline
//! - **ModuleRecord**: One titled block of content cut out of an outline
//! - **CourseDetails**: The scalar metadata describing the course being written
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure data and validation only
//! - Text extraction and text generation are reached through traits
//!   implemented in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod course;
pub mod identifier;
pub mod module;
pub mod traits;

// Re-exports for convenience
pub use course::{Audience, CourseDetails, Regulation};
pub use identifier::Identifier;
pub use module::ModuleRecord;
