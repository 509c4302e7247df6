//! Value objects: screens and verified identities.

pub mod identity;
pub mod screen;

pub use identity::VerifiedIdentity;
pub use screen::Screen;
