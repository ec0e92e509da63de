// src/models/mod.rs

//! Domain models for the orientation directory.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
pub(crate) mod de;
mod locale;
mod private;
mod public;
pub mod records;
mod series;

// Re-export all public types
pub use config::{
    CleanupConfig, Config, DirectoryConfig, DuplicatePolicy, LoggingConfig, PathsConfig,
};
pub use locale::{AuthErrorLocale, LocaleConfig, MessageLocale};
pub use private::{Contact, PrivateInstitution};
pub use public::{Faculty, Program, SeriesGroup, University};
pub use series::{SeriesDescriptor, SeriesIcon};

/// A record the list views can filter by free text.
pub trait Searchable {
    /// Display name.
    fn name(&self) -> &str;

    /// Short code, when the record has one.
    fn abbreviation(&self) -> Option<&str>;
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn abbreviation(&self) -> Option<&str> {
        (**self).abbreviation()
    }
}
