pub mod atom;
pub mod bond;
pub mod error;
pub mod formats;
pub mod molecule;
pub mod property;
pub mod reaction;
pub mod rings;
pub mod validators;
