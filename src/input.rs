//! Loading translations from the filesystem.

pub mod translation;
