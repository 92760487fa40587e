pub mod backup;
pub mod calculation;
pub mod entry;
pub mod profile;
