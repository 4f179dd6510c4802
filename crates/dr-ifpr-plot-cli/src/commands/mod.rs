pub mod plot;
pub mod summary;
