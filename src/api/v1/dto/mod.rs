pub mod institutions;
pub mod me;
