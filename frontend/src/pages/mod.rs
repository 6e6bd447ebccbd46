pub mod home;
pub mod lmp;
pub mod not_found;
