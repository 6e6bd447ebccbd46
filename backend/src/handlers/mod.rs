pub mod health;
pub mod lmps;
pub mod traces;
