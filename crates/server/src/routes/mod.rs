pub mod games;
pub mod health;
pub mod socket;
