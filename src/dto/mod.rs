pub mod health;
pub mod palette;
pub mod payload;
