pub mod assist;
pub mod health;
pub mod reports;
