pub mod health;
pub mod schema;
pub mod token;
