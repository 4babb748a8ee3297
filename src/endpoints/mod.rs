pub mod catalog;
pub mod players;
