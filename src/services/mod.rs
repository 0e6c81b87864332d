pub mod associations;
pub mod posts;
pub mod tags;
pub mod users;
