pub mod documents;
pub mod pages;
pub mod users;
