pub mod docs;
pub mod server;
pub mod token;
