pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod members;
pub mod share;
pub mod unshare;
pub mod update;

// Re-export handler functions for use in routing
pub use create::create as document_create;
pub use delete::delete as document_delete;
pub use get::get as document_get;
pub use list::list as document_list;
pub use members::members as document_members;
pub use share::share as document_share;
pub use unshare::unshare as document_unshare;
pub use update::update as document_update;
