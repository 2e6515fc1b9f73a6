pub mod models;
pub mod src;

pub use src::delete_handler;
