pub mod models;
pub mod src;

pub use src::update_handler;
