pub mod models;
pub mod src;

pub use src::create_handler;
