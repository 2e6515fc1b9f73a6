pub mod models;
pub mod src;

pub use src::read_handler;
