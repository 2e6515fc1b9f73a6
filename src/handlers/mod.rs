pub mod pipeline;       // shared decode -> validate -> build -> dispatch path

pub mod create;
pub mod read;
pub mod update;
pub mod delete;
