pub mod monitors;
pub mod register;
