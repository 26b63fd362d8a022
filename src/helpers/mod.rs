pub mod compare;
pub mod time;
