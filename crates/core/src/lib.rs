#![forbid(unsafe_code)]

pub mod model;
pub mod practice;
pub mod time;

pub use time::Clock;
