#[macro_use]
mod macros;

pub mod cost;
pub mod distance;
pub mod fuel;
pub mod ratios;
pub mod rrc;
pub mod time;
