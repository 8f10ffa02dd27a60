#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

pub mod band;
pub mod currency;
pub mod fmt;
pub mod label;
pub mod model;
pub mod parameters;
pub mod prelude;
pub mod projection;
pub mod projector;
pub mod quantity;
pub mod query;
pub mod selection;
pub mod share;
pub mod state;
