#![no_std]

extern crate alloc;

pub use cell::*;
pub use error::*;
pub use grid::*;
pub use palette::*;
pub use timer::*;
pub use types::*;

mod cell;
mod error;
mod grid;
mod palette;
mod timer;
mod types;
