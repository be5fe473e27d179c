mod direction;
mod rect;

pub use direction::*;
pub use rect::*;
