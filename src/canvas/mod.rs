//! Registry of the rectangles on a drawing surface, the overlap relation
//! between them and the connectors they are joined by.

mod canvas;
mod connector;
mod node;
mod obstacles;
mod set;

pub use canvas::*;
pub use connector::*;
pub use node::*;
pub use obstacles::*;
pub use set::*;
