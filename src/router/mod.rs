mod anchor;
mod barrier;
mod branch;
mod coincidence;
pub mod explorer;
mod options;
mod route;
mod router;
mod trap;

pub use anchor::*;
pub use barrier::*;
pub use branch::*;
pub use coincidence::*;
pub use options::*;
pub use route::*;
pub use router::*;
pub use trap::*;
