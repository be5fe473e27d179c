pub mod canvas;
pub mod geometry;
pub mod math;
pub mod router;
pub mod stepper;
