pub mod camera;
pub mod ship;
