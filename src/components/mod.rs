pub mod camera;
pub mod earth;
pub mod marker;
pub mod panel;
pub mod transform;
