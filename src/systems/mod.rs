pub mod camera;
pub mod geospatial;
pub mod marker;
pub mod material;
pub mod presentation;
pub mod readiness;
pub mod window;
