pub mod coordinates;
pub mod regions;
