pub mod problem;
pub mod params;
