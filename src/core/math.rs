pub mod interpolation;
pub mod transform;
pub mod vector;
