pub mod angle;
pub mod plane;
