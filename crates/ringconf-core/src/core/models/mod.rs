pub mod atom;
pub mod conformation;
pub mod ring;
