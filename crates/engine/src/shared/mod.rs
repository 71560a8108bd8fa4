pub mod fields;
pub mod week;
