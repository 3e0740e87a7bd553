pub mod check;
pub mod clip;
pub mod curve;
pub mod cycle;
pub mod envelope;
