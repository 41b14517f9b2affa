pub mod emit;
pub mod extract;
