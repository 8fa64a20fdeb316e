pub mod random;
pub mod vector;
