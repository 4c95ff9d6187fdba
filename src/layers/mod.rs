pub mod base;
pub mod marker;
pub mod registry;
pub mod vector;
