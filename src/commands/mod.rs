pub mod clean;
pub mod extract;
pub mod process;
