pub mod import;
pub mod result;
pub mod shared;
pub mod student;
