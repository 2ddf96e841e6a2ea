pub mod result;
pub mod student;
