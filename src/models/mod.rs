pub mod announcement;
pub mod teacher;
pub mod timestamp;
