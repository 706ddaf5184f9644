pub mod duplicate_check;
pub mod excluded_students;
pub mod students;
pub mod teachers;
pub mod ustaads;

pub use self::students::model::Student;
pub use self::students::model::StudentCategory;
