//! Per-entity store traits.
//!
//! Services depend on these traits so the HTTP layer can run against either
//! backend. All methods take `&self` and return `Send` futures; backends are
//! shared across handlers behind an `Arc`.

use async_trait::async_trait;
use chrono::NaiveDate;
use maktab_models::{
    CreateStudentDto, CreateTeacherDto, CreateUstaadDto, ExcludedStudent, ExclusionStatistics,
    NewExcludedStudent, Student, StudentCategory, Teacher, TeacherCategory, UpdateStudentDto,
    UpdateTeacherDto, UpdateUstaadDto, Ustaad,
};

use crate::error::StoreResult;

/// Storage operations over the three student registers.
///
/// Every method takes the [`StudentCategory`] selecting the physical table.
/// No uniqueness is enforced on `student_id` at this layer: the identity
/// guard owns that rule, and the `restore` bypass must be able to insert
/// colliding IDs unconditionally.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// List a register ordered by student name.
    async fn list_students(&self, category: StudentCategory) -> StoreResult<Vec<Student>>;

    async fn find_student(&self, category: StudentCategory, id: i64)
    -> StoreResult<Option<Student>>;

    /// Look up by the natural key. Returns the first match when the
    /// register holds colliding IDs (possible after a restore).
    async fn find_student_by_student_id(
        &self,
        category: StudentCategory,
        student_id: &str,
    ) -> StoreResult<Option<Student>>;

    async fn students_by_ustadh(
        &self,
        category: StudentCategory,
        ustadh: &str,
    ) -> StoreResult<Vec<Student>>;

    async fn students_by_ustadh_and_class(
        &self,
        category: StudentCategory,
        ustadh: &str,
        class_teaching: &str,
    ) -> StoreResult<Vec<Student>>;

    async fn student_id_exists(
        &self,
        category: StudentCategory,
        student_id: &str,
    ) -> StoreResult<bool>;

    /// Probe for the exact (name, student ID) pair; the name comparison is
    /// case-insensitive.
    async fn student_pair_exists(
        &self,
        category: StudentCategory,
        name: &str,
        student_id: &str,
    ) -> StoreResult<bool>;

    async fn insert_student(
        &self,
        category: StudentCategory,
        dto: &CreateStudentDto,
    ) -> StoreResult<Student>;

    /// Full-replacement update. Returns `None` when the row is gone.
    async fn update_student(
        &self,
        category: StudentCategory,
        id: i64,
        dto: &UpdateStudentDto,
    ) -> StoreResult<Option<Student>>;

    /// Rewrite only the teacher/class pair (transfer operation).
    async fn transfer_student(
        &self,
        category: StudentCategory,
        id: i64,
        ustadh: &str,
        class_teaching: &str,
    ) -> StoreResult<Option<Student>>;

    /// Delete by primary key; `false` when no row matched.
    async fn delete_student(&self, category: StudentCategory, id: i64) -> StoreResult<bool>;

    /// Delete every student of a teacher, returning the count removed.
    async fn delete_students_by_ustadh(
        &self,
        category: StudentCategory,
        ustadh: &str,
    ) -> StoreResult<u64>;

    async fn count_students_by_ustadh(
        &self,
        category: StudentCategory,
        ustadh: &str,
    ) -> StoreResult<i64>;

    /// Move every student of a teacher from one class to another,
    /// returning the count updated.
    async fn update_class_for_ustadh(
        &self,
        category: StudentCategory,
        ustadh: &str,
        old_class_teaching: &str,
        new_class_teaching: &str,
    ) -> StoreResult<u64>;

    /// Free-text search over name (case-insensitive) and student ID.
    async fn search_students(
        &self,
        category: StudentCategory,
        term: &str,
    ) -> StoreResult<Vec<Student>>;
}

/// Storage operations over the three teacher registers.
#[async_trait]
pub trait TeacherStore: Send + Sync {
    async fn list_teachers(&self, category: TeacherCategory) -> StoreResult<Vec<Teacher>>;

    async fn find_teacher(&self, category: TeacherCategory, id: i64)
    -> StoreResult<Option<Teacher>>;

    async fn teacher_name_exists(&self, category: TeacherCategory, name: &str)
    -> StoreResult<bool>;

    /// Exact name + class lookup (teacher access flow).
    async fn find_teacher_by_name_and_class(
        &self,
        category: TeacherCategory,
        name: &str,
        class_teaching: &str,
    ) -> StoreResult<Option<Teacher>>;

    async fn insert_teacher(
        &self,
        category: TeacherCategory,
        dto: &CreateTeacherDto,
    ) -> StoreResult<Teacher>;

    async fn update_teacher(
        &self,
        category: TeacherCategory,
        id: i64,
        dto: &UpdateTeacherDto,
    ) -> StoreResult<Option<Teacher>>;

    async fn delete_teacher(&self, category: TeacherCategory, id: i64) -> StoreResult<bool>;

    /// Name search (case-insensitive contains).
    async fn search_teachers(
        &self,
        category: TeacherCategory,
        name: &str,
    ) -> StoreResult<Vec<Teacher>>;
}

/// Storage operations over the ustaad register.
#[async_trait]
pub trait UstaadStore: Send + Sync {
    async fn list_ustaads(&self) -> StoreResult<Vec<Ustaad>>;

    async fn find_ustaad(&self, id: i64) -> StoreResult<Option<Ustaad>>;

    async fn ustaad_name_exists(&self, full_name: &str) -> StoreResult<bool>;

    async fn insert_ustaad(&self, dto: &CreateUstaadDto) -> StoreResult<Ustaad>;

    async fn update_ustaad(&self, id: i64, dto: &UpdateUstaadDto) -> StoreResult<Option<Ustaad>>;

    async fn delete_ustaad(&self, id: i64) -> StoreResult<bool>;

    /// Name search (case-insensitive contains).
    async fn search_ustaads(&self, name: &str) -> StoreResult<Vec<Ustaad>>;
}

/// Storage operations over the exclusion ledger.
#[async_trait]
pub trait ExcludedStudentStore: Send + Sync {
    /// List the ledger, most recent exclusions first.
    async fn list_excluded(&self) -> StoreResult<Vec<ExcludedStudent>>;

    async fn find_excluded(&self, id: i64) -> StoreResult<Option<ExcludedStudent>>;

    async fn find_excluded_by_student_id(
        &self,
        student_id: &str,
    ) -> StoreResult<Option<ExcludedStudent>>;

    async fn excluded_id_exists(&self, student_id: &str) -> StoreResult<bool>;

    /// Persist the snapshot and delete the active general-register row in
    /// one transaction. A ledger row already holding this student ID makes
    /// the insert fail with `UniqueViolation`.
    async fn exclude_student(
        &self,
        snapshot: &NewExcludedStudent,
        active_student_id: i64,
    ) -> StoreResult<ExcludedStudent>;

    /// Permanently remove a ledger row; `false` when no row matched.
    async fn delete_excluded(&self, id: i64) -> StoreResult<bool>;

    async fn excluded_by_ustadh(&self, ustadh: &str) -> StoreResult<Vec<ExcludedStudent>>;

    async fn excluded_by_ustadh_and_class(
        &self,
        ustadh: &str,
        class_teaching: &str,
    ) -> StoreResult<Vec<ExcludedStudent>>;

    /// Ledger rows with `excluded_date` in the inclusive range.
    async fn excluded_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> StoreResult<Vec<ExcludedStudent>>;

    /// Free-text search over name, student ID and reason.
    async fn search_excluded(&self, term: &str) -> StoreResult<Vec<ExcludedStudent>>;

    /// Aggregate counts; `month_start..=month_end` bounds the "this month"
    /// figure.
    async fn exclusion_statistics(
        &self,
        month_start: NaiveDate,
        month_end: NaiveDate,
    ) -> StoreResult<ExclusionStatistics>;

    /// Bulk-delete rows with `excluded_date` strictly before `cutoff`,
    /// returning the count removed. The retention sweep's workhorse.
    async fn delete_excluded_before(&self, cutoff: NaiveDate) -> StoreResult<u64>;
}

/// Everything the application needs from a backend, as one trait object.
pub trait Store: StudentStore + TeacherStore + UstaadStore + ExcludedStudentStore {}

impl<T> Store for T where T: StudentStore + TeacherStore + UstaadStore + ExcludedStudentStore {}
