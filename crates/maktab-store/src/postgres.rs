//! PostgreSQL backend.
//!
//! Table names are interpolated from the category enums (a closed set of
//! identifiers, never client input), which is why this backend uses the
//! runtime query API throughout.

use async_trait::async_trait;
use chrono::NaiveDate;
use maktab_models::{
    CreateStudentDto, CreateTeacherDto, CreateUstaadDto, ExcludedStudent, ExclusionStatistics,
    NewExcludedStudent, Student, StudentCategory, Teacher, TeacherCategory, UpdateStudentDto,
    UpdateTeacherDto, UpdateUstaadDto, Ustaad,
};
use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};
use crate::traits::{ExcludedStudentStore, StudentStore, TeacherStore, UstaadStore};

const STUDENT_COLUMNS: &str = "id, student_id, name, gender, date_joined, location, \
     madrassa_location, shoe_size, cell, ustadh, class_teaching, created_at, updated_at";

const TEACHER_COLUMNS: &str = "id, name, class_teaching, created_at, updated_at";

const USTAAD_COLUMNS: &str =
    "id, full_name, class_teaching, center, phone, num_students, created_at, updated_at";

const EXCLUDED_COLUMNS: &str = "id, student_id, name, gender, date_joined, location, \
     madrassa_location, shoe_size, cell, ustadh, class_teaching, excluded_date, \
     excluded_by, reason, exclusion_type, additional_notes, created_at";

/// The production store backend over a PostgreSQL pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentStore for PgStore {
    async fn list_students(&self, category: StudentCategory) -> StoreResult<Vec<Student>> {
        let sql = format!(
            "SELECT {STUDENT_COLUMNS} FROM {table} ORDER BY name",
            table = category.table()
        );
        let students = sqlx::query_as::<_, Student>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(students)
    }

    async fn find_student(
        &self,
        category: StudentCategory,
        id: i64,
    ) -> StoreResult<Option<Student>> {
        let sql = format!(
            "SELECT {STUDENT_COLUMNS} FROM {table} WHERE id = $1",
            table = category.table()
        );
        let student = sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(student)
    }

    async fn find_student_by_student_id(
        &self,
        category: StudentCategory,
        student_id: &str,
    ) -> StoreResult<Option<Student>> {
        let sql = format!(
            "SELECT {STUDENT_COLUMNS} FROM {table} WHERE student_id = $1 ORDER BY id LIMIT 1",
            table = category.table()
        );
        let student = sqlx::query_as::<_, Student>(&sql)
            .bind(student_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(student)
    }

    async fn students_by_ustadh(
        &self,
        category: StudentCategory,
        ustadh: &str,
    ) -> StoreResult<Vec<Student>> {
        let sql = format!(
            "SELECT {STUDENT_COLUMNS} FROM {table} WHERE ustadh = $1 ORDER BY name",
            table = category.table()
        );
        let students = sqlx::query_as::<_, Student>(&sql)
            .bind(ustadh)
            .fetch_all(&self.pool)
            .await?;
        Ok(students)
    }

    async fn students_by_ustadh_and_class(
        &self,
        category: StudentCategory,
        ustadh: &str,
        class_teaching: &str,
    ) -> StoreResult<Vec<Student>> {
        let sql = format!(
            "SELECT {STUDENT_COLUMNS} FROM {table} \
             WHERE ustadh = $1 AND class_teaching = $2 ORDER BY name",
            table = category.table()
        );
        let students = sqlx::query_as::<_, Student>(&sql)
            .bind(ustadh)
            .bind(class_teaching)
            .fetch_all(&self.pool)
            .await?;
        Ok(students)
    }

    async fn student_id_exists(
        &self,
        category: StudentCategory,
        student_id: &str,
    ) -> StoreResult<bool> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {table} WHERE student_id = $1)",
            table = category.table()
        );
        let exists = sqlx::query_scalar::<_, bool>(&sql)
            .bind(student_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn student_pair_exists(
        &self,
        category: StudentCategory,
        name: &str,
        student_id: &str,
    ) -> StoreResult<bool> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {table} \
             WHERE LOWER(name) = LOWER($1) AND student_id = $2)",
            table = category.table()
        );
        let exists = sqlx::query_scalar::<_, bool>(&sql)
            .bind(name)
            .bind(student_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn insert_student(
        &self,
        category: StudentCategory,
        dto: &CreateStudentDto,
    ) -> StoreResult<Student> {
        let sql = format!(
            "INSERT INTO {table} \
               (student_id, name, gender, date_joined, location, madrassa_location, \
                shoe_size, cell, ustadh, class_teaching) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {STUDENT_COLUMNS}",
            table = category.table()
        );
        let student = sqlx::query_as::<_, Student>(&sql)
            .bind(&dto.student_id)
            .bind(&dto.name)
            .bind(&dto.gender)
            .bind(dto.date_joined)
            .bind(&dto.location)
            .bind(&dto.madrassa_location)
            .bind(&dto.shoe_size)
            .bind(&dto.cell)
            .bind(&dto.ustadh)
            .bind(&dto.class_teaching)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?;
        Ok(student)
    }

    async fn update_student(
        &self,
        category: StudentCategory,
        id: i64,
        dto: &UpdateStudentDto,
    ) -> StoreResult<Option<Student>> {
        let sql = format!(
            "UPDATE {table} SET \
               student_id = $1, name = $2, gender = $3, date_joined = $4, location = $5, \
               madrassa_location = $6, shoe_size = $7, cell = $8, ustadh = $9, \
               class_teaching = $10, updated_at = NOW() \
             WHERE id = $11 \
             RETURNING {STUDENT_COLUMNS}",
            table = category.table()
        );
        let student = sqlx::query_as::<_, Student>(&sql)
            .bind(&dto.student_id)
            .bind(&dto.name)
            .bind(&dto.gender)
            .bind(dto.date_joined)
            .bind(&dto.location)
            .bind(&dto.madrassa_location)
            .bind(&dto.shoe_size)
            .bind(&dto.cell)
            .bind(&dto.ustadh)
            .bind(&dto.class_teaching)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?;
        Ok(student)
    }

    async fn transfer_student(
        &self,
        category: StudentCategory,
        id: i64,
        ustadh: &str,
        class_teaching: &str,
    ) -> StoreResult<Option<Student>> {
        let sql = format!(
            "UPDATE {table} SET ustadh = $1, class_teaching = $2, updated_at = NOW() \
             WHERE id = $3 \
             RETURNING {STUDENT_COLUMNS}",
            table = category.table()
        );
        let student = sqlx::query_as::<_, Student>(&sql)
            .bind(ustadh)
            .bind(class_teaching)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?;
        Ok(student)
    }

    async fn delete_student(&self, category: StudentCategory, id: i64) -> StoreResult<bool> {
        let sql = format!("DELETE FROM {table} WHERE id = $1", table = category.table());
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_students_by_ustadh(
        &self,
        category: StudentCategory,
        ustadh: &str,
    ) -> StoreResult<u64> {
        let sql = format!(
            "DELETE FROM {table} WHERE ustadh = $1",
            table = category.table()
        );
        let result = sqlx::query(&sql)
            .bind(ustadh)
            .execute(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?;
        Ok(result.rows_affected())
    }

    async fn count_students_by_ustadh(
        &self,
        category: StudentCategory,
        ustadh: &str,
    ) -> StoreResult<i64> {
        let sql = format!(
            "SELECT COUNT(*) FROM {table} WHERE ustadh = $1",
            table = category.table()
        );
        let count = sqlx::query_scalar::<_, i64>(&sql)
            .bind(ustadh)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn update_class_for_ustadh(
        &self,
        category: StudentCategory,
        ustadh: &str,
        old_class_teaching: &str,
        new_class_teaching: &str,
    ) -> StoreResult<u64> {
        let sql = format!(
            "UPDATE {table} SET class_teaching = $1, updated_at = NOW() \
             WHERE ustadh = $2 AND class_teaching = $3",
            table = category.table()
        );
        let result = sqlx::query(&sql)
            .bind(new_class_teaching)
            .bind(ustadh)
            .bind(old_class_teaching)
            .execute(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?;
        Ok(result.rows_affected())
    }

    async fn search_students(
        &self,
        category: StudentCategory,
        term: &str,
    ) -> StoreResult<Vec<Student>> {
        let sql = format!(
            "SELECT {STUDENT_COLUMNS} FROM {table} \
             WHERE name ILIKE $1 OR student_id LIKE $1 ORDER BY name",
            table = category.table()
        );
        let pattern = format!("%{term}%");
        let students = sqlx::query_as::<_, Student>(&sql)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await?;
        Ok(students)
    }
}

#[async_trait]
impl TeacherStore for PgStore {
    async fn list_teachers(&self, category: TeacherCategory) -> StoreResult<Vec<Teacher>> {
        let sql = format!(
            "SELECT {TEACHER_COLUMNS} FROM {table} ORDER BY id",
            table = category.table()
        );
        let teachers = sqlx::query_as::<_, Teacher>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(teachers)
    }

    async fn find_teacher(
        &self,
        category: TeacherCategory,
        id: i64,
    ) -> StoreResult<Option<Teacher>> {
        let sql = format!(
            "SELECT {TEACHER_COLUMNS} FROM {table} WHERE id = $1",
            table = category.table()
        );
        let teacher = sqlx::query_as::<_, Teacher>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(teacher)
    }

    async fn teacher_name_exists(
        &self,
        category: TeacherCategory,
        name: &str,
    ) -> StoreResult<bool> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {table} WHERE name = $1)",
            table = category.table()
        );
        let exists = sqlx::query_scalar::<_, bool>(&sql)
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn find_teacher_by_name_and_class(
        &self,
        category: TeacherCategory,
        name: &str,
        class_teaching: &str,
    ) -> StoreResult<Option<Teacher>> {
        let sql = format!(
            "SELECT {TEACHER_COLUMNS} FROM {table} WHERE name = $1 AND class_teaching = $2",
            table = category.table()
        );
        let teacher = sqlx::query_as::<_, Teacher>(&sql)
            .bind(name)
            .bind(class_teaching)
            .fetch_optional(&self.pool)
            .await?;
        Ok(teacher)
    }

    async fn insert_teacher(
        &self,
        category: TeacherCategory,
        dto: &CreateTeacherDto,
    ) -> StoreResult<Teacher> {
        let sql = format!(
            "INSERT INTO {table} (name, class_teaching) VALUES ($1, $2) \
             RETURNING {TEACHER_COLUMNS}",
            table = category.table()
        );
        let teacher = sqlx::query_as::<_, Teacher>(&sql)
            .bind(&dto.name)
            .bind(&dto.class_teaching)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?;
        Ok(teacher)
    }

    async fn update_teacher(
        &self,
        category: TeacherCategory,
        id: i64,
        dto: &UpdateTeacherDto,
    ) -> StoreResult<Option<Teacher>> {
        let sql = format!(
            "UPDATE {table} SET name = $1, class_teaching = $2, updated_at = NOW() \
             WHERE id = $3 \
             RETURNING {TEACHER_COLUMNS}",
            table = category.table()
        );
        let teacher = sqlx::query_as::<_, Teacher>(&sql)
            .bind(&dto.name)
            .bind(&dto.class_teaching)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?;
        Ok(teacher)
    }

    async fn delete_teacher(&self, category: TeacherCategory, id: i64) -> StoreResult<bool> {
        let sql = format!("DELETE FROM {table} WHERE id = $1", table = category.table());
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?;
        Ok(result.rows_affected() > 0)
    }

    async fn search_teachers(
        &self,
        category: TeacherCategory,
        name: &str,
    ) -> StoreResult<Vec<Teacher>> {
        let sql = format!(
            "SELECT {TEACHER_COLUMNS} FROM {table} WHERE name ILIKE $1 ORDER BY name",
            table = category.table()
        );
        let pattern = format!("%{name}%");
        let teachers = sqlx::query_as::<_, Teacher>(&sql)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await?;
        Ok(teachers)
    }
}

#[async_trait]
impl UstaadStore for PgStore {
    async fn list_ustaads(&self) -> StoreResult<Vec<Ustaad>> {
        let ustaads = sqlx::query_as::<_, Ustaad>(&format!(
            "SELECT {USTAAD_COLUMNS} FROM ustaads ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(ustaads)
    }

    async fn find_ustaad(&self, id: i64) -> StoreResult<Option<Ustaad>> {
        let ustaad = sqlx::query_as::<_, Ustaad>(&format!(
            "SELECT {USTAAD_COLUMNS} FROM ustaads WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(ustaad)
    }

    async fn ustaad_name_exists(&self, full_name: &str) -> StoreResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM ustaads WHERE full_name = $1)",
        )
        .bind(full_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn insert_ustaad(&self, dto: &CreateUstaadDto) -> StoreResult<Ustaad> {
        let ustaad = sqlx::query_as::<_, Ustaad>(&format!(
            "INSERT INTO ustaads (full_name, class_teaching, center, phone, num_students) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {USTAAD_COLUMNS}"
        ))
        .bind(&dto.full_name)
        .bind(&dto.class_teaching)
        .bind(&dto.center)
        .bind(&dto.phone)
        .bind(dto.num_students)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)?;
        Ok(ustaad)
    }

    async fn update_ustaad(&self, id: i64, dto: &UpdateUstaadDto) -> StoreResult<Option<Ustaad>> {
        let ustaad = sqlx::query_as::<_, Ustaad>(&format!(
            "UPDATE ustaads SET \
               full_name = $1, class_teaching = $2, center = $3, phone = $4, \
               num_students = $5, updated_at = NOW() \
             WHERE id = $6 \
             RETURNING {USTAAD_COLUMNS}"
        ))
        .bind(&dto.full_name)
        .bind(&dto.class_teaching)
        .bind(&dto.center)
        .bind(&dto.phone)
        .bind(dto.num_students)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)?;
        Ok(ustaad)
    }

    async fn delete_ustaad(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM ustaads WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?;
        Ok(result.rows_affected() > 0)
    }

    async fn search_ustaads(&self, name: &str) -> StoreResult<Vec<Ustaad>> {
        let pattern = format!("%{name}%");
        let ustaads = sqlx::query_as::<_, Ustaad>(&format!(
            "SELECT {USTAAD_COLUMNS} FROM ustaads WHERE full_name ILIKE $1 ORDER BY full_name"
        ))
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(ustaads)
    }
}

#[async_trait]
impl ExcludedStudentStore for PgStore {
    async fn list_excluded(&self) -> StoreResult<Vec<ExcludedStudent>> {
        let excluded = sqlx::query_as::<_, ExcludedStudent>(&format!(
            "SELECT {EXCLUDED_COLUMNS} FROM excluded_students ORDER BY excluded_date DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(excluded)
    }

    async fn find_excluded(&self, id: i64) -> StoreResult<Option<ExcludedStudent>> {
        let excluded = sqlx::query_as::<_, ExcludedStudent>(&format!(
            "SELECT {EXCLUDED_COLUMNS} FROM excluded_students WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(excluded)
    }

    async fn find_excluded_by_student_id(
        &self,
        student_id: &str,
    ) -> StoreResult<Option<ExcludedStudent>> {
        let excluded = sqlx::query_as::<_, ExcludedStudent>(&format!(
            "SELECT {EXCLUDED_COLUMNS} FROM excluded_students WHERE student_id = $1"
        ))
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(excluded)
    }

    async fn excluded_id_exists(&self, student_id: &str) -> StoreResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM excluded_students WHERE student_id = $1)",
        )
        .bind(student_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn exclude_student(
        &self,
        snapshot: &NewExcludedStudent,
        active_student_id: i64,
    ) -> StoreResult<ExcludedStudent> {
        let mut tx = self.pool.begin().await?;

        let excluded = sqlx::query_as::<_, ExcludedStudent>(&format!(
            "INSERT INTO excluded_students \
               (student_id, name, gender, date_joined, location, madrassa_location, \
                shoe_size, cell, ustadh, class_teaching, excluded_date, excluded_by, \
                reason, exclusion_type, additional_notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING {EXCLUDED_COLUMNS}"
        ))
        .bind(&snapshot.student_id)
        .bind(&snapshot.name)
        .bind(&snapshot.gender)
        .bind(snapshot.date_joined)
        .bind(&snapshot.location)
        .bind(&snapshot.madrassa_location)
        .bind(&snapshot.shoe_size)
        .bind(&snapshot.cell)
        .bind(&snapshot.ustadh)
        .bind(&snapshot.class_teaching)
        .bind(snapshot.excluded_date)
        .bind(&snapshot.excluded_by)
        .bind(&snapshot.reason)
        .bind(&snapshot.exclusion_type)
        .bind(&snapshot.additional_notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(StoreError::from_sqlx)?;

        sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(active_student_id)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::from_sqlx)?;

        tx.commit().await?;

        Ok(excluded)
    }

    async fn delete_excluded(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM excluded_students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?;
        Ok(result.rows_affected() > 0)
    }

    async fn excluded_by_ustadh(&self, ustadh: &str) -> StoreResult<Vec<ExcludedStudent>> {
        let excluded = sqlx::query_as::<_, ExcludedStudent>(&format!(
            "SELECT {EXCLUDED_COLUMNS} FROM excluded_students \
             WHERE ustadh = $1 ORDER BY excluded_date DESC"
        ))
        .bind(ustadh)
        .fetch_all(&self.pool)
        .await?;
        Ok(excluded)
    }

    async fn excluded_by_ustadh_and_class(
        &self,
        ustadh: &str,
        class_teaching: &str,
    ) -> StoreResult<Vec<ExcludedStudent>> {
        let excluded = sqlx::query_as::<_, ExcludedStudent>(&format!(
            "SELECT {EXCLUDED_COLUMNS} FROM excluded_students \
             WHERE ustadh = $1 AND class_teaching = $2 ORDER BY excluded_date DESC"
        ))
        .bind(ustadh)
        .bind(class_teaching)
        .fetch_all(&self.pool)
        .await?;
        Ok(excluded)
    }

    async fn excluded_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> StoreResult<Vec<ExcludedStudent>> {
        let excluded = sqlx::query_as::<_, ExcludedStudent>(&format!(
            "SELECT {EXCLUDED_COLUMNS} FROM excluded_students \
             WHERE excluded_date BETWEEN $1 AND $2 ORDER BY excluded_date DESC"
        ))
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(excluded)
    }

    async fn search_excluded(&self, term: &str) -> StoreResult<Vec<ExcludedStudent>> {
        let pattern = format!("%{term}%");
        let excluded = sqlx::query_as::<_, ExcludedStudent>(&format!(
            "SELECT {EXCLUDED_COLUMNS} FROM excluded_students \
             WHERE name ILIKE $1 OR student_id LIKE $1 OR reason ILIKE $1 \
             ORDER BY excluded_date DESC"
        ))
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(excluded)
    }

    async fn exclusion_statistics(
        &self,
        month_start: NaiveDate,
        month_end: NaiveDate,
    ) -> StoreResult<ExclusionStatistics> {
        let stats = sqlx::query_as::<_, ExclusionStatistics>(
            r#"SELECT
                   COUNT(*) AS total_excluded,
                   COUNT(*) FILTER (WHERE excluded_date BETWEEN $1 AND $2) AS this_month,
                   COUNT(*) FILTER (WHERE exclusion_type = 'transfer') AS transferred,
                   COUNT(*) FILTER (WHERE exclusion_type = 'dropped_out') AS dropped_out,
                   COUNT(*) FILTER (WHERE exclusion_type = 'completed') AS completed
               FROM excluded_students"#,
        )
        .bind(month_start)
        .bind(month_end)
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }

    async fn delete_excluded_before(&self, cutoff: NaiveDate) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM excluded_students WHERE excluded_date < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?;
        Ok(result.rows_affected())
    }
}
