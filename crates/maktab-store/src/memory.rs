//! In-memory backend.
//!
//! Used by the integration test-suite in place of PostgreSQL. It mirrors
//! the schema's uniqueness rules exactly: unique teacher names per register,
//! unique ustaad names, unique ledger student IDs, and deliberately *no*
//! uniqueness on active-register student IDs (the restore bypass depends on
//! being able to insert colliding IDs).

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use maktab_models::{
    CreateStudentDto, CreateTeacherDto, CreateUstaadDto, ExcludedStudent, ExclusionStatistics,
    NewExcludedStudent, Student, StudentCategory, Teacher, TeacherCategory, UpdateStudentDto,
    UpdateTeacherDto, UpdateUstaadDto, Ustaad,
};
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::traits::{ExcludedStudentStore, StudentStore, TeacherStore, UstaadStore};

#[derive(Default)]
struct Tables {
    students: HashMap<&'static str, Vec<Student>>,
    teachers: HashMap<&'static str, Vec<Teacher>>,
    ustaads: Vec<Ustaad>,
    excluded: Vec<ExcludedStudent>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn register(&self, category: StudentCategory) -> &[Student] {
        self.students
            .get(category.table())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn register_mut(&mut self, category: StudentCategory) -> &mut Vec<Student> {
        self.students.entry(category.table()).or_default()
    }

    fn teacher_register(&self, category: TeacherCategory) -> &[Teacher] {
        self.teachers
            .get(category.table())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn teacher_register_mut(&mut self, category: TeacherCategory) -> &mut Vec<Teacher> {
        self.teachers.entry(category.table()).or_default()
    }
}

/// In-memory store backend.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn by_name_asc(students: &mut [Student]) {
    students.sort_by(|a, b| a.name.cmp(&b.name));
}

fn by_excluded_date_desc(excluded: &mut [ExcludedStudent]) {
    excluded.sort_by(|a, b| b.excluded_date.cmp(&a.excluded_date));
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn list_students(&self, category: StudentCategory) -> StoreResult<Vec<Student>> {
        let inner = self.inner.read().await;
        let mut students = inner.register(category).to_vec();
        by_name_asc(&mut students);
        Ok(students)
    }

    async fn find_student(
        &self,
        category: StudentCategory,
        id: i64,
    ) -> StoreResult<Option<Student>> {
        let inner = self.inner.read().await;
        Ok(inner.register(category).iter().find(|s| s.id == id).cloned())
    }

    async fn find_student_by_student_id(
        &self,
        category: StudentCategory,
        student_id: &str,
    ) -> StoreResult<Option<Student>> {
        let inner = self.inner.read().await;
        Ok(inner
            .register(category)
            .iter()
            .find(|s| s.student_id == student_id)
            .cloned())
    }

    async fn students_by_ustadh(
        &self,
        category: StudentCategory,
        ustadh: &str,
    ) -> StoreResult<Vec<Student>> {
        let inner = self.inner.read().await;
        let mut students: Vec<Student> = inner
            .register(category)
            .iter()
            .filter(|s| s.ustadh == ustadh)
            .cloned()
            .collect();
        by_name_asc(&mut students);
        Ok(students)
    }

    async fn students_by_ustadh_and_class(
        &self,
        category: StudentCategory,
        ustadh: &str,
        class_teaching: &str,
    ) -> StoreResult<Vec<Student>> {
        let inner = self.inner.read().await;
        let mut students: Vec<Student> = inner
            .register(category)
            .iter()
            .filter(|s| s.ustadh == ustadh && s.class_teaching == class_teaching)
            .cloned()
            .collect();
        by_name_asc(&mut students);
        Ok(students)
    }

    async fn student_id_exists(
        &self,
        category: StudentCategory,
        student_id: &str,
    ) -> StoreResult<bool> {
        let inner = self.inner.read().await;
        Ok(inner
            .register(category)
            .iter()
            .any(|s| s.student_id == student_id))
    }

    async fn student_pair_exists(
        &self,
        category: StudentCategory,
        name: &str,
        student_id: &str,
    ) -> StoreResult<bool> {
        let inner = self.inner.read().await;
        let name_lower = name.to_lowercase();
        Ok(inner
            .register(category)
            .iter()
            .any(|s| s.name.to_lowercase() == name_lower && s.student_id == student_id))
    }

    async fn insert_student(
        &self,
        category: StudentCategory,
        dto: &CreateStudentDto,
    ) -> StoreResult<Student> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id();
        let now = Utc::now();
        let student = Student {
            id,
            student_id: dto.student_id.clone(),
            name: dto.name.clone(),
            gender: dto.gender.clone(),
            date_joined: dto.date_joined,
            location: dto.location.clone(),
            madrassa_location: dto.madrassa_location.clone(),
            shoe_size: dto.shoe_size.clone(),
            cell: dto.cell.clone(),
            ustadh: dto.ustadh.clone(),
            class_teaching: dto.class_teaching.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        inner.register_mut(category).push(student.clone());
        Ok(student)
    }

    async fn update_student(
        &self,
        category: StudentCategory,
        id: i64,
        dto: &UpdateStudentDto,
    ) -> StoreResult<Option<Student>> {
        let mut inner = self.inner.write().await;
        let Some(student) = inner.register_mut(category).iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        student.student_id = dto.student_id.clone();
        student.name = dto.name.clone();
        student.gender = dto.gender.clone();
        student.date_joined = dto.date_joined;
        student.location = dto.location.clone();
        student.madrassa_location = dto.madrassa_location.clone();
        student.shoe_size = dto.shoe_size.clone();
        student.cell = dto.cell.clone();
        student.ustadh = dto.ustadh.clone();
        student.class_teaching = dto.class_teaching.clone();
        student.updated_at = Some(Utc::now());
        Ok(Some(student.clone()))
    }

    async fn transfer_student(
        &self,
        category: StudentCategory,
        id: i64,
        ustadh: &str,
        class_teaching: &str,
    ) -> StoreResult<Option<Student>> {
        let mut inner = self.inner.write().await;
        let Some(student) = inner.register_mut(category).iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        student.ustadh = ustadh.to_string();
        student.class_teaching = class_teaching.to_string();
        student.updated_at = Some(Utc::now());
        Ok(Some(student.clone()))
    }

    async fn delete_student(&self, category: StudentCategory, id: i64) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        let register = inner.register_mut(category);
        let before = register.len();
        register.retain(|s| s.id != id);
        Ok(register.len() < before)
    }

    async fn delete_students_by_ustadh(
        &self,
        category: StudentCategory,
        ustadh: &str,
    ) -> StoreResult<u64> {
        let mut inner = self.inner.write().await;
        let register = inner.register_mut(category);
        let before = register.len();
        register.retain(|s| s.ustadh != ustadh);
        Ok((before - register.len()) as u64)
    }

    async fn count_students_by_ustadh(
        &self,
        category: StudentCategory,
        ustadh: &str,
    ) -> StoreResult<i64> {
        let inner = self.inner.read().await;
        Ok(inner
            .register(category)
            .iter()
            .filter(|s| s.ustadh == ustadh)
            .count() as i64)
    }

    async fn update_class_for_ustadh(
        &self,
        category: StudentCategory,
        ustadh: &str,
        old_class_teaching: &str,
        new_class_teaching: &str,
    ) -> StoreResult<u64> {
        let mut inner = self.inner.write().await;
        let mut updated = 0;
        for student in inner
            .register_mut(category)
            .iter_mut()
            .filter(|s| s.ustadh == ustadh && s.class_teaching == old_class_teaching)
        {
            student.class_teaching = new_class_teaching.to_string();
            student.updated_at = Some(Utc::now());
            updated += 1;
        }
        Ok(updated)
    }

    async fn search_students(
        &self,
        category: StudentCategory,
        term: &str,
    ) -> StoreResult<Vec<Student>> {
        let inner = self.inner.read().await;
        let term_lower = term.to_lowercase();
        let mut students: Vec<Student> = inner
            .register(category)
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&term_lower) || s.student_id.contains(term))
            .cloned()
            .collect();
        by_name_asc(&mut students);
        Ok(students)
    }
}

#[async_trait]
impl TeacherStore for MemoryStore {
    async fn list_teachers(&self, category: TeacherCategory) -> StoreResult<Vec<Teacher>> {
        let inner = self.inner.read().await;
        let mut teachers = inner.teacher_register(category).to_vec();
        teachers.sort_by_key(|t| t.id);
        Ok(teachers)
    }

    async fn find_teacher(
        &self,
        category: TeacherCategory,
        id: i64,
    ) -> StoreResult<Option<Teacher>> {
        let inner = self.inner.read().await;
        Ok(inner
            .teacher_register(category)
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn teacher_name_exists(
        &self,
        category: TeacherCategory,
        name: &str,
    ) -> StoreResult<bool> {
        let inner = self.inner.read().await;
        Ok(inner.teacher_register(category).iter().any(|t| t.name == name))
    }

    async fn find_teacher_by_name_and_class(
        &self,
        category: TeacherCategory,
        name: &str,
        class_teaching: &str,
    ) -> StoreResult<Option<Teacher>> {
        let inner = self.inner.read().await;
        Ok(inner
            .teacher_register(category)
            .iter()
            .find(|t| t.name == name && t.class_teaching == class_teaching)
            .cloned())
    }

    async fn insert_teacher(
        &self,
        category: TeacherCategory,
        dto: &CreateTeacherDto,
    ) -> StoreResult<Teacher> {
        let mut inner = self.inner.write().await;
        if inner
            .teacher_register(category)
            .iter()
            .any(|t| t.name == dto.name)
        {
            return Err(StoreError::UniqueViolation);
        }
        let id = inner.next_id();
        let now = Utc::now();
        let teacher = Teacher {
            id,
            name: dto.name.clone(),
            class_teaching: dto.class_teaching.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        inner.teacher_register_mut(category).push(teacher.clone());
        Ok(teacher)
    }

    async fn update_teacher(
        &self,
        category: TeacherCategory,
        id: i64,
        dto: &UpdateTeacherDto,
    ) -> StoreResult<Option<Teacher>> {
        let mut inner = self.inner.write().await;
        if inner
            .teacher_register(category)
            .iter()
            .any(|t| t.id != id && t.name == dto.name)
        {
            return Err(StoreError::UniqueViolation);
        }
        let Some(teacher) = inner
            .teacher_register_mut(category)
            .iter_mut()
            .find(|t| t.id == id)
        else {
            return Ok(None);
        };
        teacher.name = dto.name.clone();
        teacher.class_teaching = dto.class_teaching.clone();
        teacher.updated_at = Some(Utc::now());
        Ok(Some(teacher.clone()))
    }

    async fn delete_teacher(&self, category: TeacherCategory, id: i64) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        let register = inner.teacher_register_mut(category);
        let before = register.len();
        register.retain(|t| t.id != id);
        Ok(register.len() < before)
    }

    async fn search_teachers(
        &self,
        category: TeacherCategory,
        name: &str,
    ) -> StoreResult<Vec<Teacher>> {
        let inner = self.inner.read().await;
        let name_lower = name.to_lowercase();
        let mut teachers: Vec<Teacher> = inner
            .teacher_register(category)
            .iter()
            .filter(|t| t.name.to_lowercase().contains(&name_lower))
            .cloned()
            .collect();
        teachers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(teachers)
    }
}

#[async_trait]
impl UstaadStore for MemoryStore {
    async fn list_ustaads(&self) -> StoreResult<Vec<Ustaad>> {
        let inner = self.inner.read().await;
        let mut ustaads = inner.ustaads.clone();
        ustaads.sort_by_key(|u| u.id);
        Ok(ustaads)
    }

    async fn find_ustaad(&self, id: i64) -> StoreResult<Option<Ustaad>> {
        let inner = self.inner.read().await;
        Ok(inner.ustaads.iter().find(|u| u.id == id).cloned())
    }

    async fn ustaad_name_exists(&self, full_name: &str) -> StoreResult<bool> {
        let inner = self.inner.read().await;
        Ok(inner.ustaads.iter().any(|u| u.full_name == full_name))
    }

    async fn insert_ustaad(&self, dto: &CreateUstaadDto) -> StoreResult<Ustaad> {
        let mut inner = self.inner.write().await;
        if inner.ustaads.iter().any(|u| u.full_name == dto.full_name) {
            return Err(StoreError::UniqueViolation);
        }
        let id = inner.next_id();
        let now = Utc::now();
        let ustaad = Ustaad {
            id,
            full_name: dto.full_name.clone(),
            class_teaching: dto.class_teaching.clone(),
            center: dto.center.clone(),
            phone: dto.phone.clone(),
            num_students: dto.num_students,
            created_at: Some(now),
            updated_at: Some(now),
        };
        inner.ustaads.push(ustaad.clone());
        Ok(ustaad)
    }

    async fn update_ustaad(&self, id: i64, dto: &UpdateUstaadDto) -> StoreResult<Option<Ustaad>> {
        let mut inner = self.inner.write().await;
        if inner
            .ustaads
            .iter()
            .any(|u| u.id != id && u.full_name == dto.full_name)
        {
            return Err(StoreError::UniqueViolation);
        }
        let Some(ustaad) = inner.ustaads.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        ustaad.full_name = dto.full_name.clone();
        ustaad.class_teaching = dto.class_teaching.clone();
        ustaad.center = dto.center.clone();
        ustaad.phone = dto.phone.clone();
        ustaad.num_students = dto.num_students;
        ustaad.updated_at = Some(Utc::now());
        Ok(Some(ustaad.clone()))
    }

    async fn delete_ustaad(&self, id: i64) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.ustaads.len();
        inner.ustaads.retain(|u| u.id != id);
        Ok(inner.ustaads.len() < before)
    }

    async fn search_ustaads(&self, name: &str) -> StoreResult<Vec<Ustaad>> {
        let inner = self.inner.read().await;
        let name_lower = name.to_lowercase();
        let mut ustaads: Vec<Ustaad> = inner
            .ustaads
            .iter()
            .filter(|u| u.full_name.to_lowercase().contains(&name_lower))
            .cloned()
            .collect();
        ustaads.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(ustaads)
    }
}

#[async_trait]
impl ExcludedStudentStore for MemoryStore {
    async fn list_excluded(&self) -> StoreResult<Vec<ExcludedStudent>> {
        let inner = self.inner.read().await;
        let mut excluded = inner.excluded.clone();
        by_excluded_date_desc(&mut excluded);
        Ok(excluded)
    }

    async fn find_excluded(&self, id: i64) -> StoreResult<Option<ExcludedStudent>> {
        let inner = self.inner.read().await;
        Ok(inner.excluded.iter().find(|e| e.id == id).cloned())
    }

    async fn find_excluded_by_student_id(
        &self,
        student_id: &str,
    ) -> StoreResult<Option<ExcludedStudent>> {
        let inner = self.inner.read().await;
        Ok(inner
            .excluded
            .iter()
            .find(|e| e.student_id == student_id)
            .cloned())
    }

    async fn excluded_id_exists(&self, student_id: &str) -> StoreResult<bool> {
        let inner = self.inner.read().await;
        Ok(inner.excluded.iter().any(|e| e.student_id == student_id))
    }

    async fn exclude_student(
        &self,
        snapshot: &NewExcludedStudent,
        active_student_id: i64,
    ) -> StoreResult<ExcludedStudent> {
        let mut inner = self.inner.write().await;
        if inner
            .excluded
            .iter()
            .any(|e| e.student_id == snapshot.student_id)
        {
            return Err(StoreError::UniqueViolation);
        }
        let id = inner.next_id();
        let excluded = ExcludedStudent {
            id,
            student_id: snapshot.student_id.clone(),
            name: snapshot.name.clone(),
            gender: snapshot.gender.clone(),
            date_joined: snapshot.date_joined,
            location: snapshot.location.clone(),
            madrassa_location: snapshot.madrassa_location.clone(),
            shoe_size: snapshot.shoe_size.clone(),
            cell: snapshot.cell.clone(),
            ustadh: snapshot.ustadh.clone(),
            class_teaching: snapshot.class_teaching.clone(),
            excluded_date: snapshot.excluded_date,
            excluded_by: snapshot.excluded_by.clone(),
            reason: snapshot.reason.clone(),
            exclusion_type: snapshot.exclusion_type.clone(),
            additional_notes: snapshot.additional_notes.clone(),
            created_at: Some(Utc::now()),
        };
        inner.excluded.push(excluded.clone());
        inner
            .register_mut(StudentCategory::General)
            .retain(|s| s.id != active_student_id);
        Ok(excluded)
    }

    async fn delete_excluded(&self, id: i64) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.excluded.len();
        inner.excluded.retain(|e| e.id != id);
        Ok(inner.excluded.len() < before)
    }

    async fn excluded_by_ustadh(&self, ustadh: &str) -> StoreResult<Vec<ExcludedStudent>> {
        let inner = self.inner.read().await;
        let mut excluded: Vec<ExcludedStudent> = inner
            .excluded
            .iter()
            .filter(|e| e.ustadh == ustadh)
            .cloned()
            .collect();
        by_excluded_date_desc(&mut excluded);
        Ok(excluded)
    }

    async fn excluded_by_ustadh_and_class(
        &self,
        ustadh: &str,
        class_teaching: &str,
    ) -> StoreResult<Vec<ExcludedStudent>> {
        let inner = self.inner.read().await;
        let mut excluded: Vec<ExcludedStudent> = inner
            .excluded
            .iter()
            .filter(|e| e.ustadh == ustadh && e.class_teaching == class_teaching)
            .cloned()
            .collect();
        by_excluded_date_desc(&mut excluded);
        Ok(excluded)
    }

    async fn excluded_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> StoreResult<Vec<ExcludedStudent>> {
        let inner = self.inner.read().await;
        let mut excluded: Vec<ExcludedStudent> = inner
            .excluded
            .iter()
            .filter(|e| e.excluded_date >= from && e.excluded_date <= to)
            .cloned()
            .collect();
        by_excluded_date_desc(&mut excluded);
        Ok(excluded)
    }

    async fn search_excluded(&self, term: &str) -> StoreResult<Vec<ExcludedStudent>> {
        let inner = self.inner.read().await;
        let term_lower = term.to_lowercase();
        let mut excluded: Vec<ExcludedStudent> = inner
            .excluded
            .iter()
            .filter(|e| {
                e.name.to_lowercase().contains(&term_lower)
                    || e.student_id.contains(term)
                    || e.reason.to_lowercase().contains(&term_lower)
            })
            .cloned()
            .collect();
        by_excluded_date_desc(&mut excluded);
        Ok(excluded)
    }

    async fn exclusion_statistics(
        &self,
        month_start: NaiveDate,
        month_end: NaiveDate,
    ) -> StoreResult<ExclusionStatistics> {
        let inner = self.inner.read().await;
        let this_month = inner
            .excluded
            .iter()
            .filter(|e| e.excluded_date >= month_start && e.excluded_date <= month_end)
            .count() as i64;
        let count_type = |tag: &str| {
            inner
                .excluded
                .iter()
                .filter(|e| e.exclusion_type == tag)
                .count() as i64
        };
        Ok(ExclusionStatistics {
            total_excluded: inner.excluded.len() as i64,
            this_month,
            transferred: count_type("transfer"),
            dropped_out: count_type("dropped_out"),
            completed: count_type("completed"),
        })
    }

    async fn delete_excluded_before(&self, cutoff: NaiveDate) -> StoreResult<u64> {
        let mut inner = self.inner.write().await;
        let before = inner.excluded.len();
        inner.excluded.retain(|e| e.excluded_date >= cutoff);
        Ok((before - inner.excluded.len()) as u64)
    }
}
