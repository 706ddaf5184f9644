use utoipa::OpenApi;

use crate::modules::duplicate_check::model::DuplicateCheckResponse;
use crate::modules::excluded_students::model::{
    ExcludeStudentDto, ExcludeStudentResponse, ExcludedStudent, ExclusionStatistics,
};
use crate::modules::students::model::{
    CreateStudentDto, Student, TransferStudentDto, UpdateStudentDto,
};
use crate::modules::teachers::model::{CreateTeacherDto, Teacher, TeacherAccessDto, UpdateTeacherDto};
use crate::modules::ustaads::model::{CreateUstaadDto, UpdateUstaadDto, Ustaad};
use maktab_models::{ErrorResponse, MessageResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::get_student_by_student_id,
        crate::modules::students::controller::get_students_by_teacher,
        crate::modules::students::controller::get_students_by_teacher_class,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::students::controller::delete_students_by_teacher,
        crate::modules::students::controller::count_students_by_teacher,
        crate::modules::students::controller::update_students_class,
        crate::modules::students::controller::search_students,
        crate::modules::students::controller::transfer_student,
        crate::modules::teachers::controller::create_teacher,
        crate::modules::teachers::controller::get_teachers,
        crate::modules::teachers::controller::get_teacher,
        crate::modules::teachers::controller::update_teacher,
        crate::modules::teachers::controller::delete_teacher,
        crate::modules::teachers::controller::search_teachers,
        crate::modules::teachers::controller::access_teacher,
        crate::modules::ustaads::controller::create_ustaad,
        crate::modules::ustaads::controller::get_ustaads,
        crate::modules::ustaads::controller::get_ustaad,
        crate::modules::ustaads::controller::update_ustaad,
        crate::modules::ustaads::controller::delete_ustaad,
        crate::modules::ustaads::controller::search_ustaads,
        crate::modules::excluded_students::controller::exclude_student,
        crate::modules::excluded_students::controller::get_excluded_students,
        crate::modules::excluded_students::controller::get_excluded_student,
        crate::modules::excluded_students::controller::get_excluded_students_by_teacher,
        crate::modules::excluded_students::controller::get_excluded_students_by_teacher_class,
        crate::modules::excluded_students::controller::get_excluded_students_this_month,
        crate::modules::excluded_students::controller::search_excluded_students,
        crate::modules::excluded_students::controller::delete_excluded_student,
        crate::modules::excluded_students::controller::get_statistics,
        crate::modules::duplicate_check::controller::check_student_duplicate,
        crate::modules::duplicate_check::controller::check_name_duplicate,
    ),
    components(
        schemas(
            Student,
            CreateStudentDto,
            UpdateStudentDto,
            TransferStudentDto,
            Teacher,
            CreateTeacherDto,
            UpdateTeacherDto,
            TeacherAccessDto,
            Ustaad,
            CreateUstaadDto,
            UpdateUstaadDto,
            ExcludedStudent,
            ExcludeStudentDto,
            ExcludeStudentResponse,
            ExclusionStatistics,
            DuplicateCheckResponse,
            MessageResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Students", description = "Student register endpoints (general, adult and men registers share this surface)"),
        (name = "Teachers", description = "Teacher register endpoints"),
        (name = "Ustaads", description = "Ustaad management endpoints"),
        (name = "Excluded students", description = "Exclusion ledger endpoints"),
        (name = "Duplicate check", description = "Pre-registration duplicate probes")
    ),
    info(
        title = "Maktab API",
        version = "0.1.0",
        description = "A REST API built with Rust, Axum, and PostgreSQL for managing madrassa student and teacher registers, with an exclusion ledger that blocks re-registration of excluded students for three years.",
        contact(
            name = "API Support",
            email = "support@maktab.app"
        ),
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;
