pub mod controller;
pub mod guard;
pub mod model;
pub mod router;
pub mod service;

pub use model::*;
pub use router::{init_general_students_router, init_students_router};
