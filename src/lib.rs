pub mod backend;
pub mod config;
pub mod error;
pub mod extractors;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod parser;
pub mod resource;
pub mod startup;

pub use models::{Classroom, Executive, Record, Student, Subject, Teacher};
