pub mod dtos;
pub mod models;
pub mod service;

pub use service::WorkflowService;
