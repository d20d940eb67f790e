pub mod admin_dto;
pub mod submission_dto;
