pub mod analytics_service;
pub mod assessment_service;
pub mod report_service;
