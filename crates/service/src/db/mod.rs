pub mod page_service;
pub mod offering_service;
pub mod lead_service;
pub mod dashboard_service;
pub mod settings_service;
