pub mod explain_service;
