pub mod conversation_service;
pub mod identity_service;
pub mod profile_service;
