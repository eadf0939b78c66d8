pub mod advisor_backend;
pub mod http_backend;
#[cfg(test)]
pub(crate) mod fake_backend;

pub use advisor_backend::AdvisorBackend;
pub use http_backend::HttpAdvisorBackend;
