pub mod health_endpoint_tests;
pub mod service_api_tests;
