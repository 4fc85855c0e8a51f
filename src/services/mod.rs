pub mod api_client;
pub mod countdown_service;
pub mod navigation_service;
pub mod session_store;
pub mod submission_service;
pub mod test_fetcher;
