pub mod commands;
pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;
pub mod ui;
pub mod utils;

use crate::config::Config;
use crate::error::Result;
use crate::services::{
    api_client::ApiClient, session_store::SessionStore, test_fetcher::TestFetcher,
};

/// Long-lived collaborators shared by every command.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub api_client: ApiClient,
    pub session_store: SessionStore,
    pub test_fetcher: TestFetcher,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let api_client = ApiClient::new(&config)?;
        let session_store = SessionStore::new(config.session_file.clone());
        let test_fetcher = TestFetcher::new(api_client.clone());

        Ok(Self {
            config,
            api_client,
            session_store,
            test_fetcher,
        })
    }
}
