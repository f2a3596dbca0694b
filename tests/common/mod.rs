use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::MockServer;

use ragchat::config::EndpointConfig;
use ragchat::HttpChatClient;

/// Path the mock endpoint is mounted on
#[allow(dead_code)]
pub const CHAT_PATH: &str = "/chat_by_telsa_bot";

#[allow(dead_code)]
pub fn endpoint_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), CHAT_PATH)
}

#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> HttpChatClient {
    HttpChatClient::new(&EndpointConfig {
        url: endpoint_url(server),
        timeout_seconds: Some(5),
    })
    .expect("failed to build chat client")
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
