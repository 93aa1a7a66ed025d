use reqwest::Client;

pub const BASE_URL: &str = "http://localhost:8000";

/// Build a reqwest client for tests.
pub fn client() -> Client {
    Client::new()
}

/// Build a URL for an API endpoint.
pub fn url(path: &str) -> String {
    format!("{}{}", BASE_URL, path)
}

/// Build the watch-socket URL for a game id.
pub fn ws_url(game_id: &str) -> String {
    format!("{}/socket/{}", BASE_URL.replacen("http", "ws", 1), game_id)
}
