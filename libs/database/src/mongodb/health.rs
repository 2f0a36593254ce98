use mongodb::Client;

use super::connector::ping;

/// Ping the server; `Err` carries the driver's message
pub async fn check_health(client: &Client) -> Result<(), String> {
    ping(client).await.map_err(|e| e.to_string())
}
