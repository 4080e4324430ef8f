use telematics_client::prelude::*;

#[tokio::main]
async fn main() -> TelematicsResult<()> {
    setup_logger();

    let client = Client::new(Config::new()).await?;

    let user_id = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "00000000-0000-0000-0000-000000000000".to_string());

    let position = client.engagement().user_leaderboard(&user_id).await?;
    info!("Position: {}", position);

    let board = client
        .engagement()
        .general_leaderboard(&user_id, LeaderboardRequest::default())
        .await?;
    info!("Leaderboard: {}", serde_json::to_string_pretty(board.result())?);

    Ok(())
}
