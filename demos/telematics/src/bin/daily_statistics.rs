use telematics_client::prelude::*;

#[tokio::main]
async fn main() -> TelematicsResult<()> {
    setup_logger();

    let client = Client::new(Config::new()).await?;

    let user_id = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "00000000-0000-0000-0000-000000000000".to_string());

    let start_date = std::env::args()
        .nth(2)
        .unwrap_or_else(|| "2025-01-01".to_string());

    let end_date = std::env::args()
        .nth(3)
        .unwrap_or_else(|| "2025-01-31".to_string());

    // Daily queries are cut to fourteen days
    let range = DateRange::parse_dates(&start_date, &end_date)?;

    info!("=== Daily indicators of {} ===", user_id);
    let statistics = client
        .statistics()
        .user_daily_statistics(&user_id, range, None)
        .await?;
    info!("Statistics: {}", statistics);

    let safety = client
        .statistics()
        .user_daily_safety_score(&user_id, range, None)
        .await?;
    info!("Safety score: {}", safety);

    let eco = client
        .statistics()
        .user_daily_eco_score(&user_id, range)
        .await?;
    info!("Eco score: {}", eco);

    Ok(())
}
