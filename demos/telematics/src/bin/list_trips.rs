use telematics_client::prelude::*;

#[tokio::main]
async fn main() -> TelematicsResult<()> {
    setup_logger();

    let client = Client::new(Config::new()).await?;

    // Get parameters from command line or use defaults
    let user_id = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "00000000-0000-0000-0000-000000000000".to_string());

    let days: i64 = std::env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(7);

    let today = Utc::now().date_naive();
    let request = TripListRequest::new(&user_id)
        .with_date_range(DateRange::dates(today - Duration::days(days), today))
        .with_includes(true, true, true, false);

    info!("=== Trips of {} over the last {} days ===", user_id, days);
    let response = client.trips().list_trips(request).await?;

    if response.is_error() {
        warn!("Request failed: {:?}", response.title());
        return Ok(());
    }

    info!("Trips found: {}", response.trips().len());
    for trip in response.trips() {
        info!("{}", serde_json::to_string_pretty(trip)?);
    }

    Ok(())
}
