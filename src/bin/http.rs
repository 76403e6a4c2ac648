#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;

    use chrono::Local;
    use shift_schedule::{ScheduleConfig, ShiftSchedule, http_api, load_config_from_json};
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let addr: SocketAddr = std::env::var("SHIFT_SCHEDULE_HTTP_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;

    let config = match std::env::var("SHIFT_SCHEDULE_CONFIG") {
        Ok(path) => load_config_from_json(path)?,
        Err(_) => ScheduleConfig::default(),
    };

    println!("shift-schedule HTTP API listening on http://{addr}");
    let schedule = ShiftSchedule::covering(config, Local::now().naive_local());
    http_api::serve(addr, schedule).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
