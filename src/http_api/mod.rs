use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{Local, NaiveDateTime};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::{
    Interval, ScheduleConfig, ScheduleError, ShiftSchedule, check_horizon_days, current_status,
    default_horizon_days, generate, next_work_start,
};

#[derive(Clone)]
pub struct AppState {
    schedule: Arc<RwLock<ShiftSchedule>>,
}

impl AppState {
    pub fn new(schedule: ShiftSchedule) -> Self {
        Self {
            schedule: Arc::new(RwLock::new(schedule)),
        }
    }

    fn schedule(&self) -> Arc<RwLock<ShiftSchedule>> {
        self.schedule.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'a str>,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    Invalid {
        field: Option<&'static str>,
        message: String,
    },
}

impl From<ScheduleError> for ApiError {
    fn from(value: ScheduleError) -> Self {
        ApiError::Invalid {
            field: value.field(),
            message: value.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid { field, message } => {
                let body = Json(ErrorBody {
                    error: "invalid_configuration",
                    field,
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    days: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleBody {
    pub horizon_days: u32,
    pub intervals: Vec<Interval>,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    now: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusBody {
    pub now: NaiveDateTime,
    pub status: String,
    pub message: String,
    pub interval: Option<Interval>,
    pub next_work: Option<Interval>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/config", get(get_config).put(update_config))
        .route("/schedule", get(get_schedule))
        .route("/status", get(get_status))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, schedule: ShiftSchedule) -> std::io::Result<()> {
    let state = AppState::new(schedule);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "http api listening");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_config(State(state): State<AppState>) -> Json<ScheduleConfig> {
    let schedule = state.schedule();
    let config = {
        let guard = schedule.read();
        guard.config().clone()
    };
    Json(config)
}

async fn update_config(
    State(state): State<AppState>,
    Json(config): Json<ScheduleConfig>,
) -> Result<Json<ScheduleConfig>, ApiError> {
    let schedule = state.schedule();
    let current = {
        let mut guard = schedule.write();
        guard.set_config(config)?;
        guard.config().clone()
    };
    Ok(Json(current))
}

async fn get_schedule(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<ScheduleBody>, ApiError> {
    if let Some(days) = query.days {
        check_horizon_days(days)?;
    }
    let schedule = state.schedule();
    let body = {
        let guard = schedule.read();
        match query.days {
            Some(days) if days != guard.horizon_days() => ScheduleBody {
                horizon_days: days,
                intervals: generate(guard.config(), days),
            },
            _ => ScheduleBody {
                horizon_days: guard.horizon_days(),
                intervals: guard.intervals().to_vec(),
            },
        }
    };
    Ok(Json(body))
}

async fn get_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Json<StatusBody> {
    let now = query.now.unwrap_or_else(|| Local::now().naive_local());
    let schedule = state.schedule();
    let config = {
        let guard = schedule.read();
        guard.config().clone()
    };
    let intervals = generate(&config, default_horizon_days(config.start_date, now));
    let status = current_status(&intervals, now);
    Json(StatusBody {
        now,
        status: status.as_str().to_string(),
        message: status.message().to_string(),
        interval: status.interval().copied(),
        next_work: next_work_start(&intervals, now).copied(),
    })
}
