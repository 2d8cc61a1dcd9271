//! Diagnostic endpoints: hello, echo, delays, forced statuses, fake load, logging, time

use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::echo::InboundRequest;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Path, Query};
use crate::domain::StatusClass;
use crate::infrastructure::{start_cpu_load, start_memory_load};

pub const MAX_DELAY_SECONDS: u64 = 30;
pub const MAX_CPU_THREADS: u64 = 64;
pub const MAX_MEMORY_MB: u64 = 4096;
const MAX_STATUS_DELAY_MS: u64 = 1000;

#[derive(Debug, Deserialize)]
pub struct DelayRangeQuery {
    #[serde(rename = "min-delay-second", default)]
    pub min: u64,
    #[serde(rename = "max-delay-second", default = "default_max_delay")]
    pub max: u64,
}

fn default_max_delay() -> u64 {
    20
}

#[derive(Debug, Deserialize)]
pub struct CpuLoadQuery {
    #[serde(default = "default_cpu")]
    pub cpu: u32,
    #[serde(rename = "period-second", default)]
    pub period_second: u64,
}

fn default_cpu() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct MemoryLoadQuery {
    #[serde(rename = "memory-mb", default)]
    pub memory_mb: u64,
    #[serde(rename = "period-second", default)]
    pub period_second: u64,
}

#[derive(Debug, Deserialize)]
pub struct LogQuery {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeResponse {
    pub random_number: i64,
    pub current_time: String,
}

/// GET /api/hello
pub async fn hello(State(state): State<AppState>) -> String {
    info!("Calling hello");
    state.identity.hello()
}

/// ANY /api/echo
pub async fn echo(inbound: InboundRequest) -> String {
    info!("Calling echo");
    inbound.echo.render()
}

/// GET /api/delay/{delay-second}
pub async fn delay(Path(delay_second): Path<u64>) -> Result<String, ApiError> {
    info!("Calling delay");
    check_delay("delay-second", delay_second)?;

    tokio::time::sleep(Duration::from_secs(delay_second)).await;

    Ok(format!("Return after {} second delay", delay_second))
}

/// GET /api/delay?min-delay-second=&max-delay-second=
pub async fn random_delay(Query(range): Query<DelayRangeQuery>) -> Result<String, ApiError> {
    info!("Calling delay (random)");
    check_delay("min-delay-second", range.min)?;
    check_delay("max-delay-second", range.max)?;

    let delay_second = pick_delay(range.min, range.max, &mut rand::thread_rng());
    tokio::time::sleep(Duration::from_secs(delay_second)).await;

    Ok(format!("Return after {} second delay", delay_second))
}

/// GET /api/status/{response-status-code}
pub async fn status(
    State(state): State<AppState>,
    Path(class): Path<StatusClass>,
) -> Result<Response, ApiError> {
    info!(class = %class, "Calling status");
    let delay_ms = rand::thread_rng().gen_range(0..=MAX_STATUS_DELAY_MS);

    tokio::time::sleep(Duration::from_millis(delay_ms)).await;

    let status = status_code(state.resolver.resolve(class))?;

    Ok((status, format!("Return after {} millisecond delay", delay_ms)).into_response())
}

/// GET /api/exception
pub async fn exception() -> ApiError {
    info!("Calling exception");
    ApiError::internal("Generate dummy exception: file not found")
}

/// GET /api/load/cpu
pub async fn load_cpu(Query(query): Query<CpuLoadQuery>) -> Result<String, ApiError> {
    info!("Calling load/cpu");
    check_max("cpu", u64::from(query.cpu), MAX_CPU_THREADS)?;

    start_cpu_load(query.cpu, Duration::from_secs(query.period_second));

    Ok(format!(
        "Starting fake load over period {} second, cpu thread {}",
        query.period_second, query.cpu
    ))
}

/// GET /api/load/memory
pub async fn load_memory(Query(query): Query<MemoryLoadQuery>) -> Result<String, ApiError> {
    info!("Calling load/memory");
    check_max("memory-mb", query.memory_mb, MAX_MEMORY_MB)?;

    start_memory_load(query.memory_mb as usize, Duration::from_secs(query.period_second));

    Ok(format!(
        "Starting fake load over period {} second, memory {} MB",
        query.period_second, query.memory_mb
    ))
}

/// GET /api/log?text=
pub async fn log(State(state): State<AppState>, Query(query): Query<LogQuery>) -> String {
    info!("Calling log");
    let log_text = format!("{} logging : {}", state.identity.identifier, query.text);
    info!("{}", log_text);

    log_text
}

/// GET /api/time
pub async fn time() -> Json<TimeResponse> {
    info!("Calling time");

    Json(TimeResponse {
        random_number: rand::thread_rng().r#gen(),
        current_time: Local::now().format("%H:%M:%S").to_string(),
    })
}

fn check_delay(name: &str, value: u64) -> Result<(), ApiError> {
    check_max(name, value, MAX_DELAY_SECONDS)
}

fn check_max(name: &str, value: u64, max: u64) -> Result<(), ApiError> {
    if value > max {
        return Err(ApiError::bad_request(format!(
            "{} (current value {}) must be less than or equal to {}",
            name, value, max
        )));
    }

    Ok(())
}

/// Delay in `[min, max)`; `max` is raised to `min` when smaller, and equal bounds give `min`
fn pick_delay<R: Rng + ?Sized>(min: u64, max: u64, rng: &mut R) -> u64 {
    let max = max.max(min);

    if max == min {
        min
    } else {
        rng.gen_range(min..max)
    }
}

/// Every resolved code is a valid HTTP status; anything else is an internal fault
pub(super) fn status_code(code: u16) -> Result<StatusCode, ApiError> {
    StatusCode::from_u16(code)
        .map_err(|_| ApiError::internal(format!("Resolved invalid status code {}", code)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_pick_delay_within_range() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let delay = pick_delay(2, 5, &mut rng);
            assert!((2..5).contains(&delay));
        }
    }

    #[test]
    fn test_pick_delay_max_below_min() {
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(pick_delay(10, 3, &mut rng), 10);
        assert_eq!(pick_delay(4, 4, &mut rng), 4);
        assert_eq!(pick_delay(0, 0, &mut rng), 0);
    }

    #[test]
    fn test_check_delay_bounds() {
        assert!(check_delay("delay-second", 0).is_ok());
        assert!(check_delay("delay-second", 30).is_ok());

        let err = check_delay("delay-second", 31).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.response.error.reason.contains("current value 31"));
    }

    #[test]
    fn test_load_bounds() {
        assert!(check_max("cpu", MAX_CPU_THREADS, MAX_CPU_THREADS).is_ok());
        assert!(check_max("memory-mb", 0, MAX_MEMORY_MB).is_ok());

        let err = check_max("memory-mb", 1 << 50, MAX_MEMORY_MB).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err
            .response
            .error
            .reason
            .starts_with("memory-mb (current value 1125899906842624)"));
    }

    #[tokio::test]
    async fn test_load_memory_rejects_oversized_request() {
        let query = MemoryLoadQuery {
            memory_mb: 1 << 50,
            period_second: 0,
        };

        let err = load_memory(Query(query)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_load_cpu_rejects_too_many_threads() {
        let query = CpuLoadQuery {
            cpu: u32::MAX,
            period_second: 0,
        };

        let err = load_cpu(Query(query)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.response.error.reason.contains("must be less than or equal to 64"));
    }

    #[test]
    fn test_delay_range_defaults() {
        let range: DelayRangeQuery = serde_urlencoded::from_str("").unwrap();

        assert_eq!(range.min, 0);
        assert_eq!(range.max, 20);
    }

    #[test]
    fn test_load_query_defaults() {
        let cpu: CpuLoadQuery = serde_urlencoded::from_str("").unwrap();
        assert_eq!(cpu.cpu, 1);
        assert_eq!(cpu.period_second, 0);

        let memory: MemoryLoadQuery =
            serde_urlencoded::from_str("memory-mb=64&period-second=10").unwrap();
        assert_eq!(memory.memory_mb, 64);
        assert_eq!(memory.period_second, 10);
    }

    #[test]
    fn test_time_response_shape() {
        let json = serde_json::to_value(TimeResponse {
            random_number: -4,
            current_time: "10:11:12".to_string(),
        })
        .unwrap();

        assert_eq!(json["randomNumber"], -4);
        assert_eq!(json["currentTime"], "10:11:12");
    }
}
