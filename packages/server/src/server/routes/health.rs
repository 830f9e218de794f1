use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;
use std::time::Instant;

use crate::kernel::ServerDeps;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    database: DatabaseHealth,
    connection_pool: ConnectionPoolHealth,
    directory: DirectoryHealth,
}

#[derive(Serialize)]
pub struct DatabaseHealth {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
pub struct ConnectionPoolHealth {
    size: u32,
    idle_connections: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_connections: Option<u32>,
}

/// Catalog visibility: how many tools the directory is serving.
/// `None` when the count query itself failed.
#[derive(Serialize)]
pub struct DirectoryHealth {
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<i64>,
}

/// Health check endpoint
///
/// Checks:
/// - Database connectivity and round-trip latency
/// - Connection pool utilization
/// - Tool directory row count (the product is unusable at zero)
///
/// Returns 200 OK if all systems are healthy, 503 Service Unavailable otherwise.
pub async fn health_handler(
    Extension(deps): Extension<ServerDeps>,
) -> (StatusCode, Json<HealthResponse>) {
    // Check database connection and measure latency
    let probe_start = Instant::now();
    let db_health = match tokio::time::timeout(
        std::time::Duration::from_secs(5),
        sqlx::query("SELECT 1").execute(&deps.db_pool),
    )
    .await
    {
        Ok(Ok(_)) => DatabaseHealth {
            status: "ok".to_string(),
            latency_ms: Some(probe_start.elapsed().as_millis() as u64),
            error: None,
        },
        Ok(Err(e)) => DatabaseHealth {
            status: "error".to_string(),
            latency_ms: None,
            error: Some(format!("Query failed: {}", e)),
        },
        Err(_) => DatabaseHealth {
            status: "error".to_string(),
            latency_ms: None,
            error: Some("Query timeout (>5s)".to_string()),
        },
    };

    // Get connection pool metrics
    let pool_options = deps.db_pool.options();
    let pool_health = ConnectionPoolHealth {
        size: deps.db_pool.size(),
        idle_connections: deps.db_pool.num_idle(),
        max_connections: Some(pool_options.get_max_connections()),
    };

    // Count the directory only when the database already answered
    let directory = if db_health.status == "ok" {
        let tools = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tools")
            .fetch_one(&deps.db_pool)
            .await
            .ok();
        DirectoryHealth { tools }
    } else {
        DirectoryHealth { tools: None }
    };

    // Determine overall health
    let is_healthy = db_health.status == "ok";

    let overall_status = if is_healthy { "healthy" } else { "unhealthy" };

    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: overall_status.to_string(),
            database: db_health,
            connection_pool: pool_health,
            directory,
        }),
    )
}
