//! PostgreSQL-backed registry over the `services` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use std::time::Duration;
use tracing::info;

use super::ServiceRegistry;
use crate::config::DatabaseConfig;
use crate::error::{StatusError, StatusResult};
use crate::models::{MonitoredService, NewMonitoredService};

const SERVICE_COLUMNS: &str =
    "id, name, url, check_type, current_status, last_checked_at, created_at, updated_at";

/// Raw `services` row; enum columns are stored as text
#[derive(Debug, Clone, FromRow)]
pub struct ServiceRow {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub check_type: String,
    pub current_status: String,
    pub last_checked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ServiceRow> for MonitoredService {
    type Error = StatusError;

    fn try_from(row: ServiceRow) -> Result<Self, Self::Error> {
        let check_type = row.check_type.parse().map_err(|e: String| {
            StatusError::Internal(format!("service {}: {e}", row.id))
        })?;
        let current_status = row.current_status.parse().map_err(|e: String| {
            StatusError::Internal(format!("service {}: {e}", row.id))
        })?;

        Ok(MonitoredService {
            id: row.id,
            name: row.name,
            url: row.url,
            check_type,
            current_status,
            last_checked_at: row.last_checked_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PgServiceRegistry {
    pool: PgPool,
}

impl PgServiceRegistry {
    /// Open a connection pool for `config.url`
    pub async fn connect(config: &DatabaseConfig) -> StatusResult<Self> {
        let url = config.url.as_deref().ok_or_else(|| {
            StatusError::Configuration("database.url is required for PostgreSQL".to_string())
        })?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect(url)
            .await?;

        info!(
            max_connections = config.max_connections,
            "Connected service registry to PostgreSQL"
        );
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self) -> StatusResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Service registry migrations applied");
        Ok(())
    }
}

#[async_trait]
impl ServiceRegistry for PgServiceRegistry {
    async fn list_all(&self) -> StatusResult<Vec<MonitoredService>> {
        let rows = sqlx::query_as::<_, ServiceRow>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(MonitoredService::try_from).collect()
    }

    async fn get_by_id(&self, id: i64) -> StatusResult<MonitoredService> {
        let row = sqlx::query_as::<_, ServiceRow>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(StatusError::NotFound { id })?.try_into()
    }

    async fn update(&self, service: &MonitoredService) -> StatusResult<MonitoredService> {
        // Single statement, so readers see the whole old row or the whole new one.
        let row = sqlx::query_as::<_, ServiceRow>(&format!(
            r#"
            UPDATE services
            SET
                current_status = $2,
                last_checked_at = GREATEST(last_checked_at, $3),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {SERVICE_COLUMNS}
            "#
        ))
        .bind(service.id)
        .bind(service.current_status.as_str())
        .bind(service.last_checked_at)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(StatusError::NotFound { id: service.id })?
            .try_into()
    }

    async fn register(&self, new_service: NewMonitoredService) -> StatusResult<MonitoredService> {
        new_service.validate()?;

        let row = sqlx::query_as::<_, ServiceRow>(&format!(
            r#"
            INSERT INTO services (name, url, check_type, current_status, created_at, updated_at)
            VALUES ($1, $2, $3, 'Unknown', NOW(), NOW())
            RETURNING {SERVICE_COLUMNS}
            "#
        ))
        .bind(&new_service.name)
        .bind(&new_service.url)
        .bind(new_service.check_type.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn find_by_name(&self, name: &str) -> StatusResult<Option<MonitoredService>> {
        let row = sqlx::query_as::<_, ServiceRow>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services WHERE name = $1 ORDER BY id LIMIT 1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(MonitoredService::try_from).transpose()
    }
}
