//! Countdown domain methods on Repository

use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use super::Repository;
use crate::error::{AppError, AppResult};
use crate::models::{
    ActiveDay, CountdownConfig, CountdownMode, HoursRange, StoredCountdown, WeekSchedule, Weekday,
};

// ---- Row shapes ----

#[derive(sqlx::FromRow)]
struct ConfigRow {
    id: String,
    name: String,
    finish_at: DateTime<Utc>,
    scheduled_at: Option<DateTime<Utc>>,
    mode: String,
}

#[derive(sqlx::FromRow)]
struct DayRow {
    config_id: String,
    day: String,
    enabled: bool,
    all_day: bool,
    range_start: String,
    range_end: String,
}

const SELECT_CONFIG: &str =
    "SELECT id, name, finish_at, scheduled_at, mode FROM countdown_configs";
const SELECT_DAYS: &str =
    "SELECT config_id, day, enabled, all_day, range_start, range_end FROM countdown_config_days";

// ---- Reconstruction ----

fn corrupt(config_id: &str, detail: &str) -> AppError {
    AppError::Internal(format!("Countdown {} has corrupt day rows: {}", config_id, detail))
}

/// Rebuild the weekly schedule from its seven rows. Strict: every
/// weekday must be present and parseable, otherwise the record is
/// reported as corrupt instead of silently defaulted.
fn rebuild_schedule(config_id: &str, rows: &[DayRow]) -> AppResult<WeekSchedule> {
    let mut schedule = WeekSchedule::default();
    let mut seen = HashSet::new();

    for row in rows {
        let day: Weekday = row
            .day
            .parse()
            .map_err(|_| corrupt(config_id, &format!("unknown day '{}'", row.day)))?;
        let start = row
            .range_start
            .parse()
            .map_err(|_| corrupt(config_id, &format!("bad range start '{}'", row.range_start)))?;
        let end = row
            .range_end
            .parse()
            .map_err(|_| corrupt(config_id, &format!("bad range end '{}'", row.range_end)))?;

        *schedule.day_mut(day) = ActiveDay {
            enabled: row.enabled,
            all_day: row.all_day,
            hours_range: HoursRange { start, end },
        };
        seen.insert(day);
    }

    for day in Weekday::ALL {
        if !seen.contains(&day) {
            return Err(corrupt(config_id, &format!("missing {} row", day)));
        }
    }

    Ok(schedule)
}

fn rebuild_countdown(row: ConfigRow, days: &[DayRow]) -> AppResult<StoredCountdown> {
    let mode: CountdownMode = row
        .mode
        .parse()
        .map_err(|_| corrupt(&row.id, &format!("unknown mode '{}'", row.mode)))?;
    let active_days = rebuild_schedule(&row.id, days)?;

    Ok(StoredCountdown {
        config: CountdownConfig {
            name: row.name,
            finish_at: row.finish_at,
            scheduled_at: row.scheduled_at,
            mode,
            active_days,
        },
        id: row.id,
    })
}

// ---- Repository methods ----

impl Repository {
    /// List all non-removed countdowns for a shop, oldest first
    pub async fn countdowns_list(&self, shop: &str) -> AppResult<Vec<StoredCountdown>> {
        let rows = sqlx::query_as::<_, ConfigRow>(&format!(
            "{} WHERE shop = $1 AND removed = 0 ORDER BY created_at",
            SELECT_CONFIG
        ))
        .bind(shop)
        .fetch_all(&self.pool)
        .await?;

        let day_rows = sqlx::query_as::<_, DayRow>(&format!(
            "{} WHERE config_id IN (SELECT id FROM countdown_configs WHERE shop = $1 AND removed = 0)",
            SELECT_DAYS
        ))
        .bind(shop)
        .fetch_all(&self.pool)
        .await?;

        let mut by_config: HashMap<String, Vec<DayRow>> = HashMap::new();
        for day_row in day_rows {
            by_config
                .entry(day_row.config_id.clone())
                .or_default()
                .push(day_row);
        }

        rows.into_iter()
            .map(|row| {
                let days = by_config.remove(&row.id).unwrap_or_default();
                rebuild_countdown(row, &days)
            })
            .collect()
    }

    /// Get a non-removed countdown by shop and id
    pub async fn countdowns_get(&self, shop: &str, id: &str) -> AppResult<StoredCountdown> {
        let row = sqlx::query_as::<_, ConfigRow>(&format!(
            "{} WHERE shop = $1 AND id = $2 AND removed = 0",
            SELECT_CONFIG
        ))
        .bind(shop)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Countdown {} not found", id)))?;

        let days = sqlx::query_as::<_, DayRow>(&format!("{} WHERE config_id = $1", SELECT_DAYS))
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        rebuild_countdown(row, &days)
    }

    /// Upsert a countdown. With an id the config row is updated and its
    /// day rows replaced wholesale; without one a fresh row is inserted.
    /// Returns the freshly reloaded record rather than the echoed input.
    pub async fn countdowns_save(
        &self,
        shop: &str,
        id: Option<&str>,
        config: &CountdownConfig,
    ) -> AppResult<StoredCountdown> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let id = match id {
            Some(id) => {
                let result = sqlx::query(
                    "UPDATE countdown_configs \
                     SET name = $1, finish_at = $2, scheduled_at = $3, mode = $4, updated_at = $5 \
                     WHERE shop = $6 AND id = $7 AND removed = 0",
                )
                .bind(&config.name)
                .bind(config.finish_at)
                .bind(config.scheduled_at)
                .bind(config.mode.to_string())
                .bind(now)
                .bind(shop)
                .bind(id)
                .execute(&mut *tx)
                .await?;

                if result.rows_affected() == 0 {
                    return Err(AppError::NotFound(format!("Countdown {} not found", id)));
                }

                sqlx::query("DELETE FROM countdown_config_days WHERE config_id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;

                id.to_string()
            }
            None => {
                let id = Uuid::new_v4().to_string();
                sqlx::query(
                    "INSERT INTO countdown_configs \
                     (id, shop, name, finish_at, scheduled_at, mode, removed, created_at, updated_at) \
                     VALUES ($1, $2, $3, $4, $5, $6, 0, $7, $7)",
                )
                .bind(&id)
                .bind(shop)
                .bind(&config.name)
                .bind(config.finish_at)
                .bind(config.scheduled_at)
                .bind(config.mode.to_string())
                .bind(now)
                .execute(&mut *tx)
                .await?;
                id
            }
        };

        for (day, active) in config.active_days.iter() {
            sqlx::query(
                "INSERT INTO countdown_config_days \
                 (config_id, day, enabled, all_day, range_start, range_end) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(&id)
            .bind(day.as_str())
            .bind(active.enabled)
            .bind(active.all_day)
            .bind(active.hours_range.start.to_string())
            .bind(active.hours_range.end.to_string())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.countdowns_get(shop, &id).await
    }

    /// Soft-remove a countdown; its day rows are kept
    pub async fn countdowns_remove(&self, shop: &str, id: &str) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE countdown_configs SET removed = 1, updated_at = $1 \
             WHERE shop = $2 AND id = $3 AND removed = 0",
        )
        .bind(Utc::now())
        .bind(shop)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Countdown {} not found", id)));
        }
        Ok(())
    }
}

// ---- Tests ----
