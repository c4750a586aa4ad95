//! Scheduled weekly attendance report emails.
//!
//! Every `interval` the job builds a [`WeeklyReport`] for each user with an
//! email address and sends it. The first run happens one full interval after
//! startup so restarts do not re-send reports. A failure for one user is
//! logged and does not stop the run.
//!
//! [`WeeklyReport`]: survivor_mail::WeeklyReport

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use survivor_db::models::user::User;
use survivor_db::repositories::UserRepo;
use survivor_mail::EmailDelivery;
use tokio::time::{interval_at, Instant};
use tokio_util::sync::CancellationToken;

use crate::summary::{today, weekly_report};

/// Run the weekly report loop until `cancel` is triggered.
pub async fn run(
    pool: PgPool,
    mailer: Arc<EmailDelivery>,
    interval: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "Weekly report job started"
    );

    let mut ticker = interval_at(Instant::now() + interval, interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Weekly report job stopping");
                break;
            }
            _ = ticker.tick() => {
                send_all(&pool, &mailer).await;
            }
        }
    }
}

/// Send the report to every user with an email address.
///
/// Returns the number of reports delivered.
pub async fn send_all(pool: &PgPool, mailer: &EmailDelivery) -> usize {
    let users = match UserRepo::list_with_email(pool).await {
        Ok(users) => users,
        Err(e) => {
            tracing::error!(error = %e, "Weekly report: failed to list recipients");
            return 0;
        }
    };

    let mut sent = 0;
    for user in &users {
        match send_one(pool, mailer, user).await {
            Ok(()) => sent += 1,
            Err(e) => {
                tracing::warn!(user_id = user.id, error = %e, "Weekly report: delivery failed");
            }
        }
    }

    tracing::info!(sent, recipients = users.len(), "Weekly report run finished");
    sent
}

async fn send_one(pool: &PgPool, mailer: &EmailDelivery, user: &User) -> Result<(), String> {
    let Some(email) = user.email.as_deref() else {
        return Ok(());
    };
    let report = weekly_report(pool, user, today())
        .await
        .map_err(|e| e.to_string())?;
    mailer
        .send_weekly_report(email, &report)
        .await
        .map_err(|e| e.to_string())
}
