use sqlx::PgPool;
use tracing::instrument;

use lectern_core::AppError;

use super::model::AuditEvent;

pub struct AuditService;

impl AuditService {
    #[instrument(skip(db))]
    pub async fn record(db: &PgPool, event: &AuditEvent) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO audit_logs (transaction_type, domain, action, performed_by, related_id)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&event.transaction_type)
        .bind(&event.domain)
        .bind(&event.action)
        .bind(event.performed_by)
        .bind(&event.related_id)
        .execute(db)
        .await?;

        Ok(())
    }
}
