// src/handlers/email.rs
use axum::{extract::State, Json};
use tracing::{error, info, instrument};

use crate::dtos::email::{EmailContent, EmailSentResponse};
use crate::error::{AppError, NotifyError};
use crate::extract::{AppJson, AppPath};
use crate::handlers::{product::find_product, supplier::find_supplier};
use crate::mail::{render_notification, OutgoingEmail};
use crate::state::AppState;

// POST /email/{product_id} - Mail the product's supplier
#[instrument(skip(state, content))]
pub async fn send_email(
    AppPath(product_id): AppPath<i64>,
    State(state): State<AppState>,
    AppJson(content): AppJson<EmailContent>,
) -> Result<Json<EmailSentResponse>, AppError> {
    if let Err(e) = notify_supplier(&state, product_id, content).await {
        error!(error = %e, code = e.code(), "supplier notification failed");
        return Err(e.into());
    }

    Ok(Json(EmailSentResponse {
        status: "ok",
        message: "Email sent successfully",
    }))
}

async fn notify_supplier(
    state: &AppState,
    product_id: i64,
    content: EmailContent,
) -> Result<(), NotifyError> {
    let product = find_product(state, product_id)
        .await
        .map_err(NotifyError::Database)?
        .ok_or(NotifyError::ProductNotFound(product_id))?;

    let supplier = find_supplier(state, product.supplied_by_id)
        .await
        .map_err(NotifyError::Database)?
        .ok_or(NotifyError::RecipientNotFound {
            product_id,
            supplier_id: product.supplied_by_id,
        })?;

    let email = OutgoingEmail {
        to: supplier.email,
        subject: content.subject,
        html_body: render_notification(&state.business_name, &content.message),
    };
    let recipient = email.to.clone();

    state.mailer.send(email).await?;
    info!(%recipient, "supplier notified");
    Ok(())
}
