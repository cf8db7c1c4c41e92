//! Expenses API endpoints

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use engine::{Expense, ExpenseNew, Summary};
use serde::{Deserialize, Serialize};

use crate::{ServerError, server::ServerState};

/// CSV export wrapped in a JSON object.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpenseExport {
    pub csv: String,
}

/// Handle requests for listing every stored expense
pub async fn list(State(state): State<ServerState>) -> Json<Vec<Expense>> {
    Json(state.store.list().await)
}

/// Handle requests for creating a new `Expense`
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ExpenseNew>, JsonRejection>,
) -> Result<Json<Expense>, ServerError> {
    let Json(payload) = payload.inspect_err(|rejection| {
        tracing::debug!("rejected expense payload: {}", rejection.body_text());
    })?;

    let expense = state.store.create(payload).await;
    tracing::info!("created expense {}", expense.id);

    Ok(Json(expense))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Expense>, ServerError> {
    let expense = state
        .store
        .delete(&id)
        .await
        .inspect_err(|err| tracing::warn!("delete failed: {err}"))?;
    tracing::info!("deleted expense {}", expense.id);

    Ok(Json(expense))
}

pub async fn export(State(state): State<ServerState>) -> Result<Json<ExpenseExport>, ServerError> {
    let csv = state.store.export().await?;

    Ok(Json(ExpenseExport { csv }))
}

/// Handle requests for the totals shown on the dashboard
pub async fn summary(State(state): State<ServerState>) -> Json<Summary> {
    Json(state.store.summary().await)
}
