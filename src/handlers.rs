use crate::engine;
use crate::errors::AppError;
use crate::history::HistoryPager;
use crate::models::{
    BmiForm, BmiReading, CalcResponse, CalorieReading, CaloriesForm, HealthView, HistoryView,
    IdentityView, PressureForm, PressureReading, ResetRequest, StatsReply,
};
use crate::state::AppState;
use crate::trends::{self, TrendSeries};
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};

/// How much history feeds the trend charts.
const TREND_FETCH_LIMIT: u64 = 100;

async fn current_user(state: &AppState) -> Result<String, AppError> {
    Ok(state.identity.auto_init().await?)
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let user_id = current_user(&state).await?;
    Ok(Html(render_index(&user_id)))
}

// -- Calculators: validate locally, compute, then persist remotely. --

pub async fn calc_imt(
    State(state): State<AppState>,
    Json(form): Json<BmiForm>,
) -> Result<Json<CalcResponse<BmiReading>>, AppError> {
    let reading = engine::evaluate_bmi(&form)?;
    let user_id = current_user(&state).await?;
    info!("bmi calculation for {user_id}: {}", reading.value);

    let reply = state
        .api
        .create_imt(&user_id, reading.weight, reading.height)
        .await?;

    Ok(Json(CalcResponse {
        reading,
        record_id: reply.id,
        created_at: reply.created_at,
    }))
}

pub async fn calc_calories(
    State(state): State<AppState>,
    Json(form): Json<CaloriesForm>,
) -> Result<Json<CalcResponse<CalorieReading>>, AppError> {
    let reading = engine::evaluate_calories(&form)?;
    let user_id = current_user(&state).await?;
    info!("calorie calculation for {user_id}: {} kcal", reading.tdee_kcal);

    let reply = state
        .api
        .create_calories(
            &user_id,
            reading.age,
            reading.weight,
            reading.height,
            &reading.gender,
            reading.activity,
        )
        .await?;

    Ok(Json(CalcResponse {
        reading,
        record_id: reply.id,
        created_at: reply.created_at,
    }))
}

pub async fn calc_pressure(
    State(state): State<AppState>,
    Json(form): Json<PressureForm>,
) -> Result<Json<CalcResponse<PressureReading>>, AppError> {
    let reading = engine::evaluate_pressure(&form)?;
    let user_id = current_user(&state).await?;
    info!(
        "pressure calculation for {user_id}: {}/{}",
        reading.systolic, reading.diastolic
    );

    let reply = state
        .api
        .create_pressure(&user_id, reading.systolic, reading.diastolic)
        .await?;

    Ok(Json(CalcResponse {
        reading,
        record_id: reply.id,
        created_at: reply.created_at,
    }))
}

// -- History --

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub offset: Option<u64>,
    pub calc_type: Option<String>,
}

/// Load one history page: authoritative replace, never a merge. The
/// generation token keeps an overlapping older load from clobbering a
/// newer one; the stale response is still returned, flagged, so the page
/// can drop it.
async fn load_history_page(
    state: &AppState,
    user_id: &str,
    offset: u64,
    calc_type: Option<&str>,
) -> Result<HistoryView, AppError> {
    let (token, limit) = {
        let mut pager = state.pager.lock().await;
        (pager.begin(), pager.limit)
    };

    let mut offset = offset;
    let mut reply = state.api.history(user_id, limit, offset, calc_type).await?;

    // A delete can leave the requested page empty; fall back to the last
    // page that still has records.
    if reply.calculations.is_empty() && reply.total > 0 {
        let clamped = HistoryPager::clamped_offset(reply.total, limit, offset);
        if clamped != offset {
            offset = clamped;
            reply = state.api.history(user_id, limit, offset, calc_type).await?;
        }
    }
    if reply.total == 0 {
        offset = 0;
    }

    let mut pager = state.pager.lock().await;
    let fresh = pager.apply(token, offset, reply.total);
    let pagination = if fresh {
        pager.controls()
    } else {
        crate::pagination::controls(reply.total, limit, offset)
    };

    Ok(HistoryView {
        stale: !fresh,
        records: reply.calculations,
        pagination,
    })
}

pub async fn history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryView>, AppError> {
    let user_id = current_user(&state).await?;
    let offset = query.offset.unwrap_or(0);
    let view = load_history_page(&state, &user_id, offset, query.calc_type.as_deref()).await?;
    Ok(Json(view))
}

/// Delete one record, then reload the current offset so the list stays
/// authoritative. The confirmation happened on the page; the server call
/// is one attempt, no retry.
pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryView>, AppError> {
    let user_id = current_user(&state).await?;
    state.api.delete_calculation(id, &user_id).await?;
    info!("deleted calculation {id} for {user_id}");

    let offset = {
        let pager = state.pager.lock().await;
        pager.offset
    };
    let view = load_history_page(&state, &user_id, offset, query.calc_type.as_deref()).await?;
    Ok(Json(view))
}

// -- Trends, stats, health --

pub async fn trends(State(state): State<AppState>) -> Result<Json<TrendSeries>, AppError> {
    let user_id = current_user(&state).await?;
    let reply = state
        .api
        .history(&user_id, TREND_FETCH_LIMIT, 0, None)
        .await?;
    Ok(Json(trends::build_trends(&reply.calculations)))
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsReply>, AppError> {
    let user_id = current_user(&state).await?;
    Ok(Json(state.api.stats(&user_id).await?))
}

/// Always answers 200; a broken upstream is reported, not propagated.
pub async fn health(State(state): State<AppState>) -> Json<HealthView> {
    let identity_present = state.identity.exists().await;
    match state.api.health().await {
        Ok(upstream) => {
            let status = if upstream.status == "healthy" {
                "ok"
            } else {
                "degraded"
            };
            Json(HealthView {
                status,
                identity_present,
                upstream: Some(upstream),
                upstream_error: None,
            })
        }
        Err(err) => {
            warn!("upstream health check failed: {err}");
            Json(HealthView {
                status: "degraded",
                identity_present,
                upstream: None,
                upstream_error: Some(err.to_string()),
            })
        }
    }
}

// -- Identity --

pub async fn identity(State(state): State<AppState>) -> Result<Json<IdentityView>, AppError> {
    let user_id = current_user(&state).await?;
    Ok(Json(IdentityView { user_id }))
}

/// Destroys the link to all stored history, so it only runs with an
/// explicit confirmation in the request body.
pub async fn reset_identity(
    State(state): State<AppState>,
    Json(request): Json<ResetRequest>,
) -> Result<Json<IdentityView>, AppError> {
    if !request.confirm {
        return Err(AppError::bad_request("identity reset requires confirmation"));
    }
    let user_id = state.identity.reset().await?;
    Ok(Json(IdentityView { user_id }))
}

pub async fn logout(State(state): State<AppState>) -> Result<Json<IdentityView>, AppError> {
    let user_id = state.identity.logout().await?;
    info!("logged out, new identity {user_id}");
    Ok(Json(IdentityView { user_id }))
}
