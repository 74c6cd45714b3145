use axum::{
    body::Body,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

use crate::generator::{self, GenerateLayoutRequest};
use crate::layout::editor::{normalize, PartialLayout};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/layouts/generate", post(generate_layout))
        .route("/layouts/{id}", get(get_layout))
        .route("/layouts/{id}", put(update_layout))
        .route("/layouts/{id}", delete(delete_layout))
        .route("/venues/{venue_id}/layouts", post(create_layout))
        .route("/venues/{venue_id}/layouts", get(list_layouts))
}

// POST /api/layouts/generate
// Всегда 200 с корректным по форме телом: внутренняя ошибка генерации
// превращается в пустой ответ ещё на границе generator::generate_configuration
async fn generate_layout(Json(req): Json<GenerateLayoutRequest>) -> impl IntoResponse {
    Json(generator::generate_configuration(&req))
}

// POST /api/venues/{venue_id}/layouts
async fn create_layout(
    State(state): State<Arc<AppState>>,
    Path(venue_id): Path<String>,
    Json(partial): Json<PartialLayout>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    // 1. Нормализуем вывод редактора в канонический вид
    let layout = normalize(partial, &venue_id)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    // 2. Сохраняем; ошибка персистентности уходит наружу как есть
    let id = state.db.create(&layout).await.map_err(|e| {
        tracing::error!("create_layout store error: {:?}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Не удалось сохранить макет".to_string())
    })?;

    state.cache.insert(id.clone(), layout).await;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

// PUT /api/layouts/{id} — замена макета целиком
async fn update_layout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(mut partial): Json<PartialLayout>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    // venue берём из сохранённой записи: редактор не владеет идентичностью
    let existing = state.db.load(&id).await.map_err(|e| {
        tracing::error!("update_layout load error: {:?}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Ошибка БД".to_string())
    })?;
    let existing = existing
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Макет не найден".to_string()))?;

    partial.id = Some(id.clone());
    let layout = normalize(partial, &existing.venue_id)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let updated = state.db.update(&id, &layout).await.map_err(|e| {
        tracing::error!("update_layout store error: {:?}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Не удалось обновить макет".to_string())
    })?;
    if !updated {
        return Err((StatusCode::NOT_FOUND, "Макет не найден".to_string()));
    }

    state.cache.invalidate(&id).await;

    Ok((StatusCode::OK, Json(json!({ "message": "Макет успешно обновлён" }))))
}

// GET /api/layouts/{id}
async fn get_layout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, (StatusCode, String)> {
    // 1. Пытаемся получить макет из кеша
    if let Some(layout) = state.cache.get(&id).await {
        let body = serde_json::to_string(&layout).map_err(|e| {
            tracing::error!("get_layout serialize error: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Ошибка сериализации".to_string())
        })?;
        return Ok(Response::builder()
            .header("Content-Type", "application/json")
            .header("X-Cache", "HIT")
            .body(Body::from(body))
            .unwrap());
    }

    // 2. Cache Miss: идем в базу данных
    let layout = state
        .db
        .load(&id)
        .await
        .map_err(|e| {
            tracing::error!("get_layout store error: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Не удалось загрузить макет".to_string())
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Макет не найден".to_string()))?;

    let body = serde_json::to_string(&layout).map_err(|e| {
        tracing::error!("get_layout serialize error: {:?}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Ошибка сериализации".to_string())
    })?;

    // 3. Сохраняем в кеш для следующих чтений
    state.cache.insert(id, layout).await;

    Ok(Response::builder()
        .header("Content-Type", "application/json")
        .header("X-Cache", "MISS")
        .body(Body::from(body))
        .unwrap())
}

// GET /api/venues/{venue_id}/layouts
async fn list_layouts(
    State(state): State<Arc<AppState>>,
    Path(venue_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let summaries = state.db.list_for_venue(&venue_id).await.map_err(|e| {
        tracing::error!("list_layouts store error: {:?}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Не удалось получить список макетов".to_string())
    })?;

    Ok((StatusCode::OK, Json(summaries)))
}

// DELETE /api/layouts/{id} — удаление целиком на стороне персистентности
async fn delete_layout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let deleted = state.db.delete(&id).await.map_err(|e| {
        tracing::error!("delete_layout store error: {:?}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Не удалось удалить макет".to_string())
    })?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Макет не найден".to_string()));
    }

    state.cache.invalidate(&id).await;

    Ok((StatusCode::OK, Json(json!({ "message": "Макет удалён" }))))
}
