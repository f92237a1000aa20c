use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_platforms).post(create_platform))
        .route(
            "/:id",
            get(get_platform).put(update_platform).delete(delete_platform),
        )
}

pub async fn list_platforms(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    tracing::info!("listing platforms");

    let items = match services.store.list_all().await {
        Ok(items) => items,
        Err(e) => return errors::store_error_to_response(e),
    };

    let body = items.iter().map(dto::platform_to_json).collect::<Vec<_>>();
    (StatusCode::OK, Json(body)).into_response()
}

pub async fn get_platform(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    tracing::info!(id, "getting platform by id");

    match services.store.get_by_id(id).await {
        Ok(Some(platform)) => (StatusCode::OK, Json(dto::platform_to_json(&platform))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "platform not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create_platform(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreatePlatformRequest>,
) -> axum::response::Response {
    tracing::info!(name = %body.name, "creating platform");

    let created = match services.store.create(dto::create_request_to_draft(body)).await {
        Ok(platform) => platform,
        Err(e) => return errors::store_error_to_response(e),
    };
    if let Err(e) = services.store.save_changes().await {
        return errors::store_error_to_response(e);
    }

    // Best-effort sync notification: the platform is created either way.
    if let Err(e) = services.command_client.send_platform(&created).await {
        tracing::warn!(id = created.id, "could not send platform to command service: {e}");
    }

    (
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/platforms/{}", created.id))],
        Json(dto::platform_to_json(&created)),
    )
        .into_response()
}

pub async fn update_platform(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
    Json(body): Json<dto::UpdatePlatformRequest>,
) -> axum::response::Response {
    tracing::info!(id, "updating platform");

    let mut platform = match services.store.get_by_id(id).await {
        Ok(Some(platform)) => platform,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "platform not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    dto::apply_update(body, &mut platform);

    if let Err(e) = services.store.update(&platform).await {
        return errors::store_error_to_response(e);
    }
    if let Err(e) = services.store.save_changes().await {
        return errors::store_error_to_response(e);
    }

    StatusCode::NO_CONTENT.into_response()
}

pub async fn delete_platform(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    tracing::info!(id, "deleting platform");

    match services.store.get_by_id(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "platform not found"),
        Err(e) => return errors::store_error_to_response(e),
    }

    if let Err(e) = services.store.delete(id).await {
        return errors::store_error_to_response(e);
    }
    if let Err(e) = services.store.save_changes().await {
        return errors::store_error_to_response(e);
    }

    StatusCode::NO_CONTENT.into_response()
}
