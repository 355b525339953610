//! Entity CRUD handlers: list, read, create, update, delete. Generic over the
//! record kind; each router instance carries the service for one kind.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::model::Entity;
use crate::response::{self, Deleted, ListPage, Success};
use crate::service::EntityService;
use crate::store::DEFAULT_LIMIT;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::collections::HashMap;

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest("invalid id".into()))
}

/// Integer query parameter; missing or non-numeric values give `default`.
fn query_int(params: &HashMap<String, String>, key: &str, default: i64) -> i64 {
    params
        .get(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

pub async fn list<E: Entity>(
    State(service): State<EntityService<E>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Success<ListPage<E>>>, AppError> {
    let limit = query_int(&params, "limit", DEFAULT_LIMIT);
    let offset = query_int(&params, "offset", 0);
    let items = service.list(limit, offset).await?;
    Ok(response::success(ListPage {
        items,
        limit,
        offset,
    }))
}

pub async fn read<E: Entity>(
    State(service): State<EntityService<E>>,
    Path(id_str): Path<String>,
) -> Result<Json<Success<E>>, AppError> {
    let id = parse_id(&id_str)?;
    let record = service.get(id).await?;
    Ok(response::success(record))
}

pub async fn create<E: Entity>(
    State(service): State<EntityService<E>>,
    JsonBody(input): JsonBody<E::Input>,
) -> Result<Json<Success<E>>, AppError> {
    let record = service.create(input).await?;
    Ok(response::success(record))
}

pub async fn update<E: Entity>(
    State(service): State<EntityService<E>>,
    Path(id_str): Path<String>,
    JsonBody(input): JsonBody<E::Input>,
) -> Result<Json<Success<E>>, AppError> {
    let id = parse_id(&id_str)?;
    let record = service.update(id, input).await?;
    Ok(response::success(record))
}

pub async fn delete<E: Entity>(
    State(service): State<EntityService<E>>,
    Path(id_str): Path<String>,
) -> Result<Json<Success<Deleted>>, AppError> {
    let id = parse_id(&id_str)?;
    service.delete(id).await?;
    Ok(response::deleted())
}
