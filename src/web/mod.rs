//! HTTP interface to the produce store

pub(crate) mod handler;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::store::ProduceStore;
use handler::{
    handler_delete_produce, handler_get_produce, handler_list_produce, handler_upsert_produce,
};

pub(crate) fn routes(store: Arc<ProduceStore>) -> Router {
    Router::new() //
        .route(
            "/produce",
            get(handler_list_produce).post(handler_upsert_produce),
        )
        .route(
            "/produce/:code",
            get(handler_get_produce).delete(handler_delete_produce),
        )
        .with_state(store)
}
