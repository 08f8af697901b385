use serde_json::Value;

use super::types::PageQuery;
use crate::http::{Envelope, HttpClient, HttpError, RequestDescriptor};

/// Companions ordered by completed orders. `None` asks for page 1 of 10.
pub async fn orders_ranking(client: &HttpClient, page: Option<PageQuery>) -> Result<Envelope<Value>, HttpError> {
    ranking(client, "/user/companions/ranking/orders", page.unwrap_or_default()).await
}

/// Companions ordered by average rating. `None` asks for page 1 of 10.
pub async fn ratings_ranking(client: &HttpClient, page: Option<PageQuery>) -> Result<Envelope<Value>, HttpError> {
    ranking(client, "/user/companions/ranking/ratings", page.unwrap_or_default()).await
}

async fn ranking(client: &HttpClient, path: &str, page: PageQuery) -> Result<Envelope<Value>, HttpError> {
    client
        .send_json(RequestDescriptor::get(path).query_params(&page)?)
        .await
}
