use serde_json::Value;

use super::types::{
    CancelOrderRequest,
    CreateOrderRequest,
    OrderIdRequest,
    OrderInfo,
    OrderKey,
    OrderList,
    OrderQuery,
    RateOrderRequest,
};
use crate::{
    codec::BigId,
    http::{Envelope, HttpClient, HttpError, RequestDescriptor},
};

pub async fn list_orders(client: &HttpClient, query: &OrderQuery) -> Result<Envelope<OrderList>, HttpError> {
    client
        .send_json(RequestDescriptor::get("/orders").query_params(query)?)
        .await
}

pub async fn get_order(client: &HttpClient, key: &OrderKey) -> Result<Envelope<OrderInfo>, HttpError> {
    let descriptor = match key {
        OrderKey::Id(id) => RequestDescriptor::get("/order").query("id", id),
        OrderKey::OrderNo(order_no) => RequestDescriptor::get("/order").query("orderNo", order_no),
    };
    client.send_json(descriptor).await
}

pub async fn create_order(client: &HttpClient, request: &CreateOrderRequest) -> Result<Envelope<OrderInfo>, HttpError> {
    client.send_json(RequestDescriptor::post("/order").json(request)?).await
}

async fn transition(client: &HttpClient, path: &str, order_id: &BigId) -> Result<Envelope<OrderInfo>, HttpError> {
    let request = OrderIdRequest {
        order_id: order_id.clone(),
    };
    client.send_json(RequestDescriptor::put(path).json(&request)?).await
}

/// Companion side: take a paid order.
pub async fn accept_order(client: &HttpClient, order_id: &BigId) -> Result<Envelope<OrderInfo>, HttpError> {
    transition(client, "/order/accept", order_id).await
}

pub async fn start_order(client: &HttpClient, order_id: &BigId) -> Result<Envelope<OrderInfo>, HttpError> {
    transition(client, "/order/start", order_id).await
}

pub async fn complete_order(client: &HttpClient, order_id: &BigId) -> Result<Envelope<OrderInfo>, HttpError> {
    transition(client, "/order/complete", order_id).await
}

/// Either side may cancel.
pub async fn cancel_order(client: &HttpClient, request: &CancelOrderRequest) -> Result<Envelope<OrderInfo>, HttpError> {
    client
        .send_json(RequestDescriptor::post("/order/cancel").json(request)?)
        .await
}

pub async fn rate_order(client: &HttpClient, request: &RateOrderRequest) -> Result<Envelope<OrderInfo>, HttpError> {
    client
        .send_json(RequestDescriptor::post("/order/rate").json(request)?)
        .await
}

pub async fn delete_order(client: &HttpClient, order_id: &BigId) -> Result<Envelope<Value>, HttpError> {
    let request = OrderIdRequest {
        order_id: order_id.clone(),
    };
    client
        .send_json(RequestDescriptor::post("/order/delete").json(&request)?)
        .await
}
