use serde_json::Value;

use super::types::{RechargeListQuery, RechargeRequest};
use crate::{
    http::{Envelope, HttpClient, HttpError, RequestDescriptor},
    session::WalletInfo,
};

pub async fn get_wallet(client: &HttpClient) -> Result<Envelope<WalletInfo>, HttpError> {
    client.send_json(RequestDescriptor::get("/user/wallet")).await
}

/// Opens a recharge order; the payload carries the payment form to present.
pub async fn create_recharge_order(client: &HttpClient, request: &RechargeRequest) -> Result<Envelope<Value>, HttpError> {
    client
        .send_json(RequestDescriptor::post("/user/recharge").json(request)?)
        .await
}

pub async fn query_recharge_order(client: &HttpClient, order_no: &str) -> Result<Envelope<Value>, HttpError> {
    client
        .send_json(RequestDescriptor::get("/user/recharge").query("orderNo", order_no))
        .await
}

pub async fn list_recharge_orders(client: &HttpClient, query: &RechargeListQuery) -> Result<Envelope<Value>, HttpError> {
    client
        .send_json(RequestDescriptor::get("/user/recharge/list").query_params(query)?)
        .await
}
