use serde_json::Value;

use super::types::{ApplyCompanionRequest, CompanionQuery, CompanionStatusRequest, UpdateCompanionRequest};
use crate::{
    codec::BigId,
    http::{Envelope, HttpClient, HttpError, RequestDescriptor},
    session::CompanionProfile,
};

pub(crate) const COMPANION_PROFILE_PATH: &str = "/user/companion/profile";

/// Companion profile of the signed-in user.
pub async fn get_companion_profile(client: &HttpClient) -> Result<Envelope<CompanionProfile>, HttpError> {
    client.send_json(RequestDescriptor::get(COMPANION_PROFILE_PATH)).await
}

pub async fn get_public_companion_profile(
    client: &HttpClient,
    user_id: &BigId,
) -> Result<Envelope<CompanionProfile>, HttpError> {
    client
        .send_json(RequestDescriptor::get("/user/companion/profile/public").query("userId", user_id))
        .await
}

pub async fn update_companion_profile(
    client: &HttpClient,
    request: &UpdateCompanionRequest,
) -> Result<Envelope<CompanionProfile>, HttpError> {
    client
        .send_json(RequestDescriptor::put(COMPANION_PROFILE_PATH).json(request)?)
        .await
}

/// Switches between offline (0), online (1) and busy (2).
pub async fn update_companion_status(client: &HttpClient, status: i32) -> Result<Envelope<Value>, HttpError> {
    client
        .send_json(RequestDescriptor::put("/user/companion/status").json(&CompanionStatusRequest { status })?)
        .await
}

pub async fn apply_companion(
    client: &HttpClient,
    request: &ApplyCompanionRequest,
) -> Result<Envelope<CompanionProfile>, HttpError> {
    client
        .send_json(RequestDescriptor::post("/user/companion/apply").json(request)?)
        .await
}

pub async fn list_companions(client: &HttpClient, query: &CompanionQuery) -> Result<Envelope<Value>, HttpError> {
    client
        .send_json(RequestDescriptor::get("/user/companions").query_params(query)?)
        .await
}

pub async fn list_game_skills(client: &HttpClient) -> Result<Envelope<Value>, HttpError> {
    client.send_json(RequestDescriptor::get("/user/gameskills")).await
}
