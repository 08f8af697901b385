use serde_json::Value;

use super::types::{FollowRequest, FollowStatus, FollowersQuery, FollowingQuery, PageQuery};
use crate::{
    codec::BigId,
    http::{Envelope, HttpClient, HttpError, RequestDescriptor},
};

pub async fn follow_user(client: &HttpClient, user_id: &BigId) -> Result<Envelope<Value>, HttpError> {
    let request = FollowRequest {
        user_id: user_id.clone(),
    };
    client
        .send_json(RequestDescriptor::post("/user/follow").json(&request)?)
        .await
}

pub async fn unfollow_user(client: &HttpClient, user_id: &BigId) -> Result<Envelope<Value>, HttpError> {
    let request = FollowRequest {
        user_id: user_id.clone(),
    };
    client
        .send_json(RequestDescriptor::post("/user/unfollow").json(&request)?)
        .await
}

pub async fn check_follow_status(client: &HttpClient, target_user_id: &BigId) -> Result<Envelope<FollowStatus>, HttpError> {
    client
        .send_json(RequestDescriptor::get("/user/follow/status").query("targetUserId", target_user_id))
        .await
}

pub async fn list_followers(client: &HttpClient, query: &FollowersQuery) -> Result<Envelope<Value>, HttpError> {
    client
        .send_json(RequestDescriptor::get("/user/followers").query_params(query)?)
        .await
}

pub async fn list_following(client: &HttpClient, query: &FollowingQuery) -> Result<Envelope<Value>, HttpError> {
    client
        .send_json(RequestDescriptor::get("/user/following").query_params(query)?)
        .await
}

pub async fn list_mutual_follows(client: &HttpClient, page: PageQuery) -> Result<Envelope<Value>, HttpError> {
    client
        .send_json(RequestDescriptor::get("/user/follow/mutual").query_params(&page)?)
        .await
}
