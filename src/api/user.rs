use reqwest::multipart::{Form, Part};
use serde_json::Value;

use super::types::{
    AvatarData,
    ChangePasswordRequest,
    ChangePhoneRequest,
    CodeLoginRequest,
    ForgetPasswordRequest,
    LoginData,
    LoginRequest,
    RefreshTokenRequest,
    RegisterRequest,
    SendCodeRequest,
    UpdateUserRequest,
    UserQuery,
};
use crate::{
    http::{Envelope, HttpClient, HttpError, RequestDescriptor},
    session::UserInfo,
};

pub async fn login(client: &HttpClient, request: &LoginRequest) -> Result<Envelope<LoginData>, HttpError> {
    client
        .send_json(RequestDescriptor::post("/user/login").json(request)?)
        .await
}

pub async fn login_by_code(client: &HttpClient, request: &CodeLoginRequest) -> Result<Envelope<LoginData>, HttpError> {
    client
        .send_json(RequestDescriptor::post("/user/login-by-code").json(request)?)
        .await
}

/// Trades a refresh token for a new token pair.
pub async fn refresh_token(client: &HttpClient, refresh_token: &str) -> Result<Envelope<LoginData>, HttpError> {
    let request = RefreshTokenRequest {
        refresh_token: refresh_token.to_string(),
    };
    client
        .send_json(RequestDescriptor::post("/user/refresh-token").json(&request)?)
        .await
}

pub async fn register(client: &HttpClient, request: &RegisterRequest) -> Result<Envelope<UserInfo>, HttpError> {
    client
        .send_json(RequestDescriptor::post("/user/register").json(request)?)
        .await
}

pub async fn send_code(client: &HttpClient, request: &SendCodeRequest) -> Result<Envelope, HttpError> {
    client
        .send_json(RequestDescriptor::post("/code/send").json(request)?)
        .await
}

pub async fn forget_password(client: &HttpClient, request: &ForgetPasswordRequest) -> Result<Envelope, HttpError> {
    client
        .send_json(RequestDescriptor::put("/user/forgetPassword").json(request)?)
        .await
}

pub async fn get_user(client: &HttpClient, query: &UserQuery) -> Result<Envelope<UserInfo>, HttpError> {
    client
        .send_json(RequestDescriptor::get("/user").query_params(query)?)
        .await
}

pub async fn update_user(client: &HttpClient, request: &UpdateUserRequest) -> Result<Envelope<UserInfo>, HttpError> {
    client.send_json(RequestDescriptor::put("/user").json(request)?).await
}

/// Uploads raw image bytes as the `avatar` form field.
pub async fn upload_avatar(
    client: &HttpClient,
    file_name: impl Into<String>,
    content: Vec<u8>,
) -> Result<Envelope<AvatarData>, HttpError> {
    let form = Form::new().part("avatar", Part::bytes(content).file_name(file_name.into()));
    client
        .send_json(RequestDescriptor::post("/user/avatar").multipart(form))
        .await
}

pub async fn change_phone(client: &HttpClient, request: &ChangePhoneRequest) -> Result<Envelope<Value>, HttpError> {
    client
        .send_json(RequestDescriptor::put("/user/change-phone").json(request)?)
        .await
}

pub async fn change_password(
    client: &HttpClient,
    request: &ChangePasswordRequest,
) -> Result<Envelope<Value>, HttpError> {
    client
        .send_json(RequestDescriptor::put("/user/change-password").json(request)?)
        .await
}
