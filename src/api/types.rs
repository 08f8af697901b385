use serde::{Deserialize, Serialize};

use crate::codec::BigId;

/// Tokens returned by both login endpoints and by `/user/refresh-token`.
pub type LoginData = crate::session::SessionCredential;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CodeLoginRequest {
    pub phone: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub phone: String,
    pub code: String,
    pub password: String,
    pub nickname: String,
}

/// What a verification code is sent for. The code must be redeemed by the
/// operation of the same purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CodePurpose {
    #[serde(rename = "register")]
    Register,
    #[serde(rename = "login")]
    Login,
    #[serde(rename = "forget_password")]
    ForgetPassword,
    /// Older spelling still accepted by the gateway.
    #[serde(rename = "resetpassword")]
    ResetPassword,
    /// Sent to the current phone number before a change.
    #[serde(rename = "change_phone")]
    ChangePhone,
    /// Sent to the new phone number during a change.
    #[serde(rename = "change_phone_new")]
    ChangePhoneNew,
    #[serde(rename = "change_password")]
    ChangePassword,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendCodeRequest {
    pub phone: String,
    pub purpose: CodePurpose,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForgetPasswordRequest {
    pub phone: String,
    pub code: String,
    pub password: String,
}

/// Lookup key for `GET /user`. All fields empty means the signed-in user.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserQuery {
    pub id: Option<BigId>,
    pub uid: Option<i64>,
    pub phone: Option<String>,
}

/// Partial profile update; unset fields are left out of the body.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePhoneRequest {
    pub old_phone: String,
    pub old_code: String,
    pub new_phone: String,
    pub new_code: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_phone: String,
    pub old_code: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AvatarData {
    pub avatar_url: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_skill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_hour: Option<f64>,
    /// 0 offline, 1 online, 2 busy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CompanionStatusRequest {
    pub status: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyCompanionRequest {
    pub game_skill: String,
    pub price_per_hour: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionQuery {
    pub game_skill: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub status: Option<i32>,
    pub is_verified: Option<bool>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: u32,
    pub page_size: u32,
}

impl PageQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }
}

/// Ranking pages start at 1 and hold 10 entries unless asked otherwise.
impl Default for PageQuery {
    fn default() -> Self {
        Self { page: 1, page_size: 10 }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RechargeRequest {
    pub amount: i64,
    /// `alipay_page`, `alipay_wap` or `alipay_app`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RechargeListQuery {
    pub status: Option<i32>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// Side of an order the caller is acting as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderRole {
    Boss,
    Companion,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuery {
    pub role: Option<OrderRole>,
    /// 1 created, 2 paid, 3 accepted, 4 in service, 5 completed, 6 cancelled, 7 rated.
    pub status: Option<i32>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// Selects one order by id or by order number.
#[derive(Debug, Clone)]
pub enum OrderKey {
    Id(BigId),
    OrderNo(String),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub companion_id: BigId,
    pub game_name: String,
    pub duration_hours: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_mode: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderIdRequest {
    pub order_id: BigId,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderRequest {
    pub order_id: BigId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateOrderRequest {
    pub order_id: BigId,
    /// 0 to 5.
    pub rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderInfo {
    pub id: Option<BigId>,
    pub order_no: String,
    pub boss_id: Option<BigId>,
    pub companion_id: Option<BigId>,
    pub game_name: String,
    pub duration_hours: i32,
    pub price_per_hour: f64,
    pub total_amount: f64,
    pub status: i32,
    pub created_at: i64,
    pub paid_at: i64,
    pub accepted_at: i64,
    pub start_at: i64,
    pub completed_at: i64,
    pub cancelled_at: i64,
    pub rating: f64,
    pub comment: String,
    pub cancel_reason: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderList {
    pub orders: Vec<OrderInfo>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowRequest {
    pub user_id: BigId,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FollowStatus {
    pub is_following: bool,
    pub is_followed: bool,
    pub is_mutual: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowersQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// Restrict to followers with this role.
    pub user_role: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowingQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub keyword: Option<String>,
}
