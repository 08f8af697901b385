use serde::{Deserialize, Serialize};

use crate::codec::BigId;

/// Profile of the signed-in user as returned by `GET /user`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserInfo {
    pub id: Option<BigId>,
    pub uid: i64,
    pub nickname: String,
    pub phone: String,
    pub role: i32,
    pub avatar_url: String,
    pub bio: String,
    pub balance: f64,
    pub frozen_balance: f64,
    pub follower_count: i64,
    pub following_count: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WalletInfo {
    pub user_id: Option<BigId>,
    pub balance: f64,
    pub frozen_balance: f64,
}

/// Companion-side profile of the signed-in user.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanionProfile {
    pub user_id: Option<BigId>,
    pub game_skill: String,
    pub price_per_hour: f64,
    /// 1 online, 0 offline.
    pub status: i32,
    pub rating: f64,
    pub total_orders: i64,
    pub is_verified: bool,
    pub nickname: String,
    pub avatar_url: String,
    pub bio: String,
}

/// Backend state cached for the signed-in user.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CachedState {
    pub info: Option<UserInfo>,
    pub wallet: Option<WalletInfo>,
    pub companion: Option<CompanionProfile>,
}

impl CachedState {
    pub fn is_empty(&self) -> bool {
        self.info.is_none() && self.wallet.is_none() && self.companion.is_none()
    }
}
