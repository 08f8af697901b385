//! Typed wrappers around the marketplace REST endpoints.
//!
//! Each function builds a [`RequestDescriptor`](crate::http::RequestDescriptor),
//! sends it through [`HttpClient::send_json`](crate::http::HttpClient::send_json)
//! and hands back the response envelope. Callers inspect `code` themselves or
//! use [`Envelope::into_data`](crate::http::Envelope::into_data).
//!
//! # Endpoint Overview
//!
//! | Method | Path | Function |
//! |--------|------|----------|
//! | POST | `/user/login` | [`login`] |
//! | POST | `/user/login-by-code` | [`login_by_code`] |
//! | POST | `/user/refresh-token` | [`refresh_token`] |
//! | POST | `/user/register` | [`register`] |
//! | POST | `/code/send` | [`send_code`] |
//! | PUT | `/user/forgetPassword` | [`forget_password`] |
//! | GET | `/user` | [`get_user`] |
//! | PUT | `/user` | [`update_user`] |
//! | POST | `/user/avatar` | [`upload_avatar`] |
//! | PUT | `/user/change-phone` | [`change_phone`] |
//! | PUT | `/user/change-password` | [`change_password`] |
//! | GET | `/user/companion/profile` | [`get_companion_profile`] |
//! | GET | `/user/companion/profile/public` | [`get_public_companion_profile`] |
//! | PUT | `/user/companion/profile` | [`update_companion_profile`] |
//! | PUT | `/user/companion/status` | [`update_companion_status`] |
//! | POST | `/user/companion/apply` | [`apply_companion`] |
//! | GET | `/user/companions` | [`list_companions`] |
//! | GET | `/user/gameskills` | [`list_game_skills`] |
//! | GET | `/user/wallet` | [`get_wallet`] |
//! | POST | `/user/recharge` | [`create_recharge_order`] |
//! | GET | `/user/recharge` | [`query_recharge_order`] |
//! | GET | `/user/recharge/list` | [`list_recharge_orders`] |
//! | GET | `/orders` | [`list_orders`] |
//! | GET | `/order` | [`get_order`] |
//! | POST | `/order` | [`create_order`] |
//! | PUT | `/order/accept` | [`accept_order`] |
//! | PUT | `/order/start` | [`start_order`] |
//! | PUT | `/order/complete` | [`complete_order`] |
//! | POST | `/order/cancel` | [`cancel_order`] |
//! | POST | `/order/rate` | [`rate_order`] |
//! | POST | `/order/delete` | [`delete_order`] |
//! | POST | `/user/follow` | [`follow_user`] |
//! | POST | `/user/unfollow` | [`unfollow_user`] |
//! | GET | `/user/follow/status` | [`check_follow_status`] |
//! | GET | `/user/followers` | [`list_followers`] |
//! | GET | `/user/following` | [`list_following`] |
//! | GET | `/user/follow/mutual` | [`list_mutual_follows`] |
//! | GET | `/user/companions/ranking/orders` | [`orders_ranking`] |
//! | GET | `/user/companions/ranking/ratings` | [`ratings_ranking`] |

mod companion;
mod order;
mod rank;
mod relation;
pub mod types;
mod user;
mod wallet;

pub(crate) use companion::COMPANION_PROFILE_PATH;
pub use companion::{
    apply_companion,
    get_companion_profile,
    get_public_companion_profile,
    list_companions,
    list_game_skills,
    update_companion_profile,
    update_companion_status,
};
pub use order::{
    accept_order,
    cancel_order,
    complete_order,
    create_order,
    delete_order,
    get_order,
    list_orders,
    rate_order,
    start_order,
};
pub use rank::{orders_ranking, ratings_ranking};
pub use relation::{
    check_follow_status,
    follow_user,
    list_followers,
    list_following,
    list_mutual_follows,
    unfollow_user,
};
pub use user::{
    change_password,
    change_phone,
    forget_password,
    get_user,
    login,
    login_by_code,
    refresh_token,
    register,
    send_code,
    update_user,
    upload_avatar,
};
pub use wallet::{create_recharge_order, get_wallet, list_recharge_orders, query_recharge_order};
