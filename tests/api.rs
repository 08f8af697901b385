use std::sync::Arc;

use serde_json::json;
use slgaming::{
    api::{
        self,
        types::{
            CancelOrderRequest,
            CodePurpose,
            CreateOrderRequest,
            LoginRequest,
            OrderKey,
            OrderQuery,
            OrderRole,
            PageQuery,
            SendCodeRequest,
            UserQuery,
        },
    },
    codec::BigId,
    http::{CollectingNotifier, HttpClient, HttpError},
    session::{SessionCredential, SessionStore},
};
use url::Url;
use wiremock::{
    Mock,
    MockServer,
    ResponseTemplate,
    matchers::{body_json, body_string_contains, header, method, path, query_param},
};

async fn client(server: &MockServer) -> HttpClient {
    let base_url = Url::parse(&format!("{}/api", server.uri())).unwrap();
    HttpClient::with_options(
        base_url,
        Arc::new(SessionStore::in_memory()),
        Arc::new(CollectingNotifier::new()),
        Default::default(),
    )
    .unwrap()
}

fn big_id(digits: &str) -> BigId {
    digits.parse().unwrap()
}

#[tokio::test]
async fn login_returns_token_pair() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user/login"))
        .and(body_json(json!({"phone": "13124917464", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "msg": "success",
            "data": {"accessToken": "acc", "refreshToken": "ref", "expiresIn": 7200}
        })))
        .mount(&server)
        .await;

    let envelope = api::login(
        &client(&server).await,
        &LoginRequest {
            phone: "13124917464".into(),
            password: "secret".into(),
        },
    )
    .await
    .unwrap();

    let data = envelope.into_data().unwrap().unwrap();
    assert_eq!(data, SessionCredential {
        access_token: "acc".into(),
        refresh_token: "ref".into(),
        expires_in: Some(7200),
    });
}

#[tokio::test]
async fn send_code_for_phone_change() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/code/send"))
        .and(body_json(json!({"phone": "13800000000", "purpose": "change_phone_new"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0, "msg": "success"})))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = api::send_code(&client(&server).await, &SendCodeRequest {
        phone: "13800000000".into(),
        purpose: CodePurpose::ChangePhoneNew,
    })
    .await
    .unwrap();
    assert!(envelope.is_success());
}

#[tokio::test]
async fn get_user_keeps_large_id_exact() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user"))
        .and(query_param("id", "1996080936390758400"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"code":0,"msg":"success","data":{"id":1996080936390758400,"uid":38830062,"nickname":"王者","phone":"13124917464"}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let query = UserQuery {
        id: Some(big_id("1996080936390758400")),
        ..Default::default()
    };
    let user = api::get_user(&client(&server).await, &query)
        .await
        .unwrap()
        .into_data()
        .unwrap()
        .unwrap();
    assert_eq!(user.id.unwrap().as_str(), "1996080936390758400");
    assert_eq!(user.uid, 38830062);
    assert_eq!(user.phone, "13124917464");
}

#[tokio::test]
async fn create_order_sends_bare_companion_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/order"))
        .and(body_string_contains(r#""companionId":79228162514264337593"#))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"code":0,"data":{"id":1996080936390758401,"companionId":79228162514264337593,"gameName":"Valorant","durationHours":2,"status":1}}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let request = CreateOrderRequest {
        companion_id: big_id("79228162514264337593"),
        game_name: "Valorant".into(),
        duration_hours: 2,
        game_mode: None,
    };
    let order = api::create_order(&client(&server).await, &request)
        .await
        .unwrap()
        .data
        .unwrap();
    assert_eq!(order.companion_id.unwrap().as_str(), "79228162514264337593");
    assert_eq!(order.id.unwrap().as_str(), "1996080936390758401");
}

#[tokio::test]
async fn order_transitions_use_put() {
    let server = MockServer::start().await;
    for route in ["/api/order/accept", "/api/order/start", "/api/order/complete"] {
        Mock::given(method("PUT"))
            .and(path(route))
            .and(body_string_contains(r#""orderId":1996080936390758401"#))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client(&server).await;
    let id = big_id("1996080936390758401");
    api::accept_order(&client, &id).await.unwrap();
    api::start_order(&client, &id).await.unwrap();
    api::complete_order(&client, &id).await.unwrap();
}

#[tokio::test]
async fn cancel_and_list_orders() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/order/cancel"))
        .and(body_string_contains(r#""reason":"busy""#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .and(query_param("role", "companion"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "data": {"orders": [{"orderNo": "O1", "status": 6}], "total": 1, "page": 2, "pageSize": 20}
        })))
        .mount(&server)
        .await;

    let client = client(&server).await;
    api::cancel_order(&client, &CancelOrderRequest {
        order_id: big_id("1996080936390758401"),
        reason: Some("busy".into()),
    })
    .await
    .unwrap();

    let list = api::list_orders(&client, &OrderQuery {
        role: Some(OrderRole::Companion),
        page: Some(2),
        ..Default::default()
    })
    .await
    .unwrap()
    .into_data()
    .unwrap()
    .unwrap();
    assert_eq!(list.total, 1);
    assert_eq!(list.orders[0].order_no, "O1");
    assert_eq!(list.orders[0].status, 6);
}

#[tokio::test]
async fn get_order_by_number() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/order"))
        .and(query_param("orderNo", "O20251201"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0, "data": {"orderNo": "O20251201"}})))
        .expect(1)
        .mount(&server)
        .await;

    let order = api::get_order(&client(&server).await, &OrderKey::OrderNo("O20251201".into()))
        .await
        .unwrap();
    assert_eq!(order.data.unwrap().order_no, "O20251201");
}

#[tokio::test]
async fn follow_and_unfollow() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user/follow"))
        .and(body_string_contains(r#"{"userId":1996080936390758400}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/user/unfollow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/user/follow/status"))
        .and(query_param("targetUserId", "1996080936390758400"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "data": {"isFollowing": true, "isFollowed": false, "isMutual": false}
        })))
        .mount(&server)
        .await;

    let client = client(&server).await;
    let id = big_id("1996080936390758400");
    api::follow_user(&client, &id).await.unwrap();
    let status = api::check_follow_status(&client, &id).await.unwrap().data.unwrap();
    assert!(status.is_following);
    assert!(!status.is_mutual);
    api::unfollow_user(&client, &id).await.unwrap();
}

#[tokio::test]
async fn ranking_defaults_to_first_page_of_ten() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/companions/ranking/ratings"))
        .and(query_param("page", "1"))
        .and(query_param("pageSize", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0, "data": []})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/user/companions/ranking/orders"))
        .and(query_param("page", "3"))
        .and(query_param("pageSize", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0, "data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server).await;
    api::ratings_ranking(&client, None).await.unwrap();
    api::orders_ranking(&client, Some(PageQuery::new(3, 5))).await.unwrap();
}

#[tokio::test]
async fn upload_avatar_sends_multipart_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user/avatar"))
        .and(body_string_contains(r#"name="avatar"; filename="me.png""#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "data": {"avatarUrl": "/uploads/me.png"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = api::upload_avatar(&client(&server).await, "me.png", b"fake-png-bytes".to_vec())
        .await
        .unwrap();
    assert_eq!(envelope.data.unwrap().avatar_url, "/uploads/me.png");
}

#[tokio::test]
async fn application_error_on_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/wallet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 1001, "msg": "钱包不存在"})))
        .mount(&server)
        .await;

    let envelope = api::get_wallet(&client(&server).await).await.unwrap();
    assert!(!envelope.is_success());
    match envelope.into_data() {
        Err(HttpError::Application { code, message }) => {
            assert_eq!(code, 1001);
            assert_eq!(message, "钱包不存在");
        },
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn bearer_is_sent_by_api_calls() {
    let server = MockServer::start().await;
    let session = Arc::new(SessionStore::in_memory());
    session.set(SessionCredential::new("tok123", "")).await;
    let client = HttpClient::new(Url::parse(&format!("{}/api", server.uri())).unwrap(), session).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/user/companion/profile"))
        .and(header("Authorization", "Bearer tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0, "data": {"gameSkill": "Valorant"}})))
        .expect(1)
        .mount(&server)
        .await;

    let profile = api::get_companion_profile(&client).await.unwrap().data.unwrap();
    assert_eq!(profile.game_skill, "Valorant");
}
