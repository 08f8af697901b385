use std::sync::Arc;

use serde_json::json;
use slgaming::{
    api::types::UpdateCompanionRequest,
    db::{SqlitePersistence, init_db},
    http::{CollectingNotifier, HttpClient},
    session::{CompanionProfile, SessionCredential, SessionStore},
    stores::{CompanionStore, InfoStore, UserStore, WalletStore},
};
use tempfile::tempdir;
use url::Url;
use wiremock::{
    Mock,
    MockServer,
    ResponseTemplate,
    matchers::{body_json, header, method, path},
};

fn client_for(server: &MockServer, session: Arc<SessionStore>) -> Arc<HttpClient> {
    let base_url = Url::parse(&format!("{}/api", server.uri())).unwrap();
    Arc::new(
        HttpClient::with_options(base_url, session, Arc::new(CollectingNotifier::new()), Default::default()).unwrap(),
    )
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/user/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "msg": "success",
            "data": {"accessToken": "tok123", "refreshToken": "ref456", "expiresIn": 7200}
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_stores_credential_and_logout_clears_it() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/user/wallet"))
        .and(header("Authorization", "Bearer tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"code":0,"data":{"userId":1996080936390758400,"balance":628,"frozenBalance":0}}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let session = Arc::new(SessionStore::in_memory());
    let client = client_for(&server, session.clone());
    let user = UserStore::new(client.clone());
    let wallet = WalletStore::new(client.clone());

    user.login("13124917464", "secret").await.unwrap();
    assert_eq!(user.credential().await.unwrap().access_token, "tok123");

    wallet.refresh().await.unwrap();
    let cached = wallet.wallet().await.unwrap();
    assert_eq!(cached.user_id.unwrap().as_str(), "1996080936390758400");
    assert_eq!(cached.balance, 628.0);

    user.logout().await;
    assert!(session.get().await.is_none());
    assert!(wallet.wallet().await.is_none());
}

#[tokio::test]
async fn failed_login_keeps_previous_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user/login-by-code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 400, "msg": "验证码错误"})))
        .mount(&server)
        .await;

    let session = Arc::new(SessionStore::in_memory());
    session.set(SessionCredential::new("still-valid", "")).await;
    let user = UserStore::new(client_for(&server, session.clone()));

    let envelope = user.login_by_code("13124917464", "000000").await.unwrap();
    assert_eq!(envelope.code, 400);
    assert_eq!(session.get().await.unwrap().access_token, "still-valid");
}

#[tokio::test]
async fn info_refresh_rewrites_legacy_avatar_origin() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "data": {"nickname": "王者", "avatarUrl": "http://120.26.29.242/uploads/a.png"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/user"))
        .and(body_json(json!({"bio": "老司机"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
        .expect(1)
        .mount(&server)
        .await;

    let session = Arc::new(SessionStore::in_memory());
    let store = InfoStore::new(
        client_for(&server, session.clone()),
        Some("http://120.26.29.242".to_string()),
    );

    let info = store.refresh().await.unwrap().unwrap();
    assert_eq!(info.avatar_url, "/uploads/a.png");
    assert_eq!(session.cache().await.info.unwrap().nickname, "王者");

    store
        .update(&slgaming::api::types::UpdateUserRequest {
            bio: Some("老司机".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    // The update re-fetched the profile.
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn companion_refresh_merges_and_status_updates_locally() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/companion/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"code":0,"data":{"userId":1996080936390758400,"gameSkill":"三角洲行动","pricePerHour":50,"status":1}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/user/companion/status"))
        .and(body_json(json!({"status": 0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
        .expect(1)
        .mount(&server)
        .await;

    let session = Arc::new(SessionStore::in_memory());
    session
        .set_companion(Some(CompanionProfile {
            bio: "老司机，懂就上车".into(),
            ..Default::default()
        }))
        .await;
    let store = CompanionStore::new(client_for(&server, session.clone()));

    store.refresh().await.unwrap();
    let profile = store.profile().await.unwrap();
    assert_eq!(profile.game_skill, "三角洲行动");
    assert_eq!(profile.bio, "老司机，懂就上车");
    assert_eq!(profile.user_id.unwrap().as_str(), "1996080936390758400");
    assert_eq!(profile.status, 1);

    store.set_status(0).await.unwrap();
    assert_eq!(store.profile().await.unwrap().status, 0);
}

#[tokio::test]
async fn companion_update_skips_refresh_when_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/user/companion/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 403, "msg": "not a companion"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/user/companion/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
        .expect(0)
        .mount(&server)
        .await;

    let store = CompanionStore::new(client_for(&server, Arc::new(SessionStore::in_memory())));
    let envelope = store
        .update(&UpdateCompanionRequest {
            price_per_hour: Some(60.0),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(envelope.code, 403);
    assert!(store.profile().await.is_none());
}

#[tokio::test]
async fn session_survives_restart_and_401_wipes_it_on_disk() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("session.db");
    let server = MockServer::start().await;
    mount_login(&server).await;

    {
        let session = Arc::new(SessionStore::load(Arc::new(SqlitePersistence::new(init_db(&db_path).unwrap()))).unwrap());
        UserStore::new(client_for(&server, session))
            .login("13124917464", "secret")
            .await
            .unwrap();
    }

    let session = Arc::new(SessionStore::load(Arc::new(SqlitePersistence::new(init_db(&db_path).unwrap()))).unwrap());
    assert_eq!(session.get().await.unwrap().refresh_token, "ref456");

    Mock::given(method("GET"))
        .and(path("/api/user/wallet"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let wallet = WalletStore::new(client_for(&server, session.clone()));
    assert!(wallet.refresh().await.unwrap_err().is_unauthorized());

    let reopened = SessionStore::load(Arc::new(SqlitePersistence::new(init_db(&db_path).unwrap()))).unwrap();
    assert!(reopened.get().await.is_none());
}
