//! Login exchange against a mock identity provider.

use std::sync::Arc;

use formauth_core::auth::{AuthClient, LoginErrorKind};
use formauth_core::components::LoginComponent;
use formauth_core::components::login::{EMAIL, PASSWORD};
use formauth_core::config::AuthConfig;
use formauth_core::session::{PROFILE_KEY, SessionStore, TOKEN_KEY};
use formauth_core::store::{KeyValueStore, MemoryStore};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Store that refuses to persist the profile.
#[derive(Default)]
struct NoProfileStore(MemoryStore);

impl KeyValueStore for NoProfileStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.0.get(key)
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        if key == PROFILE_KEY {
            anyhow::bail!("quota exceeded");
        }
        self.0.set(key, value)
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.0.remove(key)
    }
}

fn client_for(server: &MockServer) -> AuthClient {
    AuthClient::new(AuthConfig {
        token_url: format!("{}/oauth/ro", server.uri()),
        profile_url: format!("{}/tokeninfo", server.uri()),
        client_id: "test-client".to_string(),
        ..Default::default()
    })
    .unwrap()
}

fn component(store: &Arc<MemoryStore>) -> LoginComponent {
    let store: Arc<dyn KeyValueStore> = store.clone();
    LoginComponent::restore(SessionStore::new(store)).unwrap()
}

fn fill(c: &mut LoginComponent, email: &str, password: &str) {
    c.form_mut()
        .set_text(EMAIL, Some(email.to_string()))
        .unwrap();
    c.form_mut()
        .set_text(PASSWORD, Some(password.to_string()))
        .unwrap();
}

#[tokio::test]
async fn test_successful_exchange_authenticates_and_persists() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/ro"))
        .and(body_json(json!({
            "client_id": "test-client",
            "username": "a@b.com",
            "password": "secret",
            "connection": "Username-Password-Authentication",
            "grant_type": "password",
            "scope": "openid name email",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id_token": "abc"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/tokeninfo"))
        .and(body_json(json!({"id_token": "abc"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"email": "a@b.com"})))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let mut login = component(&store);
    fill(&mut login, "a@b.com", "secret");

    login.submit(&client_for(&server)).await.unwrap();

    assert!(login.is_authenticated());
    assert_eq!(login.profile().unwrap().email(), Some("a@b.com"));
    assert_eq!(login.last_error(), None);
    assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
    assert_eq!(
        store.get(PROFILE_KEY).unwrap().as_deref(),
        Some(r#"{"email":"a@b.com"}"#)
    );
    assert!(login.form().fields().iter().all(|f| !f.is_touched()));
}

#[tokio::test]
async fn test_token_field_named_token_is_accepted() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/ro"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/tokeninfo"))
        .and(body_json(json!({"id_token": "abc"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"email": "a@b.com"})))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let mut login = component(&store);
    fill(&mut login, "a@b.com", "secret");

    login.submit(&client_for(&server)).await.unwrap();

    assert!(login.is_authenticated());
    assert_eq!(login.last_error(), None);
    assert_eq!(login.profile().unwrap().email(), Some("a@b.com"));
    assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
    assert_eq!(
        store.get(PROFILE_KEY).unwrap().as_deref(),
        Some(r#"{"email":"a@b.com"}"#)
    );
}

#[tokio::test]
async fn test_response_without_token_is_rejected_and_skips_profile() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/ro"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token_type": "bearer"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/tokeninfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let mut login = component(&store);
    fill(&mut login, "a@b.com", "secret");

    login.submit(&client_for(&server)).await.unwrap();

    assert!(!login.is_authenticated());
    assert_eq!(login.last_error().unwrap().kind, LoginErrorKind::AuthRejected);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_wrong_password_surfaces_provider_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/ro"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_user_password",
            "error_description": "Wrong email or password."
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let mut login = component(&store);
    fill(&mut login, "a@b.com", "wrong");

    login.submit(&client_for(&server)).await.unwrap();

    let err = login.last_error().unwrap();
    assert_eq!(err.kind, LoginErrorKind::AuthRejected);
    assert!(err.message.contains("Wrong email or password."));
    assert!(login.can_submit());
}

#[tokio::test]
async fn test_profile_failure_rolls_back_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/ro"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id_token": "abc"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/tokeninfo"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let mut login = component(&store);
    fill(&mut login, "a@b.com", "secret");

    login.submit(&client_for(&server)).await.unwrap();

    assert!(!login.is_authenticated());
    assert_eq!(login.last_error().unwrap().kind, LoginErrorKind::Network);
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(store.get(PROFILE_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_profile_write_failure_rolls_back_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/ro"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id_token": "abc"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/tokeninfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"email": "a@b.com"})))
        .mount(&server)
        .await;

    let store = Arc::new(NoProfileStore::default());
    let sessions = SessionStore::new(store.clone());
    let mut login = LoginComponent::restore(sessions).unwrap();
    fill(&mut login, "a@b.com", "secret");

    login.submit(&client_for(&server)).await.unwrap();

    assert!(!login.is_authenticated());
    let err = login.last_error().unwrap();
    assert_eq!(err.kind, LoginErrorKind::Storage);
    assert!(err.message.contains("quota exceeded"));
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_non_json_token_response_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/ro"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let mut login = component(&store);
    fill(&mut login, "a@b.com", "secret");

    login.submit(&client_for(&server)).await.unwrap();

    assert_eq!(
        login.last_error().unwrap().kind,
        LoginErrorKind::MalformedResponse
    );
}

#[tokio::test]
async fn test_unreachable_provider_is_network_error() {
    let client = AuthClient::new(AuthConfig {
        token_url: "http://127.0.0.1:1/oauth/ro".to_string(),
        profile_url: "http://127.0.0.1:1/tokeninfo".to_string(),
        ..Default::default()
    })
    .unwrap();

    let store = Arc::new(MemoryStore::new());
    let mut login = component(&store);
    fill(&mut login, "a@b.com", "secret");

    login.submit(&client).await.unwrap();

    assert_eq!(login.last_error().unwrap().kind, LoginErrorKind::Network);
}

#[tokio::test]
async fn test_restore_with_stored_session_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    store.set(TOKEN_KEY, "abc").unwrap();
    store.set(PROFILE_KEY, r#"{"email":"a@b.com"}"#).unwrap();

    let login = component(&store);

    assert!(login.is_authenticated());
    assert_eq!(login.welcome_line().as_deref(), Some("Welcome, a@b.com"));
}

#[tokio::test]
async fn test_logout_clears_store_after_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/ro"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id_token": "abc"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/tokeninfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"email": "a@b.com"})))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let mut login = component(&store);
    fill(&mut login, "a@b.com", "secret");
    login.submit(&client_for(&server)).await.unwrap();
    assert!(login.is_authenticated());

    login.logout().unwrap();

    assert!(!login.is_authenticated());
    assert!(store.is_empty());
    assert!(!component(&store).is_authenticated());
}
