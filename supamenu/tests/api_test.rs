mod common;

use common::{created_body, FakeTransport};
use supamenu::{ApiClient, ApiError, Method, RequestBody, SessionContext, TransportError};
use web_common::{MenuCategory, OrderStatus, SignupRequest};

fn client(transport: &FakeTransport, session: SessionContext) -> ApiClient<FakeTransport> {
    ApiClient::new(transport.clone(), session)
}

#[tokio::test]
async fn login_stores_the_token_in_the_session() {
    let transport = FakeTransport::new();
    transport.respond(
        200,
        r#"{"token":"abc","user":{"email":"jp@example.com","firstName":"Jean","lastName":"Paul"}}"#,
    );
    let session = SessionContext::new();
    let api = client(&transport, session.clone());

    let response = api.login(" jp@example.com ", "secret").await.unwrap();

    assert_eq!(response.token, "abc");
    assert_eq!(session.bearer().as_deref(), Some("abc"));
    assert_eq!(session.user().unwrap().display_name(), "Jean Paul");

    let request = &transport.requests()[0];
    assert_eq!(request.path, "/auth/login");
    assert_eq!(request.bearer, None);
    assert_eq!(
        request.body,
        RequestBody::Json(serde_json::json!({ "email": "jp@example.com", "password": "secret" }))
    );
}

#[tokio::test]
async fn failed_login_leaves_the_session_empty() {
    let transport = FakeTransport::new();
    transport.respond(401, r#"{"message":"Invalid credentials"}"#);
    let session = SessionContext::new();
    let api = client(&transport, session.clone());

    let error = api.login("jp@example.com", "wrong").await.unwrap_err();

    assert_eq!(error.to_string(), "Invalid credentials");
    assert!(!session.is_signed_in());
}

#[tokio::test]
async fn login_without_token_is_a_decode_error() {
    let transport = FakeTransport::new();
    transport.respond(200, r#"{"token":""}"#);
    let session = SessionContext::new();
    let api = client(&transport, session.clone());

    assert!(matches!(
        api.login("jp@example.com", "secret").await,
        Err(ApiError::Decode(_))
    ));
    assert!(!session.is_signed_in());
}

#[tokio::test]
async fn signup_posts_camel_case_form() {
    let transport = FakeTransport::new();
    transport.respond(201, r#"{"email":"jp@example.com","firstName":"Jean"}"#);
    let api = client(&transport, SessionContext::new());

    let user = api
        .signup(&SignupRequest {
            first_name: "Jean".to_string(),
            last_name: "Paul".to_string(),
            phone: "0788123456".to_string(),
            national_id: "1199880012345678".to_string(),
            email: "jp@example.com".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(user.display_name(), "Jean");
    match &transport.requests()[0].body {
        RequestBody::Json(body) => {
            assert_eq!(body["firstName"], "Jean");
            assert_eq!(body["nationalId"], "1199880012345678");
        }
        other => panic!("expected json, got {:?}", other),
    }
}

#[tokio::test]
async fn logout_clears_the_credential() {
    let transport = FakeTransport::new();
    let session = SessionContext::with_token("abc");
    let api = client(&transport, session.clone());

    api.logout();

    assert!(!session.is_signed_in());
    assert!(matches!(api.metrics().await, Err(ApiError::MissingCredential)));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn orders_filter_by_status() {
    let transport = FakeTransport::new();
    transport.respond(
        200,
        r#"[{"id":7,"status":"PENDING","totalAmount":3000,"createdAt":"2024-05-01T12:00:00Z"}]"#,
    );
    transport.respond(200, "[]");
    let api = client(&transport, SessionContext::with_token("abc"));

    let pending = api.orders(Some(OrderStatus::Pending)).await.unwrap();
    let all = api.orders(None).await.unwrap();

    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, "7");
    assert!(all.is_empty());

    let requests = transport.requests();
    assert_eq!(requests[0].query, vec![("status".to_string(), "PENDING".to_string())]);
    assert!(requests[1].query.is_empty());
    assert_eq!(requests[1].bearer.as_deref(), Some("abc"));
}

#[tokio::test]
async fn metrics_and_menu_pages_decode() {
    let transport = FakeTransport::new();
    transport.respond(200, r#"{"totalOrders":12,"pendingOrders":3,"totalSales":45000.5}"#);
    transport.respond(
        200,
        r#"{"content":[{"id":1,"name":"Tea","price":1500,"category":"DRINK"}],"totalElements":1,"totalPages":1,"number":0}"#,
    );
    let api = client(&transport, SessionContext::with_token("abc"));

    let metrics = api.metrics().await.unwrap();
    assert_eq!(metrics.pending_orders, 3);

    let page = api.menu_items("r-1", MenuCategory::Drink, 0, 20).await.unwrap();
    assert_eq!(page.content[0].price, "1500");
    assert!(page.content[0].available);

    let request = &transport.requests()[1];
    assert_eq!(request.path, "/restaurants/r-1/menu-items");
    assert_eq!(
        request.query,
        vec![
            ("category".to_string(), "DRINK".to_string()),
            ("page".to_string(), "0".to_string()),
            ("size".to_string(), "20".to_string()),
        ]
    );
}

#[tokio::test]
async fn restaurant_and_delete() {
    let transport = FakeTransport::new();
    transport.respond(200, &created_body("r-9"));
    transport.respond(204, "");
    let api = client(&transport, SessionContext::with_token("abc"));

    let restaurant = api.restaurant("r-9").await.unwrap();
    assert_eq!(restaurant.name, "Joe's");
    assert_eq!(restaurant.menu_items.len(), 1);

    api.delete_restaurant("r-9").await.unwrap();
    let request = &transport.requests()[1];
    assert_eq!(request.method, Method::Delete);
    assert_eq!(request.path, "/restaurants/r-9");
}

#[tokio::test]
async fn errors_are_normalised() {
    let transport = FakeTransport::new();
    transport.respond(404, "");
    transport.fail(TransportError::Timeout);
    transport.respond(200, "not json");
    let api = client(&transport, SessionContext::with_token("abc"));

    match api.restaurant("missing").await {
        Err(ApiError::Rejected { status, message, details }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Failed to fetch restaurant");
            assert!(details.is_empty());
        }
        other => panic!("expected Rejected, got {:?}", other),
    }
    assert_eq!(
        api.metrics().await,
        Err(ApiError::Transport(TransportError::Timeout))
    );
    assert!(matches!(api.metrics().await, Err(ApiError::Decode(_))));
}
