use super::*;
use axum::{http::StatusCode, routing::get, Router};
use shared::domain::RecordId;
use tokio::net::TcpListener;

const PRODUCTS_BODY: &str =
    r#"[{"id":1,"name":"Widget","category":"tools","price":9.99,"stock":5}]"#;

async fn spawn_gateway(app: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn json(body: &'static str) -> ([(&'static str, &'static str); 1], &'static str) {
    ([("content-type", "application/json")], body)
}

#[tokio::test]
async fn fetches_products_from_mapped_path() {
    let app = Router::new().route(
        "/be-ecom-products/api/products",
        get(|| async { json(PRODUCTS_BODY) }),
    );
    let api_url = spawn_gateway(app).await;
    let client = DashboardClient::new(format!("{api_url}/"));

    let records = client
        .fetch_records(Category::Products)
        .await
        .expect("products");
    let Records::Products(rows) = records else {
        panic!("expected products");
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, RecordId::Int(1));
    assert_eq!(rows[0].name.as_deref(), Some("Widget"));
}

#[tokio::test]
async fn non_success_status_is_reported_as_http_code() {
    let app = Router::new().route(
        "/be-ecom-users/api/users",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let api_url = spawn_gateway(app).await;
    let client = DashboardClient::new(api_url);

    let failure = client
        .fetch_records(Category::Users)
        .await
        .expect_err("must fail");
    assert_eq!(failure.source, FetchError::Status(500));
    assert_eq!(
        failure.to_string(),
        "Failed to fetch be-ecom-users/api/users: HTTP 500"
    );
}

#[tokio::test]
async fn missing_route_is_a_status_failure() {
    let api_url = spawn_gateway(Router::new()).await;
    let client = DashboardClient::new(api_url);

    let failure = client
        .fetch_records(Category::Orders)
        .await
        .expect_err("must fail");
    assert_eq!(failure.source, FetchError::Status(404));
    assert_eq!(failure.endpoint, "be-ecom-orders/api/orders");
}

#[tokio::test]
async fn malformed_body_is_a_decode_failure() {
    let app = Router::new().route(
        "/be-ecom-orders/api/orders",
        get(|| async { json("<html>gateway error</html>") }),
    );
    let api_url = spawn_gateway(app).await;
    let client = DashboardClient::new(api_url);

    let failure = client
        .fetch_records(Category::Orders)
        .await
        .expect_err("must fail");
    assert!(matches!(failure.source, FetchError::Decode(_)));
    assert!(failure
        .to_string()
        .starts_with("Failed to fetch be-ecom-orders/api/orders: "));
}

#[tokio::test]
async fn unreachable_gateway_is_a_transport_failure() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = DashboardClient::new(format!("http://{addr}"));
    let failure = client
        .fetch_records(Category::Products)
        .await
        .expect_err("must fail");
    let FetchError::Transport(message) = &failure.source else {
        panic!("expected transport error, got {failure:?}");
    };
    assert!(!message.is_empty());
}

#[tokio::test]
async fn catalog_source_delegates_to_http_fetch() {
    let app = Router::new().route(
        "/be-ecom-products/api/products",
        get(|| async { json(PRODUCTS_BODY) }),
    );
    let api_url = spawn_gateway(app).await;
    let source: Box<dyn CatalogSource> = Box::new(DashboardClient::new(api_url));

    let records = source.fetch(Category::Products).await.expect("products");
    assert_eq!(records.category(), Category::Products);
    assert_eq!(records.len(), 1);
}

#[test]
fn trailing_slash_is_trimmed_from_api_url() {
    let client = DashboardClient::new("http://localhost:5000///");
    assert_eq!(client.api_url(), "http://localhost:5000");
}
