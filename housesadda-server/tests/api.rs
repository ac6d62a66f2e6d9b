//! API contract tests
//!
//! These exercise the real router against a real database.
//! Run with: DATABASE_URL=postgres://... cargo test -p housesadda-server -- --ignored
//!
//! Rows are namespaced with a per-test suffix so runs don't collide.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use housesadda_core::JwtManager;
use housesadda_server::db::repos::{AdminUserRepo, LocationRepo, PropertyRepo, PropertyTypeRepo};
use housesadda_server::db::{create_pool, migrations};
use housesadda_server::models::PropertyDraft;
use housesadda_server::{build_router, AppState, UploadStore};

const TEST_SECRET: &str = "api-contract-test-secret";

struct TestApp {
    router: Router,
    pool: sqlx::PgPool,
    token: String,
    suffix: String,
}

async fn test_app() -> TestApp {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = create_pool(&url).await.expect("pool creation failed");
    migrations::run(&pool).await.expect("migrations failed");

    let suffix = Uuid::new_v4().simple().to_string();

    let password_hash = housesadda_core::hash_password("correct-horse").unwrap();
    let admin = AdminUserRepo::new(&pool)
        .upsert(&format!("admin-{suffix}"), &password_hash)
        .await
        .expect("admin seed failed");

    let jwt = JwtManager::new(TEST_SECRET, 3600);
    let token = jwt.issue(admin.id, &admin.username).unwrap();

    let upload_root = std::env::temp_dir().join(format!("housesadda-test-{suffix}"));
    let state = AppState {
        pool: pool.clone(),
        jwt,
        uploads: UploadStore::new(upload_root),
    };

    TestApp {
        router: build_router(Arc::new(state)),
        pool,
        token,
        suffix,
    }
}

impl TestApp {
    async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    /// Seed one vocabulary pair and return (type name, area name).
    async fn seed_vocab(&self) -> (String, String) {
        let type_name = format!("Apartment-{}", self.suffix);
        let area_name = format!("Madhapur-{}", self.suffix);
        PropertyTypeRepo::new(&self.pool)
            .create(&type_name)
            .await
            .unwrap();
        LocationRepo::new(&self.pool)
            .create(&area_name, "Hyderabad")
            .await
            .unwrap();
        (type_name, area_name)
    }

    async fn seed_property(
        &self,
        type_name: &str,
        area_name: &str,
        title: &str,
        transaction_type: &str,
        is_featured: bool,
        images: &[String],
    ) -> Uuid {
        let draft = PropertyDraft::new(
            title,
            "Hyderabad",
            5_000_000,
            2,
            2,
            1200,
            None,
            transaction_type,
            is_featured,
            true,
            vec![],
            vec![],
            None,
            None,
            None,
        )
        .unwrap();

        let type_id = PropertyTypeRepo::new(&self.pool)
            .find_by_name(type_name)
            .await
            .unwrap()
            .unwrap()
            .id;
        let location_id = LocationRepo::new(&self.pool)
            .find_by_name(area_name)
            .await
            .unwrap()
            .unwrap()
            .id;

        PropertyRepo::new(&self.pool)
            .create(&draft, type_id, location_id, images)
            .await
            .unwrap()
    }

    async fn property_count_titled(&self, title: &str) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM properties WHERE title = $1")
            .bind(title)
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

fn payload(type_name: &str, area_name: &str, title: &str) -> Value {
    json!({
        "title": title,
        "type": type_name,
        "area": area_name,
        "city": "Hyderabad",
        "price": 7_500_000,
        "bedrooms": 3,
        "bathrooms": 2,
        "sqft": 1650,
        "transactionType": "Sale",
    })
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_with_unknown_type_is_400_and_no_insert() {
    let app = test_app().await;
    let (_, area_name) = app.seed_vocab().await;
    let title = format!("Ghost listing {}", app.suffix);

    let body = payload(&format!("NoSuchType-{}", app.suffix), &area_name, &title);
    let (status, response) = app
        .request("POST", "/api/properties", Some(app.token.as_str()), Some(body))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["message"]
        .as_str()
        .unwrap()
        .contains("unknown property type"));
    assert_eq!(app.property_count_titled(&title).await, 0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_with_unknown_area_is_400_and_no_insert() {
    let app = test_app().await;
    let (type_name, _) = app.seed_vocab().await;
    let title = format!("Ghost listing {}", app.suffix);

    let body = payload(&type_name, &format!("NoSuchArea-{}", app.suffix), &title);
    let (status, _) = app
        .request("POST", "/api/properties", Some(app.token.as_str()), Some(body))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.property_count_titled(&title).await, 0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn featured_filter_returns_only_featured() {
    let app = test_app().await;
    let (type_name, area_name) = app.seed_vocab().await;

    let featured_title = format!("Featured {}", app.suffix);
    app.seed_property(&type_name, &area_name, &featured_title, "Sale", true, &[])
        .await;
    app.seed_property(
        &type_name,
        &area_name,
        &format!("Plain {}", app.suffix),
        "Sale",
        false,
        &[],
    )
    .await;

    let uri = format!("/api/properties?featured=true&area={area_name}");
    let (status, body) = app.request("GET", &uri, None, None).await;

    assert_eq!(status, StatusCode::OK);
    let listings = body.as_array().unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0]["title"], featured_title.as_str());
    assert_eq!(listings[0]["isFeatured"], true);
}

#[tokio::test]
#[ignore = "requires database"]
async fn transaction_type_filters_exactly_and_undefined_is_no_filter() {
    let app = test_app().await;
    let (type_name, area_name) = app.seed_vocab().await;

    app.seed_property(
        &type_name,
        &area_name,
        &format!("For rent {}", app.suffix),
        "Rent",
        false,
        &[],
    )
    .await;
    app.seed_property(
        &type_name,
        &area_name,
        &format!("For sale {}", app.suffix),
        "Sale",
        false,
        &[],
    )
    .await;

    let uri = format!("/api/properties?transactionType=Rent&area={area_name}");
    let (_, body) = app.request("GET", &uri, None, None).await;
    let listings = body.as_array().unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0]["transactionType"], "Rent");

    // Stringified-undefined means "no filter", both rows come back.
    let uri = format!("/api/properties?transactionType=undefined&area={area_name}");
    let (_, body) = app.request("GET", &uri, None, None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_removes_image_rows() {
    let app = test_app().await;
    let (type_name, area_name) = app.seed_vocab().await;

    let images = vec![
        "/uploads/property-images/general/a.png".to_string(),
        "/uploads/property-images/general/b.png".to_string(),
    ];
    let id = app
        .seed_property(
            &type_name,
            &area_name,
            &format!("With images {}", app.suffix),
            "Sale",
            false,
            &images,
        )
        .await;

    let orphans: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM property_images WHERE property_id = $1")
            .bind(id)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!(orphans, 2);

    let (status, _) = app
        .request(
            "DELETE",
            &format!("/api/properties/{id}"),
            Some(app.token.as_str()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let orphans: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM property_images WHERE property_id = $1")
            .bind(id)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!(orphans, 0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn mutation_without_token_is_401_and_no_state_change() {
    let app = test_app().await;
    let name = format!("Kondapur-{}", app.suffix);

    let body = json!({ "name": name, "city": "Hyderabad" });
    let (status, response) = app
        .request("POST", "/api/locations", None, Some(body.clone()))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(response["error"], "unauthorized");

    // A garbage token is just as unauthorized.
    let (status, _) = app
        .request("POST", "/api/locations", Some("not-a-token"), Some(body))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM locations WHERE name = $1")
        .bind(&name)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn login_failure_is_uniform_401() {
    let app = test_app().await;
    let username = format!("admin-{}", app.suffix);

    let (status, wrong_password) = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": username, "password": "wrong" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, unknown_user) = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": format!("nobody-{}", app.suffix), "password": "wrong" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Identical bodies: the response must not reveal whether the username
    // exists.
    assert_eq!(wrong_password, unknown_user);
}

#[tokio::test]
#[ignore = "requires database"]
async fn login_then_verify_round_trip() {
    let app = test_app().await;
    let username = format!("admin-{}", app.suffix);

    let (status, body) = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": username, "password": "correct-horse" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(body["user"]["username"], username.as_str());

    let (status, body) = app
        .request("GET", "/api/auth/verify", Some(token.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], username.as_str());
}

#[tokio::test]
#[ignore = "requires database"]
async fn list_filter_composes_with_search() {
    let app = test_app().await;
    let (type_name, area_name) = app.seed_vocab().await;

    app.seed_property(
        &type_name,
        &area_name,
        &format!("Lakeview penthouse {}", app.suffix),
        "Sale",
        false,
        &[],
    )
    .await;
    app.seed_property(
        &type_name,
        &area_name,
        &format!("Garden villa {}", app.suffix),
        "Sale",
        false,
        &[],
    )
    .await;

    let uri = format!("/api/properties?search=lakeview&area={area_name}");
    let (status, body) = app.request("GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);

    let listings = body.as_array().unwrap();
    assert_eq!(listings.len(), 1);
    assert!(listings[0]["title"].as_str().unwrap().contains("Lakeview"));
}

#[tokio::test]
#[ignore = "requires database"]
async fn unknown_property_is_404() {
    let app = test_app().await;
    let (status, body) = app
        .request(
            "GET",
            &format!("/api/properties/{}", Uuid::new_v4()),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
#[ignore = "requires database"]
async fn health_is_public() {
    let app = test_app().await;
    let (status, body) = app.request("GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
#[ignore = "requires database"]
async fn upload_round_trip() {
    let app = test_app().await;

    let body = json!({
        "file": "data:image/png;base64,aGVsbG8=",
        "fileName": "front elevation.png",
        "folder": "general",
        "bucket": "property-images",
    });
    let (status, response) = app
        .request("POST", "/api/upload", Some(app.token.as_str()), Some(body))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let url = response["url"].as_str().unwrap();
    assert!(url.starts_with("/uploads/property-images/general/"));
    assert!(url.ends_with(".png"));
    assert!(!url.contains(' '));
}

#[tokio::test]
#[ignore = "requires database"]
async fn filtered_list_is_empty_when_nothing_matches() {
    let app = test_app().await;
    let (_, area_name) = app.seed_vocab().await;

    // Vocabulary exists but no property references it yet.
    let uri = format!("/api/properties?area={area_name}");
    let (status, body) = app.request("GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}
