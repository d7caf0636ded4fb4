use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use uuid::Uuid;

use blogify::handlers;
use blogify::models::user::SessionClaims;
use blogify::repositories::post_memory_repo::MemoryPostRepo;
use blogify::repositories::post_repository::PostRepository;
use blogify::services::auth_services::AuthService;
use blogify::services::blog_services::BlogService;
use blogify::AppState;

const SECRET: &str = "integration-test-secret";

fn token_for(user: Uuid) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = SessionClaims {
        sub: user.to_string(),
        exp: (now + 3600) as usize,
        iat: Some(now as usize),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap()
}

fn bearer(user: Uuid) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token_for(user)))
}

fn widgets() -> Value {
    json!([
        {"id": "w-text", "type": "text", "layout": {"x": 0, "y": 0, "w": 6, "h": 4},
         "content": [{"type": "paragraph", "children": [{"text": "Hello"}]}]},
        {"id": "w-img", "type": "image", "layout": {"x": 6, "y": 0, "w": 6, "h": 8},
         "content": "https://cdn.example.com/cat.png"}
    ])
}

macro_rules! app {
    ($repo:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState {
                    blog: BlogService::new(PostRepository::Memory($repo.clone()), "https://blogify.example"),
                }))
                .app_data(web::Data::new(AuthService::new(SECRET)))
                .app_data(handlers::json_config())
                .configure(handlers::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn ping_answers() {
    let repo = MemoryPostRepo::new();
    let app = app!(repo);
    let resp: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/blog/ping").to_request(),
    )
    .await;
    assert_eq!(resp["message"], "Blog routes active");
}

#[actix_web::test]
async fn gated_endpoints_reject_missing_or_bad_tokens_without_touching_storage() {
    let repo = MemoryPostRepo::new();
    let app = app!(repo);
    let id = Uuid::new_v4();

    let requests = vec![
        test::TestRequest::post().uri("/api/blog/postblog").set_json(json!({"title": "t", "content": []})),
        test::TestRequest::post().uri("/api/blog/create-draft").set_json(json!({"title": "t", "content": []})),
        test::TestRequest::get().uri("/api/blog/user-blogs"),
        test::TestRequest::put()
            .uri(&format!("/api/blog/updateblog/{}", id))
            .set_json(json!({"content": []})),
        test::TestRequest::delete().uri(&format!("/api/blog/deleteblog/{}", id)),
        test::TestRequest::post()
            .uri(&format!("/api/blog/share-post/{}", id))
            .insert_header(("Authorization", "Bearer not.a.jwt")),
    ];

    for req in requests {
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "error");
    }
    assert_eq!(repo.calls(), 0);
}

#[actix_web::test]
async fn token_signed_with_another_secret_is_rejected() {
    let repo = MemoryPostRepo::new();
    let app = app!(repo);
    let forged = encode(
        &Header::default(),
        &SessionClaims {
            sub: Uuid::new_v4().to_string(),
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
            iat: None,
        },
        &EncodingKey::from_secret(b"someone-else"),
    )
    .unwrap();

    let req = test::TestRequest::get()
        .uri("/api/blog/user-blogs")
        .insert_header(("Authorization", format!("Bearer {}", forged)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(repo.calls(), 0);
}

#[actix_web::test]
async fn publish_view_update_and_delete_flow() {
    let repo = MemoryPostRepo::new();
    let app = app!(repo);
    let author = Uuid::new_v4();

    let req = test::TestRequest::post()
        .uri("/api/blog/postblog")
        .insert_header(bearer(author))
        .set_json(json!({"title": "My First Post", "content": widgets()}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let post = &created["data"];
    let post_id = post["id"].as_str().unwrap().to_string();
    let slug = post["slug"].as_str().unwrap().to_string();
    assert!(slug.starts_with("my-first-post-"));
    assert_eq!(post["content"], widgets());
    assert_eq!(post["is_own_post"], true);

    // public view by slug
    let viewed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri(&format!("/api/viewblog/{}", slug)).to_request(),
    )
    .await;
    assert_eq!(viewed["data"]["title"], "My First Post");
    assert_eq!(viewed["data"]["is_own_post"], false);

    // replace content wholesale
    let replacement = json!([
        {"id": "only", "type": "video", "layout": {"x": 2, "y": 0, "w": 8, "h": 6},
         "content": "https://www.youtube.com/embed/abc"}
    ]);
    let req = test::TestRequest::put()
        .uri(&format!("/api/blog/updateblog/{}", post_id))
        .cookie(Cookie::new("token", token_for(author)))
        .set_json(json!({"content": replacement}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let fetched: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri(&format!("/api/blog/{}", post_id)).to_request(),
    )
    .await;
    assert_eq!(fetched["data"]["content"], replacement);
    assert_eq!(fetched["data"]["title"], "My First Post");

    // rendered html follows the stored layout
    let req = test::TestRequest::get()
        .uri(&format!("/api/viewblog/{}/render", slug))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("grid-column-start: 3; grid-column-end: span 8;"));
    assert!(html.contains("<iframe src=\"https://www.youtube.com/embed/abc\""));

    // share
    let shared: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/blog/share-post/{}", post_id))
            .insert_header(bearer(author))
            .to_request(),
    )
    .await;
    assert_eq!(
        shared["data"]["url"],
        format!("https://blogify.example/viewblog/{}", slug)
    );

    // someone else cannot delete
    let req = test::TestRequest::delete()
        .uri(&format!("/api/blog/deleteblog/{}", post_id))
        .insert_header(bearer(Uuid::new_v4()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/blog/deleteblog/{}", post_id))
        .insert_header(bearer(author))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/viewblog/{}", slug))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn drafts_stay_private_until_published() {
    let repo = MemoryPostRepo::new();
    let app = app!(repo);
    let author = Uuid::new_v4();

    let created: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/blog/create-draft")
            .insert_header(bearer(author))
            .set_json(json!({"title": "Work in progress", "content": widgets()}))
            .to_request(),
    )
    .await;
    let post_id = created["data"]["id"].as_str().unwrap().to_string();
    let slug = created["data"]["slug"].as_str().unwrap().to_string();
    assert_eq!(created["data"]["published"], false);

    let by_slug = test::TestRequest::get()
        .uri(&format!("/api/viewblog/{}", slug))
        .to_request();
    assert_eq!(test::call_service(&app, by_slug).await.status(), StatusCode::NOT_FOUND);

    let anonymous = test::TestRequest::get()
        .uri(&format!("/api/blog/{}", post_id))
        .to_request();
    assert_eq!(test::call_service(&app, anonymous).await.status(), StatusCode::NOT_FOUND);

    let own = test::TestRequest::get()
        .uri(&format!("/api/blog/{}", post_id))
        .insert_header(bearer(author))
        .to_request();
    assert_eq!(test::call_service(&app, own).await.status(), StatusCode::OK);

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/blog/user-blogs")
            .insert_header(bearer(author))
            .to_request(),
    )
    .await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    let publish = test::TestRequest::put()
        .uri(&format!("/api/blog/updateblog/{}", post_id))
        .insert_header(bearer(author))
        .set_json(json!({"content": widgets(), "published": true}))
        .to_request();
    assert_eq!(test::call_service(&app, publish).await.status(), StatusCode::OK);

    let by_slug = test::TestRequest::get()
        .uri(&format!("/api/viewblog/{}", slug))
        .to_request();
    assert_eq!(test::call_service(&app, by_slug).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn unknown_slug_is_not_found() {
    let repo = MemoryPostRepo::new();
    let app = app!(repo);
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/viewblog/does-not-exist").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Post not found");
}

#[actix_web::test]
async fn invalid_widgets_are_rejected_with_400() {
    let repo = MemoryPostRepo::new();
    let app = app!(repo);
    let author = Uuid::new_v4();

    let bad_payloads = vec![
        // unknown widget type
        json!({"title": "t", "content": [{"id": "a", "type": "poll", "content": "", "layout": {"x": 0, "y": 0, "w": 2, "h": 2}}]}),
        // below minimum size
        json!({"title": "t", "content": [{"id": "a", "type": "image", "content": "https://a.example", "layout": {"x": 0, "y": 0, "w": 1, "h": 2}}]}),
        // past the right edge
        json!({"title": "t", "content": [{"id": "a", "type": "image", "content": "https://a.example", "layout": {"x": 10, "y": 0, "w": 4, "h": 2}}]}),
        // duplicate ids
        json!({"title": "t", "content": [
            {"id": "a", "type": "image", "content": "https://a.example", "layout": {"x": 0, "y": 0, "w": 2, "h": 2}},
            {"id": "a", "type": "image", "content": "https://a.example", "layout": {"x": 2, "y": 0, "w": 2, "h": 2}}
        ]}),
        // missing layout
        json!({"title": "t", "content": [{"id": "a", "type": "image", "content": "https://a.example"}]}),
    ];

    for payload in bad_payloads {
        let req = test::TestRequest::post()
            .uri("/api/blog/postblog")
            .insert_header(bearer(author))
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "error");
    }
}

fn image_at(x: u64, y: u64, w: u64, h: u64) -> Value {
    json!({"title": "Edges", "content": [
        {"id": "a", "type": "image", "content": "https://a.example",
         "layout": {"x": x, "y": y, "w": w, "h": h}}
    ]})
}

#[actix_web::test]
async fn layout_bounds_are_enforced_at_the_edges() {
    let repo = MemoryPostRepo::new();
    let app = app!(repo);
    let author = Uuid::new_v4();
    let max = u32::MAX as u64;

    let rejected = vec![
        image_at(10, 0, 3, 2),
        image_at(max, 0, 2, 2),
        image_at(0, 0, max, 2),
        image_at(0, max, 2, 2),
        image_at(0, 0, 2, max),
        image_at(0, 9_999, 2, 2),
        image_at(0, max + 1, 2, 2),
    ];
    for payload in rejected {
        let req = test::TestRequest::post()
            .uri("/api/blog/postblog")
            .insert_header(bearer(author))
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload {}", payload);
    }
    assert_eq!(repo.calls(), 0);

    let req = test::TestRequest::post()
        .uri("/api/blog/postblog")
        .insert_header(bearer(author))
        .set_json(image_at(10, 9_998, 2, 2))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let slug = created["data"]["slug"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/viewblog/{}/render", slug))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("grid-column-start: 11; grid-column-end: span 2; grid-row-start: 9999;"));
}
