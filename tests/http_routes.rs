use std::fs;
use std::path::Path;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use tempfile::{tempdir, TempDir};
use tower::util::ServiceExt;

use ledger_wiki::{create_router, AppState, Config};

struct TestWiki {
    dir: TempDir,
    app: Router,
}

impl TestWiki {
    fn new() -> Self {
        Self::with_templates(&[])
    }

    fn with_templates(templates: &[(&str, &str)]) -> Self {
        let dir = tempdir().unwrap();
        let template_dir = dir.path().join("templates");
        fs::create_dir_all(&template_dir).unwrap();
        for (file, source) in templates {
            fs::write(template_dir.join(file), source).unwrap();
        }
        let static_dir = dir.path().join("static");
        fs::create_dir_all(static_dir.join("css")).unwrap();
        fs::write(static_dir.join("css").join("wiki.css"), "body {}").unwrap();

        let config = Config::with_custom(
            dir.path().join("data"),
            template_dir,
            static_dir,
            None,
            None,
        );
        let state = AppState::from_config(&config).unwrap();
        Self { dir, app: create_router(state) }
    }

    fn data_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("data")
    }

    async fn get(&self, uri: &str) -> Response {
        self.send("GET", uri, Body::empty(), None).await
    }

    async fn post_form(&self, uri: &str, form: &str) -> Response {
        self.send(
            "POST",
            uri,
            Body::from(form.to_string()),
            Some("application/x-www-form-urlencoded"),
        )
        .await
    }

    async fn send(&self, method: &str, uri: &str, body: Body, content_type: Option<&str>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        self.app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
    }
}

async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response.headers().get(header::LOCATION).unwrap().to_str().unwrap()
}

fn entries(dir: &Path) -> usize {
    fs::read_dir(dir).unwrap().count()
}

#[tokio::test]
async fn view_of_missing_page_redirects_to_edit() {
    let wiki = TestWiki::new();
    let response = wiki.get("/view/NoSuchPage").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/edit/NoSuchPage");
}

#[tokio::test]
async fn edit_of_missing_page_renders_empty_form() {
    let wiki = TestWiki::new();
    let response = wiki.get("/edit/NoSuchPage").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Editing NoSuchPage"));
    assert!(html.contains("action=\"/save/NoSuchPage\""));
    assert!(html.contains("cols=\"80\">\n</textarea>"));
}

#[tokio::test]
async fn save_then_view_renders_body_with_links() {
    let wiki = TestWiki::new();
    let response = wiki.post_form("/save/Alpha", "body=hello+see+%5BHome%5D").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/view/Alpha");
    assert_eq!(
        fs::read(wiki.data_dir().join("Alpha.txt")).unwrap(),
        b"hello see [Home]"
    );

    let response = wiki.get("/view/Alpha").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("hello see <a href=\"/view/Home\">Home</a>"));

    let html = body_string(wiki.get("/edit/Alpha").await).await;
    assert!(html.contains("cols=\"80\">\nhello see [Home]</textarea>"));
}

#[tokio::test]
async fn save_without_body_field_stores_empty_page() {
    let wiki = TestWiki::new();
    let response = wiki.post_form("/save/Blank", "").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(fs::read(wiki.data_dir().join("Blank.txt")).unwrap(), b"");
}

#[tokio::test]
async fn save_without_form_content_type_stores_empty_page() {
    let wiki = TestWiki::new();
    let response = wiki.send("POST", "/save/Alpha", Body::empty(), None).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/view/Alpha");
    assert_eq!(fs::read(wiki.data_dir().join("Alpha.txt")).unwrap(), b"");

    let response = wiki
        .send("POST", "/save/Beta", Body::from("body=ignored"), Some("text/plain"))
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(fs::read(wiki.data_dir().join("Beta.txt")).unwrap(), b"");
}

#[tokio::test]
async fn head_is_accepted_on_read_routes() {
    let wiki = TestWiki::new();
    wiki.post_form("/save/Home", "body=hi").await;

    let response = wiki.send("HEAD", "/view/Home", Body::empty(), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = wiki.send("HEAD", "/edit/Home", Body::empty(), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = wiki.send("HEAD", "/view/Missing", Body::empty(), None).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    let response = wiki.send("HEAD", "/save/Home", Body::empty(), None).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn leading_newline_survives_the_edit_form() {
    let wiki = TestWiki::new();
    wiki.post_form("/save/Alpha", "body=%0Ahello").await;
    let html = body_string(wiki.get("/edit/Alpha").await).await;
    assert!(html.contains("cols=\"80\">\n\nhello</textarea>"));
}

#[tokio::test]
async fn index_lists_pages_sorted_with_empty_state() {
    let wiki = TestWiki::new();
    let html = body_string(wiki.get("/").await).await;
    assert!(html.contains("No pages yet"));

    wiki.post_form("/save/Zeta", "body=z").await;
    wiki.post_form("/save/Alpha", "body=a").await;

    for path in ["/", "/index"] {
        let response = wiki.get(path).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        let alpha = html.find("<a href=\"/view/Alpha\">Alpha</a>").unwrap();
        let zeta = html.find("<a href=\"/view/Zeta\">Zeta</a>").unwrap();
        assert!(alpha < zeta);
        assert!(!html.contains("No pages yet"));
    }
}

#[tokio::test]
async fn malformed_routes_are_not_found_and_touch_nothing() {
    let wiki = TestWiki::new();
    for path in [
        "/view/../etc",
        "/delete/Home",
        "/view/",
        "/view/Home/",
        "/view/Home/extra",
        "/view/Front%20Page",
        "/nothing",
    ] {
        let response = wiki.get(path).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{path}");
        assert_eq!(body_string(response).await, "Not found");
    }

    let response = wiki.post_form("/save/..%2Fescape", "body=x").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = wiki.post_form("/save/a.b", "body=x").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(entries(&wiki.data_dir()), 0);
}

#[tokio::test]
async fn wrong_method_on_valid_route_is_rejected() {
    let wiki = TestWiki::new();
    let response = wiki.get("/save/Alpha").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let response = wiki.post_form("/view/Alpha", "body=x").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(entries(&wiki.data_dir()), 0);
}

#[tokio::test]
async fn storage_failure_is_a_server_error() {
    let wiki = TestWiki::new();
    fs::create_dir(wiki.data_dir().join("Broken.txt")).unwrap();

    let response = wiki.post_form("/save/Broken", "body=x").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_string(response).await.starts_with("I/O error"));

    let response = wiki.get("/view/Broken").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn render_failure_is_a_server_error_without_partial_output() {
    let wiki = TestWiki::with_templates(&[("view.html", "<h1>{{NAME}}</h1>{{AUTHOR}}")]);
    wiki.post_form("/save/Alpha", "body=hello").await;

    let response = wiki.get("/view/Alpha").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_string(response).await;
    assert!(body.starts_with("Template error"));
    assert!(!body.contains("<h1>"));
}

#[tokio::test]
async fn serves_static_assets_but_not_outside_files() {
    let wiki = TestWiki::new();
    let response = wiki.get("/static/css/wiki.css").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/css; charset=utf-8"
    );
    assert_eq!(body_string(response).await, "body {}");

    assert_eq!(wiki.get("/static/missing.css").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        wiki.get("/static/..%2Fdata%2FAlpha.txt").await.status(),
        StatusCode::NOT_FOUND
    );
}
