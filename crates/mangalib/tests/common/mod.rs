#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::{Path, Query, State},
    http::{HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use mangalib::{infrastructure::config::Config, presentation::ServerBuilder};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const RAPIDAPI_KEY: &str = "rapid-test-key";
pub const TRANSLATE_KEY: &str = "translate-test-key";

/// Stand-in for every upstream, counting the calls each one receives.
#[derive(Default)]
pub struct FakeUpstream {
    pub mangadex_fail: AtomicBool,
    pub jikan_fail: AtomicBool,
    pub anilist_fail: AtomicBool,
    pub mangadex_hits: AtomicUsize,
    pub jikan_hits: AtomicUsize,
    pub anilist_hits: AtomicUsize,
    pub translate_hits: AtomicUsize,
    pub rapidapi_hits: AtomicUsize,
    pub mangadex_offsets: Mutex<Vec<String>>,
}

impl FakeUpstream {
    pub fn fail_mangadex(&self) {
        self.mangadex_fail.store(true, Ordering::SeqCst);
    }

    pub fn fail_jikan(&self) {
        self.jikan_fail.store(true, Ordering::SeqCst);
    }

    pub fn fail_anilist(&self) {
        self.anilist_fail.store(true, Ordering::SeqCst);
    }

    pub fn hits(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

type Fake = State<Arc<FakeUpstream>>;

fn unavailable() -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, "upstream is down").into_response()
}

fn mangadex_manga(id: &str, cover_id: Option<&str>) -> Value {
    let relationships = match cover_id {
        Some(cover_id) => json!([{ "id": cover_id, "type": "cover_art" }]),
        None => json!([{ "id": "a1", "type": "author" }]),
    };

    json!({
        "id": id,
        "type": "manga",
        "attributes": {
            "title": { "ja-ro": format!("{id} romaji"), "en": format!("{id} english") },
            "description": { "en": "A story" },
            "tags": [{ "id": "t1", "attributes": { "name": { "en": "Action" } } }],
            "latestUploadedChapter": null,
        },
        "relationships": relationships,
    })
}

async fn mangadex_list(
    State(fake): Fake,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    fake.mangadex_hits.fetch_add(1, Ordering::SeqCst);
    fake.mangadex_offsets
        .lock()
        .unwrap()
        .push(params.get("offset").cloned().unwrap_or_default());
    if fake.mangadex_fail.load(Ordering::SeqCst) {
        return unavailable();
    }

    Json(json!({
        "result": "ok",
        "data": [mangadex_manga("m1", Some("c1")), mangadex_manga("m2", None)],
        "total": 2,
    }))
    .into_response()
}

async fn mangadex_manga_by_id(State(fake): Fake, Path(id): Path<String>) -> Response {
    fake.mangadex_hits.fetch_add(1, Ordering::SeqCst);
    if id != "m1" {
        return (StatusCode::NOT_FOUND, "not found").into_response();
    }

    Json(json!({ "data": mangadex_manga("m1", Some("c1")) })).into_response()
}

async fn mangadex_cover(State(fake): Fake, Path(id): Path<String>) -> Response {
    fake.mangadex_hits.fetch_add(1, Ordering::SeqCst);

    Json(json!({ "data": { "id": id, "attributes": { "fileName": "cover.jpg" } } })).into_response()
}

async fn mangadex_chapters(
    State(fake): Fake,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    fake.mangadex_hits.fetch_add(1, Ordering::SeqCst);
    let manga = params.get("manga").cloned().unwrap_or_default();
    let limit: usize = params
        .get("limit")
        .and_then(|limit| limit.parse().ok())
        .unwrap_or(100);

    let chapters = if manga == "empty" {
        vec![]
    } else {
        vec![
            json!({ "id": "ch1", "attributes": { "chapter": "1", "title": "Start", "translatedLanguage": "en", "pages": 2 } }),
            json!({ "id": "ch1-dup", "attributes": { "chapter": "1", "translatedLanguage": "en" } }),
            json!({ "id": "ch-extra", "attributes": { "chapter": null, "translatedLanguage": "en" } }),
            json!({ "id": "ch2", "attributes": { "chapter": "2", "translatedLanguage": "en" } }),
        ]
    };
    let data: Vec<Value> = chapters.into_iter().take(limit).collect();

    Json(json!({ "data": data, "total": data.len() })).into_response()
}

async fn mangadex_at_home(State(fake): Fake, Path(id): Path<String>) -> Response {
    fake.mangadex_hits.fetch_add(1, Ordering::SeqCst);

    Json(json!({
        "result": "ok",
        "baseUrl": "https://cdn.test",
        "chapter": { "hash": format!("hash-{id}"), "data": ["1.png", "2.png"], "dataSaver": [] },
    }))
    .into_response()
}

async fn jikan_list(State(fake): Fake) -> Response {
    fake.jikan_hits.fetch_add(1, Ordering::SeqCst);
    if fake.jikan_fail.load(Ordering::SeqCst) {
        return unavailable();
    }

    Json(json!({
        "data": [
            { "mal_id": 2, "title": "Berserk", "title_english": null, "images": { "jpg": { "image_url": "https://jikan.test/2.jpg" } } },
            { "mal_id": 3, "title": null, "synopsis": "" },
        ]
    }))
    .into_response()
}

async fn jikan_manga(State(fake): Fake, Path(id): Path<i64>) -> Response {
    fake.jikan_hits.fetch_add(1, Ordering::SeqCst);

    Json(json!({
        "data": { "mal_id": id, "title": "Monster", "genres": [{ "mal_id": 1, "name": "Mystery" }] }
    }))
    .into_response()
}

async fn anilist(State(fake): Fake, Json(body): Json<Value>) -> Response {
    fake.anilist_hits.fetch_add(1, Ordering::SeqCst);
    if fake.anilist_fail.load(Ordering::SeqCst) {
        return unavailable();
    }

    let query = body["query"].as_str().unwrap_or_default();
    if query.contains("Page(") {
        return Json(json!({
            "data": { "Page": { "media": [
                { "id": 30013, "title": { "english": null, "romaji": "One Piece" }, "coverImage": { "large": "https://anilist.test/1.jpg" }, "genres": ["Adventure"] }
            ] } }
        }))
        .into_response();
    }

    match body["variables"]["id"].as_i64() {
        Some(30013) => Json(json!({
            "data": { "Media": { "id": 30013, "title": { "native": "ワンピース" }, "genres": ["Adventure"] } }
        }))
        .into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "data": { "Media": null }, "errors": [{ "message": "Not Found." }] })),
        )
            .into_response(),
    }
}

async fn translate(
    State(fake): Fake,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    fake.translate_hits.fetch_add(1, Ordering::SeqCst);
    if params.get("key").map(String::as_str) != Some(TRANSLATE_KEY) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": { "code": 403, "message": "bad key" } })),
        )
            .into_response();
    }

    let target = body["target"].as_str().unwrap_or_default();
    let text = body["q"].as_str().unwrap_or_default();
    match target {
        "xx" => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "code": 400, "message": "Invalid Value" } })),
        )
            .into_response(),
        "empty" => Json(json!({ "data": { "translations": [] } })).into_response(),
        _ => Json(json!({
            "data": { "translations": [{ "translatedText": format!("[{target}] {text}") }] }
        }))
        .into_response(),
    }
}

fn rapidapi_authorized(fake: &FakeUpstream, headers: &HeaderMap) -> bool {
    fake.rapidapi_hits.fetch_add(1, Ordering::SeqCst);

    headers.get("x-rapidapi-key").and_then(|v| v.to_str().ok()) == Some(RAPIDAPI_KEY)
        && headers.contains_key("x-rapidapi-host")
}

async fn mangaverse(
    State(fake): Fake,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !rapidapi_authorized(&fake, &headers) {
        return (StatusCode::FORBIDDEN, "forbidden").into_response();
    }
    if params.get("genres").map(String::as_str) == Some("Broken") {
        return (StatusCode::TOO_MANY_REQUESTS, "quota exceeded").into_response();
    }

    Json(json!({ "echo": params })).into_response()
}

async fn genres(State(fake): Fake, headers: HeaderMap) -> Response {
    if !rapidapi_authorized(&fake, &headers) {
        return (StatusCode::FORBIDDEN, "forbidden").into_response();
    }

    Json(json!([{ "mal_id": 1, "name": "Action" }])).into_response()
}

pub async fn spawn_upstream() -> (SocketAddr, Arc<FakeUpstream>) {
    let fake = Arc::new(FakeUpstream::default());
    let router = Router::new()
        .route("/mangadex/manga", get(mangadex_list))
        .route("/mangadex/manga/{id}", get(mangadex_manga_by_id))
        .route("/mangadex/cover/{id}", get(mangadex_cover))
        .route("/mangadex/chapter", get(mangadex_chapters))
        .route("/mangadex/at-home/server/{id}", get(mangadex_at_home))
        .route("/jikan/manga", get(jikan_list))
        .route("/jikan/manga/{id}", get(jikan_manga))
        .route("/anilist", post(anilist))
        .route("/translate", post(translate))
        .route("/mangaverse/manga/fetch", get(mangaverse))
        .route("/myanimelist/v2/manga/genres", get(genres))
        .with_state(fake.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (addr, fake)
}

pub fn config(addr: SocketAddr, with_keys: bool) -> Config {
    let base = format!("http://{addr}");
    let mut config = Config::default();
    config.upstream.mangadex_api = format!("{base}/mangadex");
    config.upstream.mangadex_uploads = "https://uploads.test".to_string();
    config.upstream.jikan_api = format!("{base}/jikan");
    config.upstream.anilist_api = format!("{base}/anilist");
    config.upstream.translate_api = format!("{base}/translate");
    config.upstream.mangaverse_api = format!("{base}/mangaverse");
    config.upstream.myanimelist_api = format!("{base}/myanimelist");
    config.upstream.animedb_api = format!("{base}/animedb");
    config.request_timeout = 5;
    if with_keys {
        config.rapidapi_key = Some(RAPIDAPI_KEY.to_string());
        config.google_translate_api_key = Some(TRANSLATE_KEY.to_string());
    }

    config
}

pub struct TestApp {
    pub router: Router,
    pub upstream: Arc<FakeUpstream>,
}

pub async fn app(with_keys: bool) -> TestApp {
    let (addr, upstream) = spawn_upstream().await;
    let router = ServerBuilder::from_config(&config(addr, with_keys))
        .unwrap()
        .build()
        .unwrap()
        .router();

    TestApp { router, upstream }
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let res = self.router.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn send_json(&self, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}
