use std::{fmt, net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    body::Body,
    http::{Method, Request},
    Router,
};
use cucumber::{given, then, when, World as _};
use hikelog::{
    config::AppConfig, models::RecordId, routes::create_router, state::AppState,
    store::SqliteStore,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

#[derive(Debug, cucumber::World, Default)]
struct AppWorld {
    state: Option<TestState>,
    status: Option<u16>,
    body: Value,
    last_created: Option<Value>,
}

impl AppWorld {
    fn last_created_id(&self) -> String {
        self.last_created
            .as_ref()
            .and_then(|record| record["_id"].as_str())
            .expect("a record must have been created first")
            .to_owned()
    }

    async fn send(&mut self, method: Method, uri: &str, body: Option<Value>) {
        let app = self
            .state
            .as_ref()
            .expect("state must be initialised first")
            .app
            .clone();
        let body = body
            .map(|value| Body::from(value.to_string()))
            .unwrap_or_else(Body::empty);
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(body)
            .expect("request");
        let response = app.oneshot(request).await.expect("router is infallible");
        self.status = Some(response.status().as_u16());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body");
        self.body = serde_json::from_slice(&bytes).expect("json response");
    }

    async fn create(&mut self, uri: &str, record: Value) {
        self.send(Method::POST, uri, Some(record)).await;
        self.last_created = Some(self.body.clone());
    }
}

struct TestState {
    app: Router,
    _root: TempDir,
}

impl fmt::Debug for TestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestState").finish()
    }
}

impl TestState {
    async fn new() -> anyhow::Result<Self> {
        let root = TempDir::new().context("create temp dir for bdd world")?;
        let db_path = root.path().join("bdd.sqlite");
        let database_url = format!("sqlite://{}", db_path.to_string_lossy());

        let config = AppConfig {
            database_url: database_url.clone(),
            database_name: "mobile-app".into(),
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            store_timeout: Duration::from_secs(10),
        };

        let store = SqliteStore::connect(&config.database_url).await?;
        let app = create_router(AppState::new(config, Arc::new(store)));
        Ok(Self { app, _root: root })
    }
}

fn hiking_trip(name: &str, location: &str, difficulty: i64) -> Value {
    json!({
        "name": name,
        "location": location,
        "date": "2024-05-01",
        "parking": true,
        "length": "5km",
        "difficulty": difficulty,
        "description": "Scenic",
    })
}

#[given("a fresh application state")]
async fn given_fresh_state(world: &mut AppWorld) {
    world.state = Some(TestState::new().await.expect("state"));
    world.status = None;
    world.body = Value::Null;
    world.last_created = None;
}

#[given(regex = r#"^a hiking trip "([^"]+)" exists$"#)]
async fn given_hiking_trip(world: &mut AppWorld, name: String) {
    world
        .create("/hiking", hiking_trip(&name, "North Valley", 3))
        .await;
    assert_eq!(world.status, Some(200));
}

#[when(regex = r#"^I create the hiking trip "([^"]+)" at "([^"]+)" with difficulty (\d+)$"#)]
async fn when_create_hiking(world: &mut AppWorld, name: String, location: String, difficulty: i64) {
    world
        .create("/hiking", hiking_trip(&name, &location, difficulty))
        .await;
}

#[when("I fetch the last created hiking trip")]
async fn when_fetch_last(world: &mut AppWorld) {
    let id = world.last_created_id();
    world.send(Method::GET, &format!("/hiking/{id}"), None).await;
}

#[when(regex = r#"^I fetch the hiking trip "([^"]*)"$"#)]
async fn when_fetch_hiking(world: &mut AppWorld, id: String) {
    world.send(Method::GET, &format!("/hiking/{id}"), None).await;
}

#[when(regex = r#"^I update the last created hiking trip with a foreign body id and name "([^"]+)"$"#)]
async fn when_update_last(world: &mut AppWorld, name: String) {
    let id = world.last_created_id();
    let mut body = hiking_trip(&name, "North Valley", 4);
    body["_id"] = json!(RecordId::new().to_hex());
    world
        .send(Method::PATCH, &format!("/hiking/{id}"), Some(body))
        .await;
}

#[when("I delete the last created hiking trip")]
async fn when_delete_last(world: &mut AppWorld) {
    let id = world.last_created_id();
    world.send(Method::DELETE, &format!("/hiking/{id}"), None).await;
}

#[when(regex = r#"^I delete the observation "([^"]*)"$"#)]
async fn when_delete_observation(world: &mut AppWorld, id: String) {
    world
        .send(Method::DELETE, &format!("/observation/{id}"), None)
        .await;
}

#[when(regex = r#"^I record the observation "([^"]+)" for the last created hiking trip$"#)]
async fn when_record_observation(world: &mut AppWorld, name: String) {
    let hiking_id = world.last_created_id();
    let observation = json!({
        "hiking_id": hiking_id,
        "name": name,
        "comment": "near the ridge",
        "time": "07:40",
    });
    world.create("/observation", observation).await;
}

#[when(regex = r#"^I list "([^"]+)"$"#)]
async fn when_list(world: &mut AppWorld, collection: String) {
    world
        .send(Method::GET, &format!("/{collection}"), None)
        .await;
}

#[then(regex = r"^the response status is (\d+)$")]
async fn then_status(world: &mut AppWorld, expected: u16) {
    assert_eq!(world.status, Some(expected), "body: {}", world.body);
}

#[then("the response has a generated id")]
async fn then_generated_id(world: &mut AppWorld) {
    let id = world.body["_id"].as_str().expect("id in response");
    assert!(id.parse::<RecordId>().is_ok(), "{id} is not a record id");
}

#[then("the response matches the last created record")]
async fn then_matches_created(world: &mut AppWorld) {
    assert_eq!(Some(&world.body), world.last_created.as_ref());
}

#[then("the response id is the last created id")]
async fn then_id_is_path_id(world: &mut AppWorld) {
    let expected = world.last_created_id();
    assert_eq!(world.body["_id"], json!(expected));
}

#[then(regex = r#"^the response field "([^"]+)" is "([^"]*)"$"#)]
async fn then_field_is(world: &mut AppWorld, field: String, expected: String) {
    assert_eq!(world.body[field.as_str()], json!(expected));
}

#[then("the response carries an error message")]
async fn then_error_message(world: &mut AppWorld) {
    assert!(world.body["error"].is_string(), "body: {}", world.body);
}

#[then(regex = r"^the response lists (\d+) records$")]
async fn then_lists(world: &mut AppWorld, expected: usize) {
    let items = world.body.as_array().expect("list response");
    assert_eq!(items.len(), expected);
}

#[tokio::main]
async fn main() {
    AppWorld::cucumber()
        .fail_on_skipped()
        .with_default_cli()
        .run("tests/features")
        .await;
}
