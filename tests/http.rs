use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Activity {
    id: String,
    #[serde(rename = "type")]
    activity_type: String,
    distance: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Stats {
    total_activities: usize,
    total_distance: f64,
}

#[derive(Debug, Deserialize)]
struct Session {
    view: String,
    errors: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct ValidationBody {
    fields: BTreeMap<String, String>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/session")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_fit_track"))
        .env("PORT", port.to_string())
        .env_remove("FIT_TRACK_SEED_PATH")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn reset(client: &Client, server: &TestServer) {
    let response = client
        .post(format!("{}/api/session/reset", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
}

async fn activities(client: &Client, server: &TestServer) -> Vec<Activity> {
    client
        .get(format!("{}/api/activities", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_create_activity_appends_and_updates_stats() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    reset(&client, &server).await;

    let before = activities(&client, &server).await;
    assert_eq!(before.len(), 5);

    let response = client
        .post(format!("{}/api/activities", server.base_url))
        .json(&serde_json::json!({
            "type": "cycling",
            "date": "2025-03-25",
            "duration": 60,
            "distance": 25,
            "calories": 500,
            "avgSpeed": 25,
            "elevationGain": 90,
            "notes": "Evening loop"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Activity = response.json().await.unwrap();
    assert_eq!(created.activity_type, "cycling");
    assert_eq!(created.distance, 25.0);

    let after = activities(&client, &server).await;
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(after.last().map(|a| a.id.as_str()), Some(created.id.as_str()));

    let stats: Stats = client
        .get(format!("{}/api/stats", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats.total_activities, 6);
    assert_eq!(stats.total_distance, 117.5);

    let session: Session = client
        .get(format!("{}/api/session", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(session.view, "activities");
    assert!(session.errors.is_empty());
}

#[tokio::test]
async fn http_invalid_activity_is_rejected() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    reset(&client, &server).await;

    let response = client
        .put(format!("{}/api/session/view", server.base_url))
        .json(&serde_json::json!({ "view": "addActivity" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let response = client
        .post(format!("{}/api/activities", server.base_url))
        .json(&serde_json::json!({
            "type": "running",
            "duration": 30,
            "distance": 0,
            "calories": 250,
            "avgSpeed": 10
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ValidationBody = response.json().await.unwrap();
    assert_eq!(body.fields.len(), 2);
    assert_eq!(body.fields["date"], "Date is required");
    assert_eq!(body.fields["distance"], "Distance must be greater than 0");

    assert_eq!(activities(&client, &server).await.len(), 5);

    let session: Session = client
        .get(format!("{}/api/session", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(session.view, "addActivity");
    assert_eq!(session.errors, body.fields);
}

#[tokio::test]
async fn http_pace_endpoint() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    for (duration, distance, expected) in [(45.0, 7.5, "6:00"), (0.0, 5.0, "0:00"), (30.0, 0.0, "0:00")] {
        let body: serde_json::Value = client
            .get(format!(
                "{}/api/pace?duration={duration}&distance={distance}",
                server.base_url
            ))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["pace"], expected);
    }
}
