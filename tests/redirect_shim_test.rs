use httpmock::prelude::*;
use tienda_kit::{shim, TomlConfig};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

struct RunningShim {
    base_url: String,
    stop: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<tienda_kit::Result<()>>,
}

impl RunningShim {
    async fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        let result = self.handle.await.unwrap();
        tokio_test::assert_ok!(result);
    }
}

/// Starts the shim on an ephemeral port, forwarding to `target_port` on 127.0.0.1.
async fn start_shim(target_port: u16, delay_ms: u64) -> RunningShim {
    let config = TomlConfig::from_toml_str(&format!(
        r#"
[server]
host = "127.0.0.1"
port = 5173

[target]
host = "127.0.0.1"
port = {target_port}

[callback]
delay_ms = {delay_ms}
"#
    ))
    .unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let router = shim::build_router(&config);

    let (stop, stopped) = oneshot::channel::<()>();
    let handle = tokio::spawn(shim::serve(listener, router, async move {
        let _ = stopped.await;
    }));

    RunningShim {
        base_url,
        stop: Some(stop),
        handle,
    }
}

fn no_redirect_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_payment_callback_serves_delayed_redirect_page() {
    let shim = start_shim(5174, 1500).await;

    let response = no_redirect_client()
        .get(format!(
            "{}/pago/resultado?estado=exito&orden=ABC123",
            shim.base_url
        ))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let body = response.text().await.unwrap();
    assert!(body.contains(
        r#"window.location.replace("http://127.0.0.1:5174/pago/resultado?estado=exito&orden=ABC123");"#
    ));
    assert!(body.contains("}, 1500);"));

    shim.shutdown().await;
}

#[tokio::test]
async fn test_other_paths_answer_302_with_swapped_origin() {
    let shim = start_shim(5174, 1500).await;

    let response = no_redirect_client()
        .get(format!("{}/unrelated/path?x=1", shim.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::FOUND);
    assert_eq!(
        response.headers()["location"],
        "http://127.0.0.1:5174/unrelated/path?x=1"
    );

    shim.shutdown().await;
}

#[tokio::test]
async fn test_browser_lands_on_running_app() {
    // The mock server plays the storefront dev server.
    let app = MockServer::start_async().await;
    let page_mock = app
        .mock_async(|when, then| {
            when.method(GET)
                .path("/productos")
                .query_param("categoria", "3")
                .query_param("orden", "precio");
            then.status(200).body("catalogo");
        })
        .await;

    let shim = start_shim(app.port(), 0).await;

    let response = reqwest::get(format!(
        "{}/productos?categoria=3&orden=precio",
        shim.base_url
    ))
    .await
    .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "catalogo");
    page_mock.assert_async().await;

    shim.shutdown().await;
}

#[tokio::test]
async fn test_unreachable_target_is_not_the_shims_problem() {
    // Nothing listens on the target; the shim still answers without contacting it.
    let unused = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_port = unused.local_addr().unwrap().port();
    drop(unused);

    let shim = start_shim(dead_port, 1500).await;

    let response = no_redirect_client()
        .get(format!("{}/pago/resultado?estado=fallido", shim.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let response = no_redirect_client()
        .get(format!("{}/carrito", shim.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::FOUND);
    assert_eq!(
        response.headers()["location"],
        format!("http://127.0.0.1:{}/carrito", dead_port).as_str()
    );

    shim.shutdown().await;
}
