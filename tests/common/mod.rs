#![allow(dead_code)]

use fractal_music::config::{AppConfig, LocalStorage};
use fractal_music::server::{serve_on, AppState};
use fractal_music::Complex;
use std::path::Path;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub const STD_OFFSET: f64 = 1e-10;
pub const APPROX_OFFSET: f64 = 1e-5;

pub fn assert_close(actual: Complex, expected: Complex, eps: f64) {
    assert!(
        (actual.re - expected.re).abs() <= eps && (actual.im - expected.im).abs() <= eps,
        "expected {} to be within {} of {}",
        actual,
        eps,
        expected
    );
}

/// 在隨機埠啟動的測試服務
pub struct TestServer {
    pub base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<fractal_music::Result<()>>,
}

impl TestServer {
    pub async fn start(config: AppConfig, storage_root: &Path) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let state = AppState::with_storage(config, LocalStorage::new(storage_root));
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(serve_on(listener, state, async move {
            let _ = rx.await;
        }));

        Self {
            base_url: format!("http://{}", addr),
            shutdown: Some(tx),
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let result = (&mut self.handle).await.unwrap();
        assert!(result.is_ok());
    }
}

pub fn png_size(bytes: &[u8]) -> (u32, u32) {
    let decoder = png::Decoder::new(std::io::Cursor::new(bytes));
    let reader = decoder.read_info().unwrap();
    (reader.info().width, reader.info().height)
}
