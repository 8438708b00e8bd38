use crate::config::BackendConfig;
use axum::{
    extract::Request,
    middleware::{self, Next},
    Router,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tokio::net::TcpListener;

/// Throwaway HTTP backend bound to an ephemeral port, counting every request.
pub struct FakeBackend {
    pub config: BackendConfig,
    hits: Arc<AtomicUsize>,
}

impl FakeBackend {
    pub async fn start(router: Router) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let router = router.layer(middleware::from_fn(
            move |request: Request, next: Next| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    next.run(request).await
                }
            },
        ));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            config: backend_config(port),
            hits,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub fn backend_config(port: u16) -> BackendConfig {
    BackendConfig {
        host: "127.0.0.1".into(),
        port,
        api_prefix: "/api".into(),
        timeout_ms: 2_000,
        connect_timeout_ms: 1_000,
    }
}

/// Config pointing at a port nothing listens on.
pub async fn unreachable_config() -> BackendConfig {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    backend_config(port)
}
