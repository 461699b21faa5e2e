//! Mock HTTP origin shared by the engine and batch tests.
//!
//! Some sandboxes refuse to bind even loopback sockets, so the fixture
//! probes the capability once per process and turns every network-bound
//! test into a logged skip when binding is refused. Set
//! `FETCHKIT_STRICT_NET_TESTS=1` to make the probe fail the suite instead.

use std::sync::OnceLock;
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static LOOPBACK: OnceLock<bool> = OnceLock::new();

/// Whether this process may bind loopback sockets. Probed once, then cached
/// for the rest of the test run.
pub fn loopback_available() -> bool {
    *LOOPBACK.get_or_init(|| match std::net::TcpListener::bind(("127.0.0.1", 0)) {
        Ok(_) => true,
        Err(error) => {
            assert!(
                !strict_net_tests(),
                "loopback bind refused ({error}) while FETCHKIT_STRICT_NET_TESTS is set"
            );
            eprintln!(
                "skipping network-bound tests: loopback bind refused ({error}); \
                 set FETCHKIT_STRICT_NET_TESTS=1 to fail instead"
            );
            false
        }
    })
}

fn strict_net_tests() -> bool {
    std::env::var_os("FETCHKIT_STRICT_NET_TESTS").is_some_and(|value| value != "0")
}

/// One mock origin per test, with the mount patterns the suite needs.
pub struct MockHttp {
    server: MockServer,
}

impl MockHttp {
    /// Starts a mock origin, or `None` when the sandbox cannot bind sockets
    /// (the caller returns early, skipping the test).
    pub async fn try_start() -> Option<Self> {
        if !loopback_available() {
            return None;
        }
        Some(Self {
            server: MockServer::start().await,
        })
    }

    /// Absolute URL for `route` on this origin.
    pub fn url(&self, route: &str) -> String {
        format!("{}{route}", self.server.uri())
    }

    /// Serves `body` with a 200 at `route`.
    pub async fn serve_bytes(&self, route: &str, body: &[u8]) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
            .mount(&self.server)
            .await;
    }

    /// Serves a bare status code at `route`.
    pub async fn serve_status(&self, route: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Serves `body` at `route` after `delay`, for stream-open timeout tests.
    pub async fn serve_delayed(&self, route: &str, body: &[u8], delay: Duration) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(body.to_vec())
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// Serves `body` for every GET, regardless of path.
    pub async fn serve_all(&self, body: &[u8]) {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
            .mount(&self.server)
            .await;
    }
}
