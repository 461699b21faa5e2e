//! Mock HTTP origin for the end-to-end suite.
//!
//! Same probe-once discipline as the library's internal fixture: sandboxes
//! that refuse loopback binds turn network-bound tests into logged skips,
//! and `FETCHKIT_STRICT_NET_TESTS=1` turns those skips into failures. The
//! raw-TCP truncating server in the e2e tests checks [`loopback_available`]
//! directly before binding its own listener.

use std::sync::OnceLock;

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

/// One mock origin per test.
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
}
