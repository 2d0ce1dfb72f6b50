#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use rfc_tools::errors::FetchError;
use rfc_tools::fetch::{FetchRequest, HttpFetcher};
use rfc_tools::mcp::McpServer;
use rfc_tools::rfc::RfcClient;

/// In-memory `HttpFetcher` that replays queued responses and records
/// every request it receives.
#[derive(Default)]
pub struct StubFetcher {
    responses: Mutex<VecDeque<Result<String, FetchError>>>,
    requests: Mutex<Vec<FetchRequest>>,
}

impl StubFetcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_body(&self, body: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(body.into()));
    }

    pub fn push_error(&self, err: FetchError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpFetcher for StubFetcher {
    fn get(&self, request: &FetchRequest) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(FetchError::Network {
                    url: request.url.clone(),
                    message: "no stubbed response".to_string(),
                })
            })
    }
}

/// Builds a server wired to `stub`.
pub fn server_with(stub: &Arc<StubFetcher>) -> McpServer {
    let fetcher: Arc<dyn HttpFetcher> = stub.clone();
    McpServer::new(RfcClient::new(fetcher))
}
