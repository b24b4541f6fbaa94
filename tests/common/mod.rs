//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, TxHash};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use grc20_publisher::blockchain::{BlockchainError, BlockchainResult, ChainRpc, ReceiptSummary};
use grc20_publisher::config::{ApiConfig, IpfsConfig};

pub const TEST_PRIVATE_KEY: &str =
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// A request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// A mock HTTP backend and everything it has received.
pub struct MockBackend {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockBackend {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.url(),
            request_timeout_secs: 5,
        }
    }

    pub fn ipfs_config(&self) -> IpfsConfig {
        IpfsConfig {
            api_url: self.url(),
            request_timeout_secs: 5,
        }
    }
}

/// Start a programmable mock backend on an ephemeral port.
///
/// `f` maps each request to a status code and body.
pub async fn start_programmable_backend<F>(f: F) -> MockBackend
where
    F: Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let recorded = requests.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let f = f.clone();
                    let recorded = recorded.clone();
                    tokio::spawn(async move {
                        let (read, mut write) = socket.into_split();
                        let Some(request) = read_request(BufReader::new(read)).await else {
                            return;
                        };
                        let (status, body) = f(&request);
                        recorded.lock().unwrap().push(request);

                        let status_text = match status {
                            200 => "200 OK",
                            400 => "400 Bad Request",
                            404 => "404 Not Found",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = write.write_all(response_str.as_bytes()).await;
                        let _ = write.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockBackend { addr, requests }
}

/// Start a mock backend that always answers `status` with `body`.
pub async fn start_mock_backend(status: u16, body: &'static str) -> MockBackend {
    start_programmable_backend(move |_| (status, body.to_string())).await
}

async fn read_request<R>(mut reader: BufReader<R>) -> Option<RecordedRequest>
where
    R: tokio::io::AsyncRead + Unpin,
{
    let mut line = String::new();
    reader.read_line(&mut line).await.ok()?;
    let mut parts = line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        reader.read_line(&mut header).await.ok()?;
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().ok()?;
            }
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).await.ok()?;

    Some(RecordedRequest {
        method,
        path,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

/// In-process chain that mines every broadcast transaction immediately,
/// or rejects every broadcast when built with `rejecting_broadcasts`.
#[derive(Clone)]
pub struct FakeChain {
    pub success: bool,
    pub receipt_block: u64,
    reject_broadcasts: bool,
    calls: Arc<AtomicU32>,
    broadcasts: Arc<AtomicU32>,
    receipt_polls: Arc<AtomicU32>,
    head: Arc<AtomicU64>,
}

impl FakeChain {
    pub fn new(success: bool) -> Self {
        Self {
            success,
            receipt_block: 1_234,
            reject_broadcasts: false,
            calls: Arc::new(AtomicU32::new(0)),
            broadcasts: Arc::new(AtomicU32::new(0)),
            receipt_polls: Arc::new(AtomicU32::new(0)),
            head: Arc::new(AtomicU64::new(1_234)),
        }
    }

    pub fn rejecting_broadcasts() -> Self {
        Self {
            reject_broadcasts: true,
            ..Self::new(true)
        }
    }

    /// Total RPC calls made against this chain.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn broadcasts(&self) -> u32 {
        self.broadcasts.load(Ordering::SeqCst)
    }

    pub fn receipt_polls(&self) -> u32 {
        self.receipt_polls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl ChainRpc for FakeChain {
    async fn gas_price(&self) -> BlockchainResult<u128> {
        self.hit();
        Ok(1_000_000_000)
    }

    async fn transaction_count(&self, _address: Address) -> BlockchainResult<u64> {
        self.hit();
        Ok(0)
    }

    async fn block_number(&self) -> BlockchainResult<u64> {
        self.hit();
        Ok(self.head.load(Ordering::SeqCst))
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> BlockchainResult<TxHash> {
        self.hit();
        self.broadcasts.fetch_add(1, Ordering::SeqCst);
        if self.reject_broadcasts {
            return Err(BlockchainError::Rpc("broadcast failed: nonce too low".to_string()));
        }
        Ok(alloy::primitives::keccak256(raw))
    }

    async fn transaction_receipt(&self, tx_hash: TxHash) -> BlockchainResult<Option<ReceiptSummary>> {
        self.hit();
        self.receipt_polls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(ReceiptSummary {
            tx_hash,
            block_number: Some(self.receipt_block),
            success: self.success,
            gas_used: 48_000,
        }))
    }
}
