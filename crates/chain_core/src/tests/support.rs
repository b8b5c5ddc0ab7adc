//! Scriptable single-endpoint JSON-RPC node for exercising the client core
//! over real HTTP.

use std::{net::SocketAddr, sync::Arc};

use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Default)]
pub struct MockChain {
    pub client_version: Option<String>,
    pub accounts: Vec<Value>,
    pub request_accounts_error: Option<(i64, String)>,
    pub send_transaction_result: Option<Value>,
    pub send_transaction_error: Option<(i64, String)>,
    /// Drained front-first, one entry per `eth_getTransactionReceipt` call;
    /// exhausted entries answer null (still pending).
    pub receipts: Vec<Value>,
    pub block_number: u64,
    /// Drained on the first `eth_getLogs` call.
    pub logs: Vec<Value>,
    pub recorded: Vec<(String, Value)>,
}

pub struct MockNode {
    addr: SocketAddr,
    pub chain: Arc<Mutex<MockChain>>,
}

impl MockNode {
    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn recorded_calls(&self, method: &str) -> Vec<Value> {
        self.chain
            .lock()
            .await
            .recorded
            .iter()
            .filter(|(name, _)| name == method)
            .map(|(_, params)| params.clone())
            .collect()
    }
}

pub async fn spawn_mock_node(chain: MockChain) -> MockNode {
    let chain = Arc::new(Mutex::new(chain));
    let app = Router::new()
        .route("/", post(handle))
        .with_state(chain.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock node");
    let addr = listener.local_addr().expect("mock node addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock node");
    });

    MockNode { addr, chain }
}

fn ok(id: Value, result: Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "result": result })
}

fn err(id: Value, code: i64, message: &str) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "error": { "code": code, "message": message } })
}

async fn handle(
    State(chain): State<Arc<Mutex<MockChain>>>,
    Json(request): Json<Value>,
) -> Json<Value> {
    let method = request["method"].as_str().unwrap_or_default().to_string();
    let params = request["params"].clone();
    let id = request["id"].clone();

    let mut chain = chain.lock().await;
    chain.recorded.push((method.clone(), params));

    let body = match method.as_str() {
        "web3_clientVersion" => match &chain.client_version {
            Some(version) => ok(id, json!(version)),
            None => err(id, -32601, "method not found"),
        },
        "eth_accounts" => ok(id, json!(chain.accounts)),
        "eth_requestAccounts" => match &chain.request_accounts_error {
            Some((code, message)) => err(id, *code, message),
            None => ok(id, json!(chain.accounts)),
        },
        "eth_sendTransaction" => match (&chain.send_transaction_error, &chain.send_transaction_result) {
            (Some((code, message)), _) => err(id, *code, message),
            (None, Some(result)) => ok(id, result.clone()),
            (None, None) => err(id, -32000, "unscripted transaction"),
        },
        "eth_getTransactionReceipt" => {
            if chain.receipts.is_empty() {
                ok(id, Value::Null)
            } else {
                let receipt = chain.receipts.remove(0);
                ok(id, receipt)
            }
        }
        "eth_blockNumber" => ok(id, json!(format!("0x{:x}", chain.block_number))),
        "eth_getLogs" => {
            let logs: Vec<Value> = chain.logs.drain(..).collect();
            ok(id, Value::Array(logs))
        }
        _ => err(id, -32601, "method not found"),
    };

    Json(body)
}
