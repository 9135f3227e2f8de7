use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    binary::{write_var_bytes, write_var_uint},
    error::{OntIdError, Result},
};

/// Native contract holding the ONT ID registry.
const ONTID_CONTRACT: [u8; 20] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x03,
];

/// Read-only registry query returning a serialized DDO.
const GET_DDO_METHOD: &[u8] = b"getDDO";

/// Interop service name native invocations are routed through.
const NATIVE_INVOKE_NAME: &[u8] = b"Ontology.Native.Invoke";

/// Transaction type byte for contract invocations.
const TX_TYPE_INVOKE: u8 = 0xD1;

/// Trailing `sendrawtransaction` parameter requesting pre-execution.
const PRE_EXEC: u8 = 1;

// NeoVM opcodes used by the query script.
const OP_PUSH0: u8 = 0x00;
const OP_PUSHDATA1: u8 = 0x4C;
const OP_PUSHDATA2: u8 = 0x4D;
const OP_PUSHDATA4: u8 = 0x4E;
const OP_SYSCALL: u8 = 0x68;
const OP_DUPFROMALTSTACK: u8 = 0x6A;
const OP_TOALTSTACK: u8 = 0x6B;
const OP_FROMALTSTACK: u8 = 0x6C;
const OP_SWAP: u8 = 0x7C;
const OP_NEWSTRUCT: u8 = 0xC6;
const OP_APPEND: u8 = 0xC8;

/// Where raw DDOs come from. The server mocks this in tests.
#[async_trait]
pub trait DdoLookup: Send + Sync {
    /// Fetch the serialized DDO registered for `ont_id`, or `None` when
    /// the ledger has no record of it.
    async fn lookup_ddo(&self, ont_id: &str) -> Result<Option<Vec<u8>>>;
}

/// JSON-RPC client for an Ontology node.
pub struct LedgerClient {
    http: reqwest::Client,
    rpc_url: String,
}

impl LedgerClient {
    /// Create a client pointing at the given node RPC endpoint.
    pub fn new(rpc_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::builder().timeout(timeout).build()?,
            rpc_url: rpc_url.to_string(),
        })
    }
}

#[async_trait]
impl DdoLookup for LedgerClient {
    async fn lookup_ddo(&self, ont_id: &str) -> Result<Option<Vec<u8>>> {
        let tx = build_get_ddo_tx(ont_id);
        debug!(%ont_id, "querying ledger for DDO");
        let response: RpcResponse = self
            .http
            .post(&self.rpc_url)
            .json(&RpcRequest {
                jsonrpc: "2.0",
                id: 1,
                method: "sendrawtransaction",
                params: (hex::encode(tx), PRE_EXEC),
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        extract_ddo(response)
    }
}

#[derive(Serialize)]
struct RpcRequest {
    jsonrpc: &'static str,
    id: u32,
    method: &'static str,
    params: (String, u8),
}

#[derive(Deserialize)]
struct RpcResponse {
    error: i64,
    #[serde(default)]
    desc: String,
    #[serde(default)]
    result: Option<PreExecResult>,
}

#[derive(Deserialize)]
struct PreExecResult {
    /// 1 when the script evaluated successfully.
    #[serde(rename = "State", default)]
    state: i64,
    /// Hex of the serialized DDO; empty when the id is unregistered.
    #[serde(rename = "Result", default)]
    result: String,
}

/// Pre-execution state reported for a successful evaluation.
const STATE_OK: i64 = 1;

fn extract_ddo(response: RpcResponse) -> Result<Option<Vec<u8>>> {
    if response.error != 0 {
        return Err(OntIdError::Rpc {
            code: response.error,
            message: response.desc,
        });
    }
    // `error: 0` still requires a result whose State says the script ran;
    // anything else is a node-side failure, not an unregistered id.
    let result = response.result.ok_or_else(|| OntIdError::Rpc {
        code: 0,
        message: "pre-execution returned no result".to_string(),
    })?;
    if result.state != STATE_OK {
        return Err(OntIdError::Rpc {
            code: result.state,
            message: format!("pre-execution failed with state {}", result.state),
        });
    }
    if result.result.is_empty() {
        return Ok(None);
    }
    Ok(Some(hex::decode(result.result)?))
}

/// Serialize the unsigned transaction that pre-executes `getDDO(ont_id)`.
///
/// Pre-execution evaluates the script on the receiving node without
/// touching consensus, so nonce, fees, payer and signatures all stay zero.
pub fn build_get_ddo_tx(ont_id: &str) -> Vec<u8> {
    let invoke_code = build_get_ddo_invoke_code(ont_id);
    let mut tx = Vec::with_capacity(invoke_code.len() + 48);
    tx.push(0x00); // version
    tx.push(TX_TYPE_INVOKE);
    tx.extend_from_slice(&0_u32.to_le_bytes()); // nonce
    tx.extend_from_slice(&0_u64.to_le_bytes()); // gas price
    tx.extend_from_slice(&0_u64.to_le_bytes()); // gas limit
    tx.extend_from_slice(&[0_u8; 20]); // payer
    write_var_bytes(&mut tx, &invoke_code);
    write_var_uint(&mut tx, 0); // attributes
    write_var_uint(&mut tx, 0); // signatures
    tx
}

/// NeoVM script: wrap the ONT ID in a struct argument, then route the
/// `getDDO` call through the native invoke interop.
fn build_get_ddo_invoke_code(ont_id: &str) -> Vec<u8> {
    let mut code = Vec::new();
    code.push(OP_PUSH0);
    code.push(OP_NEWSTRUCT);
    code.push(OP_TOALTSTACK);
    push_bytes(&mut code, ont_id.as_bytes());
    code.push(OP_DUPFROMALTSTACK);
    code.push(OP_SWAP);
    code.push(OP_APPEND);
    code.push(OP_FROMALTSTACK);
    push_bytes(&mut code, GET_DDO_METHOD);
    push_bytes(&mut code, &ONTID_CONTRACT);
    code.push(OP_PUSH0); // contract version 0
    code.push(OP_SYSCALL);
    push_bytes(&mut code, NATIVE_INVOKE_NAME);
    code
}

/// Minimal-width NeoVM data push.
fn push_bytes(code: &mut Vec<u8>, bytes: &[u8]) {
    let len = bytes.len();
    if len < OP_PUSHDATA1 as usize {
        code.push(len as u8);
    } else if len <= u8::MAX as usize {
        code.push(OP_PUSHDATA1);
        code.push(len as u8);
    } else if len <= u16::MAX as usize {
        code.push(OP_PUSHDATA2);
        code.extend_from_slice(&(len as u16).to_le_bytes());
    } else {
        code.push(OP_PUSHDATA4);
        code.extend_from_slice(&(len as u32).to_le_bytes());
    }
    code.extend_from_slice(bytes);
}
