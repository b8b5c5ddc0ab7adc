//! Contract interface descriptor, parsed from a compilation artifact.
//! Selectors and topics are derived from canonical signatures rather than
//! shipped precomputed, so the artifact stays the single source of truth.

use std::collections::HashMap;

use alloy_primitives::{keccak256, B256};
use serde::Deserialize;

use crate::error::AbiError;

#[derive(Debug, Deserialize)]
struct Artifact {
    abi: Vec<AbiEntry>,
}

#[derive(Debug, Deserialize)]
struct AbiEntry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    inputs: Vec<AbiParam>,
}

#[derive(Debug, Clone, Deserialize)]
struct AbiParam {
    #[serde(rename = "type")]
    ty: String,
}

/// Callable functions and emittable events of a deployed contract.
#[derive(Debug, Clone)]
pub struct InterfaceDescriptor {
    functions: HashMap<String, [u8; 4]>,
    events: HashMap<String, B256>,
}

impl InterfaceDescriptor {
    pub fn from_artifact(json: &str) -> Result<Self, AbiError> {
        let artifact: Artifact = serde_json::from_str(json)?;

        let mut functions = HashMap::new();
        let mut events = HashMap::new();
        for entry in artifact.abi {
            let Some(name) = entry.name else { continue };
            let hash = keccak256(canonical_signature(&name, &entry.inputs));
            match entry.kind.as_str() {
                "function" => {
                    let mut selector = [0u8; 4];
                    selector.copy_from_slice(&hash[..4]);
                    functions.insert(name, selector);
                }
                "event" => {
                    events.insert(name, hash);
                }
                _ => {}
            }
        }

        Ok(Self { functions, events })
    }

    /// Four-byte calldata selector of the named function.
    pub fn function_selector(&self, name: &str) -> Result<[u8; 4], AbiError> {
        self.functions
            .get(name)
            .copied()
            .ok_or_else(|| AbiError::MissingFunction(name.to_string()))
    }

    /// Topic-zero hash of the named event.
    pub fn event_topic(&self, name: &str) -> Result<B256, AbiError> {
        self.events
            .get(name)
            .copied()
            .ok_or_else(|| AbiError::MissingEvent(name.to_string()))
    }
}

fn canonical_signature(name: &str, inputs: &[AbiParam]) -> String {
    let types: Vec<&str> = inputs.iter().map(|param| param.ty.as_str()).collect();
    format!("{name}({})", types.join(","))
}
