use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    ddo::{AttributeValue, Ddo},
    error::Result,
    keys::verification_key_type,
};

/// JSON-LD context every resolved document carries.
pub const DID_CONTEXT: &str = "https://w3id.org/did/v1";

/// A resolved W3C DID Document.
///
/// Field order is serialization order and is part of the output contract:
/// resolvers downstream diff documents textually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DidDocument {
    #[serde(rename = "@context")]
    pub context: String,
    pub id: String,
    pub authentication: Vec<String>,
    #[serde(rename = "publicKey")]
    pub public_key: Vec<DocumentKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<Vec<DocumentAttribute>>,
}

/// One `publicKey` member of a DID Document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentKey {
    pub id: String,
    #[serde(rename = "type")]
    pub key_type: String,
    pub controller: String,
    #[serde(rename = "publicKeyHex")]
    pub public_key_hex: String,
}

/// One `attribute` member: a non-service DDO attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAttribute {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl DidDocument {
    /// Serialize with two-space indentation, the form the driver serves.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Ddo {
    /// Assemble the DID Document this DDO states.
    ///
    /// Pure transform; the only failure path is a key the classifier
    /// cannot map.
    pub fn into_document(self) -> Result<DidDocument> {
        let mut authentication = Vec::with_capacity(self.public_keys.len());
        let mut public_key = Vec::with_capacity(self.public_keys.len());
        for entry in self.public_keys {
            let key_type = verification_key_type(entry.algorithm, entry.curve)?;
            public_key.push(DocumentKey {
                id: entry.id.clone(),
                key_type: key_type.to_string(),
                controller: self.ont_id.clone(),
                public_key_hex: entry.key_hex,
            });
            authentication.push(entry.id);
        }

        let mut service: Option<Vec<Value>> = None;
        let mut attribute: Option<Vec<DocumentAttribute>> = None;
        for attr in self.attributes {
            let fragment_id = format!("{}#{}", self.ont_id, attr.key);
            match attr.value {
                AttributeValue::Service(mut endpoint) => {
                    endpoint.insert("id".to_string(), Value::String(fragment_id));
                    service
                        .get_or_insert_with(Vec::new)
                        .push(Value::Object(endpoint));
                }
                AttributeValue::Scalar(value) => {
                    attribute
                        .get_or_insert_with(Vec::new)
                        .push(DocumentAttribute {
                            id: fragment_id,
                            kind: attr.kind,
                            value,
                        });
                }
            }
        }

        Ok(DidDocument {
            context: DID_CONTEXT.to_string(),
            id: self.ont_id,
            authentication,
            public_key,
            controller: self.controller,
            recovery: self.recovery,
            service,
            attribute,
        })
    }
}
