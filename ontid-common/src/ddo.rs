use crate::{
    address::Address,
    binary::BinaryReader,
    error::{OntIdError, Result},
    keys::{Curve, KeyAlgorithm},
};

/// Key blobs of exactly this length are the legacy form: a compressed
/// NIST P-256 point with no label bytes.
const LEGACY_KEY_LEN: usize = 33;

/// Attribute type whose value is a JSON service endpoint object.
const SERVICE_KIND: &str = "service";

/// One public key record from a DDO.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyEntry {
    /// Fragment identifier, `<did>#keys-<index>`.
    pub id: String,
    pub algorithm: KeyAlgorithm,
    pub curve: Option<Curve>,
    /// Raw key material, hex encoded, label bytes stripped.
    pub key_hex: String,
}

/// One attribute record from a DDO.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub key: String,
    /// The record's `type` field.
    pub kind: String,
    pub value: AttributeValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Any attribute type other than `service`.
    Scalar(String),
    /// A `service` attribute: a JSON object describing a service endpoint.
    Service(serde_json::Map<String, serde_json::Value>),
}

/// A decoded DDO: everything the ledger states about one ONT ID.
#[derive(Debug, Clone, PartialEq)]
pub struct Ddo {
    pub ont_id: String,
    pub public_keys: Vec<PublicKeyEntry>,
    pub attributes: Vec<Attribute>,
    pub controller: Option<String>,
    pub recovery: Option<String>,
}

impl Ddo {
    /// Decode the ledger's binary DDO serialization.
    ///
    /// The layout is five var-bytes fields in fixed order: public keys,
    /// attributes, recovery address, controller, recovery (textual). The
    /// serialization simply stops after the last populated field, so
    /// running out of buffer at a field boundary means "absent". Malformed
    /// content inside a field is still an error.
    pub fn decode(ont_id: &str, raw: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(raw);

        let key_block = optional_field(reader.read_var_bytes())?.unwrap_or_default();
        let attr_block = optional_field(reader.read_var_bytes())?.unwrap_or_default();
        let recovery_addr = optional_field(reader.read_var_bytes())?.unwrap_or_default();
        let controller = optional_field(reader.read_var_bytes())?.unwrap_or_default();
        let recovery_text = optional_field(reader.read_var_bytes())?.unwrap_or_default();

        // An explicit textual recovery wins over one derived from the
        // raw address field.
        let recovery = match non_empty(String::from_utf8(recovery_text)?) {
            Some(explicit) => Some(explicit),
            None if !recovery_addr.is_empty() => {
                Some(Address::try_from(recovery_addr.as_slice())?.to_base58())
            }
            None => None,
        };

        Ok(Self {
            ont_id: ont_id.to_string(),
            public_keys: decode_public_keys(ont_id, &key_block)?,
            attributes: decode_attributes(&attr_block)?,
            controller: non_empty(String::from_utf8(controller)?),
            recovery,
        })
    }
}

/// Top-level DDO fields are optional from the end: a read that ran out of
/// buffer yields `None`, anything else propagates.
fn optional_field(read: Result<Vec<u8>>) -> Result<Option<Vec<u8>>> {
    match read {
        Ok(bytes) => Ok(Some(bytes)),
        Err(OntIdError::TruncatedInput { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

fn decode_public_keys(ont_id: &str, block: &[u8]) -> Result<Vec<PublicKeyEntry>> {
    let mut reader = BinaryReader::new(block);
    let mut keys = Vec::new();
    while !reader.is_empty() {
        let index = reader.read_u32()?;
        let blob = reader.read_var_bytes()?;
        keys.push(decode_key_record(ont_id, index, &blob)?);
    }
    Ok(keys)
}

fn decode_key_record(ont_id: &str, index: u32, blob: &[u8]) -> Result<PublicKeyEntry> {
    let id = format!("{ont_id}#keys-{index}");
    if blob.len() == LEGACY_KEY_LEN {
        return Ok(PublicKeyEntry {
            id,
            algorithm: KeyAlgorithm::Ecdsa,
            curve: Some(Curve::P256),
            key_hex: hex::encode(blob),
        });
    }
    if blob.len() < 2 {
        return Err(OntIdError::TruncatedInput {
            needed: 2,
            remaining: blob.len(),
        });
    }
    let algorithm = KeyAlgorithm::from_label(blob[0])?;
    // Only ECDSA records distinguish curves; the label byte is on the wire
    // for the other algorithms too, but carries nothing.
    let curve = match algorithm {
        KeyAlgorithm::Ecdsa => Some(Curve::from_label(blob[1])?),
        KeyAlgorithm::Sm2 | KeyAlgorithm::Eddsa => None,
    };
    Ok(PublicKeyEntry {
        id,
        algorithm,
        curve,
        key_hex: hex::encode(&blob[2..]),
    })
}

fn decode_attributes(block: &[u8]) -> Result<Vec<Attribute>> {
    let mut reader = BinaryReader::new(block);
    let mut attributes = Vec::new();
    while !reader.is_empty() {
        let key = String::from_utf8(reader.read_var_bytes()?)?;
        let kind = String::from_utf8(reader.read_var_bytes()?)?;
        let raw_value = reader.read_var_bytes()?;
        let value = if kind == SERVICE_KIND {
            AttributeValue::Service(serde_json::from_slice(&raw_value)?)
        } else {
            AttributeValue::Scalar(String::from_utf8(raw_value)?)
        };
        attributes.push(Attribute { key, kind, value });
    }
    Ok(attributes)
}
