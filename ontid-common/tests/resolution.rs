//! End-to-end checks: ledger DDO bytes in, DID Document JSON out.

use ontid_common::{Ddo, binary::write_var_bytes};
use serde_json::json;

const DID: &str = "did:ont:TSS6S4Xhzt5wtvRBTm4y3QCTRqB4BnU7vT";

/// Compressed P-256 point in the legacy 33-byte form.
const KEY_HEX: &str = "022f71daef10803be8e9e03b5303b0e44f4b377905cc8a72423cbe931b2dc9f5d2";

fn ddo_bytes(fields: &[&[u8]]) -> Vec<u8> {
    let mut out = Vec::new();
    for field in fields {
        write_var_bytes(&mut out, field);
    }
    out
}

fn key_record(index: u32, blob: &[u8]) -> Vec<u8> {
    let mut out = index.to_le_bytes().to_vec();
    write_var_bytes(&mut out, blob);
    out
}

fn attribute_record(key: &str, kind: &str, value: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    write_var_bytes(&mut out, key.as_bytes());
    write_var_bytes(&mut out, kind.as_bytes());
    write_var_bytes(&mut out, value);
    out
}

#[test]
fn resolves_a_fully_populated_ddo() {
    let key_block = key_record(1, &hex::decode(KEY_HEX).unwrap());
    let mut attr_block = attribute_record("degree", "string", b"bachelor");
    attr_block.extend_from_slice(&attribute_record(
        "hub",
        "service",
        br#"{"type":"Hub","serviceEndpoint":"https://hub.example.com"}"#,
    ));
    let raw = ddo_bytes(&[
        &key_block,
        &attr_block,
        &[],
        b"did:ont:parent",
        b"did:ont:guardian",
    ]);

    let document = Ddo::decode(DID, &raw).unwrap().into_document().unwrap();

    let expected = json!({
        "@context": "https://w3id.org/did/v1",
        "id": DID,
        "authentication": [format!("{DID}#keys-1")],
        "publicKey": [{
            "id": format!("{DID}#keys-1"),
            "type": "EcdsaSecp256r1VerificationKey2019",
            "controller": DID,
            "publicKeyHex": KEY_HEX,
        }],
        "controller": "did:ont:parent",
        "recovery": "did:ont:guardian",
        "service": [{
            "type": "Hub",
            "serviceEndpoint": "https://hub.example.com",
            "id": format!("{DID}#hub"),
        }],
        "attribute": [{
            "id": format!("{DID}#degree"),
            "type": "string",
            "value": "bachelor",
        }],
    });

    // Key order matters downstream, so compare the serialized texts.
    assert_eq!(
        document.to_json_pretty().unwrap(),
        serde_json::to_string_pretty(&expected).unwrap()
    );
}

#[test]
fn resolves_an_empty_ddo_to_a_minimal_document() {
    let document = Ddo::decode(DID, &[]).unwrap().into_document().unwrap();

    let expected = json!({
        "@context": "https://w3id.org/did/v1",
        "id": DID,
        "authentication": [],
        "publicKey": [],
    });
    assert_eq!(serde_json::to_value(&document).unwrap(), expected);
    assert_eq!(
        document.to_json_pretty().unwrap(),
        serde_json::to_string_pretty(&expected).unwrap()
    );
}

#[test]
fn pretty_output_is_two_space_indented() {
    let document = Ddo::decode(DID, &[]).unwrap().into_document().unwrap();
    let text = document.to_json_pretty().unwrap();

    assert!(text.starts_with("{\n  \"@context\": \"https://w3id.org/did/v1\",\n  \"id\":"));
    assert!(text.ends_with("\"publicKey\": []\n}"));
}

#[test]
fn derived_recovery_appears_in_the_document() {
    let raw = ddo_bytes(&[&[], &[], &[0x42; 20]]);
    let document = Ddo::decode(DID, &raw).unwrap().into_document().unwrap();

    let recovery = document.recovery.expect("recovery should be derived");
    assert!(recovery.starts_with('A'));
    assert_eq!(recovery.len(), 34);
}
