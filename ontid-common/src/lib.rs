pub mod address;
pub mod binary;
pub mod client;
pub mod ddo;
pub mod did;
pub mod document;
pub mod error;
pub mod keys;

pub use address::Address;
pub use client::{DdoLookup, LedgerClient, build_get_ddo_tx};
pub use ddo::{Attribute, AttributeValue, Ddo, PublicKeyEntry};
pub use document::{DID_CONTEXT, DidDocument, DocumentAttribute, DocumentKey};
pub use error::{OntIdError, Result};
pub use keys::{Curve, KeyAlgorithm, verification_key_type};
