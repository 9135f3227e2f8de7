/// Method prefix every resolvable identifier must carry.
pub const METHOD_PREFIX: &str = "did:ont:";

/// Whether `did` is a syntactically acceptable `did:ont` identifier.
///
/// Only the method and a non-empty method-specific id are checked here;
/// whether the id is registered is the ledger's call.
pub fn is_ont_did(did: &str) -> bool {
    did.strip_prefix(METHOD_PREFIX)
        .is_some_and(|id| !id.is_empty())
}
