use crate::error::{OntIdError, Result};

/// Signature algorithm labels used in DDO public key records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAlgorithm {
    Ecdsa,
    Sm2,
    Eddsa,
}

impl KeyAlgorithm {
    pub fn from_label(label: u8) -> Result<Self> {
        match label {
            0x12 => Ok(Self::Ecdsa),
            0x13 => Ok(Self::Sm2),
            0x14 => Ok(Self::Eddsa),
            other => Err(OntIdError::UnsupportedKeyType(format!(
                "algorithm label 0x{other:02x}"
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ecdsa => "ECDSA",
            Self::Sm2 => "SM2",
            Self::Eddsa => "EDDSA",
        }
    }
}

/// Elliptic curve labels carried by ECDSA key records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    P224,
    P256,
    P384,
    P521,
}

impl Curve {
    pub fn from_label(label: u8) -> Result<Self> {
        match label {
            1 => Ok(Self::P224),
            2 => Ok(Self::P256),
            3 => Ok(Self::P384),
            4 => Ok(Self::P521),
            other => Err(OntIdError::UnsupportedKeyType(format!(
                "curve label 0x{other:02x}"
            ))),
        }
    }
}

/// Map an algorithm/curve pair to its W3C verification key type.
///
/// The table is closed: a pair outside it is an unsupported key, not a
/// fallback.
pub fn verification_key_type(algorithm: KeyAlgorithm, curve: Option<Curve>) -> Result<&'static str> {
    match (algorithm, curve) {
        (KeyAlgorithm::Ecdsa, Some(Curve::P224)) => Ok("EcdsaSecp224r1VerificationKey2019"),
        (KeyAlgorithm::Ecdsa, Some(Curve::P256)) => Ok("EcdsaSecp256r1VerificationKey2019"),
        (KeyAlgorithm::Ecdsa, Some(Curve::P384)) => Ok("EcdsaSecp384r1VerificationKey2019"),
        (KeyAlgorithm::Ecdsa, Some(Curve::P521)) => Ok("EcdsaSecp521r1VerificationKey2019"),
        (KeyAlgorithm::Eddsa, None) => Ok("Ed25519VerificationKey2018"),
        (KeyAlgorithm::Sm2, None) => Ok("SM2VerificationKey2019"),
        (algorithm, _) => Err(OntIdError::UnsupportedKeyType(algorithm.name().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_labels() {
        assert_eq!(KeyAlgorithm::from_label(0x12).unwrap(), KeyAlgorithm::Ecdsa);
        assert_eq!(KeyAlgorithm::from_label(0x13).unwrap(), KeyAlgorithm::Sm2);
        assert_eq!(KeyAlgorithm::from_label(0x14).unwrap(), KeyAlgorithm::Eddsa);
        assert!(matches!(
            KeyAlgorithm::from_label(0x99),
            Err(OntIdError::UnsupportedKeyType(_))
        ));
    }

    #[test]
    fn curve_labels() {
        assert_eq!(Curve::from_label(1).unwrap(), Curve::P224);
        assert_eq!(Curve::from_label(2).unwrap(), Curve::P256);
        assert_eq!(Curve::from_label(3).unwrap(), Curve::P384);
        assert_eq!(Curve::from_label(4).unwrap(), Curve::P521);
        assert!(Curve::from_label(0).is_err());
        assert!(Curve::from_label(5).is_err());
    }

    #[test]
    fn classifier_table() {
        let cases = [
            (KeyAlgorithm::Ecdsa, Some(Curve::P224), "EcdsaSecp224r1VerificationKey2019"),
            (KeyAlgorithm::Ecdsa, Some(Curve::P256), "EcdsaSecp256r1VerificationKey2019"),
            (KeyAlgorithm::Ecdsa, Some(Curve::P384), "EcdsaSecp384r1VerificationKey2019"),
            (KeyAlgorithm::Ecdsa, Some(Curve::P521), "EcdsaSecp521r1VerificationKey2019"),
            (KeyAlgorithm::Eddsa, None, "Ed25519VerificationKey2018"),
            (KeyAlgorithm::Sm2, None, "SM2VerificationKey2019"),
        ];
        for (algorithm, curve, expected) in cases {
            assert_eq!(verification_key_type(algorithm, curve).unwrap(), expected);
        }
    }

    #[test]
    fn combinations_outside_the_table_are_unsupported() {
        for (algorithm, curve) in [
            (KeyAlgorithm::Ecdsa, None),
            (KeyAlgorithm::Eddsa, Some(Curve::P256)),
            (KeyAlgorithm::Sm2, Some(Curve::P384)),
        ] {
            assert!(matches!(
                verification_key_type(algorithm, curve),
                Err(OntIdError::UnsupportedKeyType(_))
            ));
        }
    }
}
