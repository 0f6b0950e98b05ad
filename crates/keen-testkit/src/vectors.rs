//! Golden test vectors for scoped keys.
//!
//! Each vector fixes the master secret and IV, so the token is fully
//! determined. Expected tokens were produced by an independent AES-CBC
//! implementation and must match byte for byte.

use keen_scoped_key::{
    FixedIv, PermissionDescriptor, Result, ScopedKey, ScopedKeyCodec, IV_LEN,
};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Master secret bytes (16, 24 or 32).
    pub secret: &'static [u8],
    /// Initialization vector.
    pub iv: [u8; IV_LEN],
    /// Canonical JSON plaintext of the descriptor.
    pub plaintext: &'static str,
    /// Expected token (lowercase hex).
    pub expected_token: &'static str,
}

impl GoldenVector {
    /// The descriptor this vector encodes.
    pub fn descriptor(&self) -> Result<PermissionDescriptor> {
        PermissionDescriptor::from_json_bytes(self.plaintext.as_bytes())
    }

    /// A codec keyed with this vector's secret.
    pub fn codec(&self) -> Result<ScopedKeyCodec> {
        ScopedKeyCodec::from_secret_bytes(self.secret)
    }

    /// Encode the vector's descriptor with its fixed IV.
    pub fn encode(&self) -> Result<ScopedKey> {
        self.codec()?
            .encode_with(&self.descriptor()?, &mut FixedIv(self.iv))
    }
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "AES-256 filter with read operation",
            secret: b"0123456789abcdef0123456789abcdef",
            iv: [
                0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c,
                0x0d, 0x0e, 0x0f,
            ],
            plaintext: r#"{"filters":[{"property_name":"account_id","operator":"eq","property_value":"acme"}],"allowed_operations":["read"]}"#,
            expected_token: "000102030405060708090a0b0c0d0e0f\
                04a612d825746c20fc2d92afe8eea475ccb1bc96b018db4b90df4949783b9ea5\
                668c3cc394c2fd68d3e68284c9e25d63cb221ae9ba54290ff9566bf7f231f6ff\
                0e1cb8bdcb35d5e19e72b3d6386cfede8083da6515e91a90bb28c8008a6efb7f\
                ba76c3167a49c0a114402b335bb7d0461941bf483c80f0a07becfae1b5d07571",
        },
        GoldenVector {
            name: "AES-128 empty filters, no operations",
            secret: b"keen-master-key!",
            iv: [0xaa; IV_LEN],
            plaintext: r#"{"filters":[]}"#,
            expected_token: "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa0f5d795c302cf707e25238baaffa3fb2",
        },
        GoldenVector {
            name: "AES-192 numeric filter",
            secret: b"twenty-four-byte-secret!",
            iv: [0x42; IV_LEN],
            plaintext: r#"{"filters":[{"property_name":"n","operator":"gte","property_value":1}]}"#,
            expected_token: "42424242424242424242424242424242\
                49617f777444930cd323fd3d699f6d148d2b801a64378ef803fc62546196c050\
                2a66afabc6f554af2165b2507707471e8ddc087dbf97449094a72cca2ecc5354\
                e3cbee3e8556c155b90d908f7c9c27c1",
        },
        GoldenVector {
            name: "AES-128 block-aligned plaintext gets a full pad block",
            secret: b"keen-master-key!",
            iv: [0x11; IV_LEN],
            plaintext: r#"{"filters":[],"allowed_operations":["analysis"]}"#,
            expected_token: "11111111111111111111111111111111\
                d1144e7528d4da6ea1b901258e40daf5a6e24c0a27dbe58fdcad117fb97ddf0e\
                97bb737b7a03644b9445aa259ad3bdde25c676db4256a83050ebb39e796490df",
        },
    ]
}

/// Check every vector, returning `(name, matches, produced_token)`.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| match v.encode() {
            Ok(token) => (
                v.name.to_string(),
                token.as_str() == v.expected_token,
                token.into_string(),
            ),
            Err(e) => (v.name.to_string(), false, e.to_string()),
        })
        .collect()
}
