//! Reversible encoding of internal identifiers into short public tokens.
//!
//! Backed by the Sqids algorithm. Tokens are not a security boundary; they
//! only keep raw database identifiers out of URLs.

use sqids::Sqids;
use uuid::Uuid;

use crate::config::SqidsConfig;
use crate::error::{AppError, ErrorKind};
use crate::result::AppResult;

/// Encodes numeric and UUID identifiers to short tokens and back.
pub struct IdCodec {
    sqids: Sqids,
}

impl std::fmt::Debug for IdCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdCodec").finish_non_exhaustive()
    }
}

impl IdCodec {
    /// Build a codec from configuration.
    pub fn new(config: &SqidsConfig) -> AppResult<Self> {
        let mut builder = Sqids::builder().min_length(config.min_length);
        if let Some(alphabet) = &config.alphabet {
            builder = builder.alphabet(alphabet.chars().collect());
        }

        let sqids = builder.build().map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Invalid sqids configuration", e)
        })?;

        Ok(Self { sqids })
    }

    /// Encode a single numeric identifier.
    pub fn encode(&self, id: u64) -> AppResult<String> {
        self.encode_numbers(&[id])
    }

    /// Decode a token produced by [`IdCodec::encode`].
    ///
    /// Returns `None` for malformed tokens and for tokens that decode to
    /// anything other than exactly one number.
    pub fn decode(&self, token: &str) -> Option<u64> {
        match self.decode_numbers(token)?.as_slice() {
            [id] => Some(*id),
            _ => None,
        }
    }

    /// Encode a UUID as its two 64-bit halves.
    pub fn encode_uuid(&self, id: Uuid) -> AppResult<String> {
        let (high, low) = id.as_u64_pair();
        self.encode_numbers(&[high, low])
    }

    /// Decode a token produced by [`IdCodec::encode_uuid`].
    pub fn decode_uuid(&self, token: &str) -> Option<Uuid> {
        match self.decode_numbers(token)?.as_slice() {
            [high, low] => Some(Uuid::from_u64_pair(*high, *low)),
            _ => None,
        }
    }

    fn encode_numbers(&self, numbers: &[u64]) -> AppResult<String> {
        self.sqids.encode(numbers).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Failed to encode identifier", e)
        })
    }

    /// Decoding is only accepted when re-encoding yields the same token, so
    /// every identifier has exactly one public form.
    fn decode_numbers(&self, token: &str) -> Option<Vec<u64>> {
        let numbers = self.sqids.decode(token);
        if numbers.is_empty() {
            return None;
        }

        match self.sqids.encode(&numbers) {
            Ok(canonical) if canonical == token => Some(numbers),
            _ => None,
        }
    }
}
