//! Compact share tokens: JSON, LZ4 and URL-safe base64.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

use crate::{prelude::*, state::AppState};

/// Upper bound on the decompressed payload, the LZ4 size prefix is checked against it.
pub const MAX_PAYLOAD_SIZE: usize = 64 * 1024;

/// Encode the state into a token suitable for a URL fragment.
pub fn encode(state: &AppState) -> Result<String> {
    let json = serde_json::to_vec(state).context("failed to serialize the state")?;
    Ok(URL_SAFE_NO_PAD.encode(lz4_flex::compress_prepend_size(&json)))
}

/// Decode the token, with or without the leading `#`.
///
/// A malformed token is reported and treated as absent.
#[must_use]
pub fn decode(token: &str) -> Option<AppState> {
    let token = token.trim().trim_start_matches('#');
    if token.is_empty() {
        return None;
    }
    match try_decode(token) {
        Ok(state) => Some(state),
        Err(error) => {
            warn!("ignoring malformed share token: {error:#}");
            None
        }
    }
}

fn try_decode(token: &str) -> Result<AppState> {
    let compressed = URL_SAFE_NO_PAD.decode(token).context("invalid base64")?;
    let size_prefix: [u8; 4] = compressed
        .get(..4)
        .and_then(|prefix| prefix.try_into().ok())
        .context("the payload is too short")?;
    let size = u32::from_le_bytes(size_prefix) as usize;
    ensure!(size <= MAX_PAYLOAD_SIZE, "the payload is too large: {size} bytes");
    let json = lz4_flex::decompress_size_prepended(&compressed).context("invalid LZ4 payload")?;
    serde_json::from_slice(&json).context("invalid state")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        currency::Currency,
        label::LabelSets,
        parameters::UsageParameters,
        quantity::{cost::Cost, time::Months},
    };

    #[test]
    fn test_round_trip() -> Result {
        let mut state = AppState {
            currency: Currency::Usd,
            selected_classes: vec![String::from("A"), String::from("B"), String::from("D")],
            ..AppState::default()
        };
        state.tire_prices.insert("A", Cost(520.0));
        state.usage.projection_years = 8;

        let token = encode(&state)?;
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_eq!(decode(&token), Some(state.clone()));
        assert_eq!(decode(&format!("#{token}")), Some(state));
        Ok(())
    }

    #[test]
    fn test_malformed_tokens_are_absent() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("#"), None);
        assert_eq!(decode("not a token!"), None);
        assert_eq!(decode("AAAA"), None);
        let not_a_state = URL_SAFE_NO_PAD.encode(lz4_flex::compress_prepend_size(b"42"));
        assert_eq!(decode(&not_a_state), None);
    }

    #[test]
    fn test_oversized_payload_is_rejected() {
        let mut payload = u32::try_from(MAX_PAYLOAD_SIZE + 1).unwrap().to_le_bytes().to_vec();
        payload.extend_from_slice(&[0; 16]);
        assert_eq!(decode(&URL_SAFE_NO_PAD.encode(payload)), None);
    }

    #[test]
    fn test_partial_state_is_completed_with_defaults() {
        let token = URL_SAFE_NO_PAD.encode(lz4_flex::compress_prepend_size(br#"{"c": "GBP"}"#));
        let state = decode(&token).unwrap();
        assert_eq!(state.currency, Currency::Gbp);
        assert_eq!(state.selected_classes, ["C", "E"]);
    }

    #[test]
    fn test_huge_horizon_falls_back_to_default() {
        let json = br#"{"cl": ["A", "C"], "y": 1e12}"#;
        let token = URL_SAFE_NO_PAD.encode(lz4_flex::compress_prepend_size(json));
        let state = decode(&token).unwrap();
        assert_eq!(state.usage.projection_years, UsageParameters::DEFAULT_PROJECTION_YEARS);
        let projection = state.project(&LabelSets::default()).into_projection().unwrap();
        assert_eq!(projection.horizon(), Months(60.0));
    }
}
