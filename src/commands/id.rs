//! Public identifier codec commands.

use clap::Args;
use serde_json::json;

use frontdesk_core::codec::IdCodec;
use frontdesk_core::config::AppConfig;
use frontdesk_core::error::AppError;

use crate::output;

/// Arguments for `encode-id`
#[derive(Debug, Args)]
pub struct EncodeArgs {
    /// Numeric identifier to encode
    pub id: u64,
}

/// Arguments for `decode-id`
#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// Token to decode
    pub token: String,
}

/// Encode a numeric identifier
pub fn encode(args: &EncodeArgs, config: &AppConfig) -> Result<(), AppError> {
    let codec = IdCodec::new(&config.sqids)?;
    let token = codec.encode(args.id)?;
    output::print_json(&json!({ "id": args.id, "token": token }));
    Ok(())
}

/// Decode a token to the numeric identifier or UUID it stands for
pub fn decode(args: &DecodeArgs, config: &AppConfig) -> Result<(), AppError> {
    let codec = IdCodec::new(&config.sqids)?;

    if let Some(id) = codec.decode(&args.token) {
        output::print_json(&json!({ "token": args.token, "id": id }));
    } else if let Some(uuid) = codec.decode_uuid(&args.token) {
        output::print_json(&json!({ "token": args.token, "uuid": uuid }));
    } else {
        return Err(AppError::validation(format!(
            "'{}' is not a valid identifier token",
            args.token
        )));
    }
    Ok(())
}
