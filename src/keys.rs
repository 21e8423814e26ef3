use crate::error::LoadError;
use crate::types::{Credential, Sender};
use alloy::signers::local::PrivateKeySigner;

const DELIMITER: char = ',';

/// Splits the comma-separated credential source, preserving order.
pub fn parse(raw: Option<&str>) -> Result<Vec<Credential>, LoadError> {
    let raw = raw.ok_or(LoadError::MissingCredentialSource)?;

    let credentials: Vec<Credential> = raw
        .split(DELIMITER)
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(Credential::new)
        .collect();

    if credentials.is_empty() {
        return Err(LoadError::NoValidCredentials);
    }
    Ok(credentials)
}

/// Derives one signing identity per credential, in the same order.
pub fn derive_senders(credentials: &[Credential]) -> Result<Vec<Sender>, LoadError> {
    credentials
        .iter()
        .enumerate()
        .map(|(i, credential)| {
            credential
                .expose()
                .parse::<PrivateKeySigner>()
                .map(Sender::new)
                .map_err(|e| LoadError::InvalidCredential {
                    position: i + 1,
                    reason: e.to_string(),
                })
        })
        .collect()
}
