use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading recipients or senders. Any of these aborts the
/// run before a single transfer is attempted.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read address file {path:?}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("address file {path:?} contains no addresses")]
    EmptyInput { path: PathBuf },

    #[error("no private keys supplied (set PKS or pass --pks)")]
    MissingCredentialSource,

    #[error("PKS does not contain any non-empty private key")]
    NoValidCredentials,

    #[error("private key #{position} is not a valid secp256k1 key: {reason}")]
    InvalidCredential { position: usize, reason: String },
}

/// Fee lookup failure. Only the current attempt is lost.
#[derive(Debug, Error)]
pub enum FeeQueryError {
    #[error("fee data request failed: {0}")]
    Transport(String),

    #[error("node reported neither EIP-1559 fees nor a gas price")]
    NoGasPrice,
}

/// Submission failure. Only the current attempt is lost.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("invalid recipient address {address}: {reason}")]
    InvalidRecipient { address: String, reason: String },

    #[error("transaction rejected: {0}")]
    Rejected(String),
}
