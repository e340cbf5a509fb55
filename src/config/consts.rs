/// Dataplane used when the config does not name one
pub const DEFAULT_DATAPLANE: &str = "linux";
/// Log level used when neither the config nor the CLI sets one
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Per-call deadline for backend control calls (2 seconds)
pub const DEFAULT_API_TIMEOUT_MS: u64 = 2_000;
/// Attempts per control call, including the first one
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
/// Upper bound on attempts, regardless of configuration
pub const MAX_RETRY_ATTEMPTS: u32 = 10;
/// Initial backoff between attempts; doubles after each failure
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 50;
/// Backoff ceiling
pub const MAX_RETRY_BACKOFF_MS: u64 = 1_000;
