//! Shared constants for the plantscan server.

/// Default HTTP port when neither config nor `PORT` sets one.
pub const DEFAULT_PORT: u16 = 3000;

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default persistence connection string (in-process store).
pub const DEFAULT_DATABASE_URL: &str = "memory://";

/// Directory served at the root path space.
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// Upper bound on a single analyze request body (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "plantscan.toml";

/// Multipart field carrying the plant photo.
pub const UPLOAD_FIELD: &str = "plantPhoto";

/// Prefix of every fabricated session token.
pub const TOKEN_PREFIX: &str = "demo-token-";

/// Display name returned by the mock login regardless of input.
pub const DEMO_USER_NAME: &str = "Demo User";

/// MIME type recorded when the client sends none.
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";
