/// Application name, used in user-facing messages.
pub const APP_NAME: &str = "stackup";

/// Default manifest file name, searched for from the query path upwards.
pub const MANIFEST_FILENAME: &str = "manifest.yml";

/// Environment variable overriding the manifest location.
pub const MANIFEST_ENV_VAR: &str = "STACKUP_MANIFEST";
