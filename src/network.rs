//! Network URL constants for the MeshGen SDK.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.meshgen.io";
