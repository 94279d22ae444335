/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Global admin role
pub const ROLE_SUPER_ADMIN: &str = "super_admin";

/// Back-office admin - reviews reports, decides permits
pub const ROLE_ADMIN: &str = "admin";

/// Operations staff - manages road updates, signals and transport data
pub const ROLE_OPERATOR: &str = "operator";

/// Field reporter - submits accident/violation reports and permit requests
pub const ROLE_REPORTER: &str = "reporter";
