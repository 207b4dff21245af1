// ABOUTME: Scheduling policy defaults and input validation limits
// ABOUTME: Shared between configuration loading, services, and route validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Scheduling policy constants
pub mod scheduling {
    /// Calendar days between consecutive program days when a program is assigned
    pub const DEFAULT_INTERVAL_DAYS: u32 = 3;

    /// Upper bound accepted for the interval policy
    pub const MAX_INTERVAL_DAYS: u32 = 30;

    /// Widest calendar range a single range query may span
    pub const MAX_RANGE_DAYS: i64 = 366;
}

/// Limits applied to listing endpoints
pub mod limits {
    /// Default page size for catalog listings
    pub const DEFAULT_LIST_LIMIT: u32 = 50;

    /// Hard cap on page size for catalog listings
    pub const MAX_LIST_LIMIT: u32 = 200;

    /// Default number of completion history rows returned
    pub const DEFAULT_HISTORY_LIMIT: u32 = 100;

    /// Longest program a single assignment will expand
    pub const MAX_PROGRAM_DURATION_DAYS: u32 = 365;
}

/// Authentication constants
pub mod auth {
    /// Minimum accepted password length at registration
    pub const MIN_PASSWORD_LENGTH: usize = 8;

    /// Default token lifetime
    pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

    /// Bytes of entropy in a generated signing secret
    pub const GENERATED_SECRET_BYTES: usize = 64;
}

/// Service identity
pub mod service_names {
    /// Service name used in logs and token audience
    pub const FITTRACK_SERVER: &str = "fittrack-server";
}
