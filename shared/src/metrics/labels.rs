// Measurement, tag and metric label constants.
//
// Centralizing names keeps the emitted series stable across the sink,
// the self-metrics registry and the tests.

/// Measurement name under which every poll cycle reports its fields.
pub const MEASUREMENT_FRITZBOX: &str = "fritzbox";

/// Tag carrying the resolved router host.
pub const TAG_HOST: &str = "host";

/// Label for the reason a catalog entry was skipped.
pub const LABEL_REASON: &str = "reason";

/// The service identifier was not in the directory.
pub const REASON_SERVICE_NOT_FOUND: &str = "service_not_found";

/// The service exists but does not expose the action.
pub const REASON_ACTION_NOT_FOUND: &str = "action_not_found";

/// The action was found but the call failed.
pub const REASON_ACTION_FAILED: &str = "action_failed";

/// The call succeeded but the result field was missing.
pub const REASON_RESULT_MISSING: &str = "result_missing";

/// Anything else.
pub const REASON_OTHER: &str = "other";
