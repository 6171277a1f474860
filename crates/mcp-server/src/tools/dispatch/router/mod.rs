// Per-tool handlers. Each takes the API handle and its parsed request and returns the
// text shown to the caller.

pub(super) mod companies;
pub(super) mod entitlements;
pub(super) mod features;
pub(super) mod overrides;
pub(super) mod plans;
