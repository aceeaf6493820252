// Action vocabulary written to the activity log. Downstream log consumers
// match on these strings, so they must stay exactly as-is.
pub const LOGIN: &str = "login";
pub const LOGOUT: &str = "logout";
pub const APPROVE_LICENSE: &str = "approve_license";
pub const REJECT_LICENSE: &str = "reject_license";
pub const CREATE_LICENSE: &str = "create_license";
pub const REVOKE_LICENSE: &str = "revoke_license";
pub const EXTEND_LICENSE: &str = "extend_license";
pub const CREATE_USER: &str = "create_user";
pub const UPDATE_USER: &str = "update_user";
pub const DELETE_USER: &str = "delete_user";
pub const CREATE_TEAM_MEMBER: &str = "create_team_member";
pub const UPDATE_TEAM_MEMBER: &str = "update_team_member";
pub const DELETE_TEAM_MEMBER: &str = "delete_team_member";
pub const CHANGE_PASSWORD: &str = "change_password";
pub const VIEW_PAGE: &str = "view_page";
pub const EXPORT_DATA: &str = "export_data";
pub const SEARCH: &str = "search";

// Backend collections.
pub const ACTIVITY_LOGS: &str = "activity_logs";
pub const LICENSE_REQUESTS: &str = "license_requests";
pub const APPROVAL_REQUESTS: &str = "approval_requests";
pub const LICENSES: &str = "licenses";

// Badge indicators.
pub const REQUESTS_BADGE: &str = "requestsBadge";
pub const APPROVALS_BADGE: &str = "approvalsBadge";
pub const HEADER_NOTIFICATION_BADGE: &str = "headerNotificationBadge";

// Session identity keys.
pub const SESSION_USER_ID: &str = "userId";
pub const SESSION_USER_EMAIL: &str = "userEmail";
pub const SESSION_USER_NAME: &str = "userName";
pub const SESSION_USER_ROLE: &str = "userRole";

// Fallbacks used when identity or the IP lookup is unavailable.
pub const FALLBACK_USER_EMAIL: &str = "unknown@example.com";
pub const FALLBACK_USER_NAME: &str = "Unknown User";
pub const UNKNOWN_IP: &str = "unknown";

// Roles allowed to see the approval queue.
pub const PRIVILEGED_ROLES: [&str; 2] = ["admin", "owner"];

// Licenses expiring within this many days count as "expiring soon".
pub const EXPIRY_WINDOW_DAYS: i64 = 7;

// Largest count rendered verbatim on a badge.
pub const BADGE_DISPLAY_MAX: u64 = 99;
pub const BADGE_OVERFLOW_TEXT: &str = "99+";
