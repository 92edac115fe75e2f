//! Role requirements of every exposed operation.

use rollcall_access::{ALL_ROLES, OperationConfig, SUPER_ADMIN_ONLY};
use rollcall_models::Role;

pub const VIEW_IDENTITY: OperationConfig = OperationConfig::new("view own identity", ALL_ROLES);
pub const VIEW_OWN_SCHOOLS: OperationConfig =
    OperationConfig::new("view own schools", &[Role::Parent]);
pub const PREVIEW_FILTER: OperationConfig = OperationConfig::new("preview filters", ALL_ROLES);
pub const CHECK_ACCESS: OperationConfig = OperationConfig::new("check access", ALL_ROLES);
pub const LIST_PARENT_SCHOOLS: OperationConfig =
    OperationConfig::new("list parent schools", SUPER_ADMIN_ONLY);
pub const VIEW_RESOURCES: OperationConfig = OperationConfig::new("view resources", ALL_ROLES);
pub const SEARCH: OperationConfig = OperationConfig::new("search", ALL_ROLES);
