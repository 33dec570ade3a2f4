//! Application services and ports.

#![forbid(unsafe_code)]

mod password_reset_service;
mod repository_ports;
mod user_lookup;
mod webpage_admin_service;
mod widget_sort;

#[cfg(test)]
mod test_support;

pub use password_reset_service::{PasswordResetService, ResetPolicy, ResetTicket};
pub use repository_ports::{Clock, Predicate, Repository};
pub use user_lookup::{ExternalUserSource, IdentityAccessor, UserLookup};
pub use webpage_admin_service::WebpageAdminService;
pub use widget_sort::{PageWidgetSortModel, WidgetSortEntry, WidgetSortService};
