// Admin panel: access gate, persistence seam, profile self-service and
// dashboard panels.

pub mod access;
pub mod dashboards;
pub mod handlers;
pub mod profile;
pub mod store;
