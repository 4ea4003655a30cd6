// Affiliate link directory: public lookup at report-render time and
// admin-managed CRUD behind the access gate.

pub mod directory;
pub mod handlers;
pub mod service;
