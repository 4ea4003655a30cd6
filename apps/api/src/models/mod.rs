pub mod action;
pub mod affiliate;
pub mod career;
pub mod premium;
pub mod profile;
