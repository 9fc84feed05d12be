pub mod breadcrumbs;
pub mod button;
pub mod header;
