//! Feature modules: one per content screen, plus the view router.

pub mod landing;
pub mod menu;
pub mod route;
pub mod router;
pub mod timing;
