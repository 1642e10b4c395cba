//! # Resource Sidebar
//!
//! Headless add/edit/delete form for marketplace resource listings. Owns the
//! draft, the currency picker and the calls to the backend and image host;
//! a UI layer renders [`SidebarView`] and drains [`Notice`]s.
//!
//! ## Backend endpoints
//! - `POST /api/resource/add` - Create a resource
//! - `PUT /api/resource/{id}` - Update a resource
//! - `DELETE /api/resource/{id}` - Delete a resource
//! - `POST /api/cloudinary-signature` - Signed upload ticket

pub mod config;
pub mod dropdown;
mod error;
pub mod form;
pub mod gateway;
pub mod notice;
mod sidebar;
pub mod view;

pub use config::SidebarConfig;
pub use error::Error;
pub use gateway::{HttpGateway, ImageFile, ResourceApi, UploadTicket};
pub use notice::{Notice, NoticeLevel};
pub use resource_types::{CurrencyUnit, Draft, DraftError, Field, Resource, ResourcePayload, TradeType};
pub use sidebar::{AuthContext, ResourceSidebar, SidebarHost, CONFIRM_DELETE};
pub use view::SidebarView;
