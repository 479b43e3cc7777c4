//! Domain primitives, ports, and application services.
//!
//! Everything in here is transport agnostic: services take the acting
//! caller's identity as an explicit parameter and return typed projections
//! or a tagged [`Error`], leaving wire formats to inbound adapters.

pub mod client;
mod client_service;
pub mod error;
mod error_mapping;
mod guard;
pub mod job;
mod job_service;
pub mod order;
mod order_service;
pub mod ports;
pub mod projections;
pub mod user;
mod user_service;
mod validation;

pub use self::client::{Client, ClientDraft, ClientPatch};
pub use self::client_service::ClientService;
pub use self::error::{Error, ErrorCode, FieldErrors};
pub use self::job::{Job, JobDraft, JobPatch};
pub use self::job_service::JobService;
pub use self::order::{Order, OrderDraft, OrderPatch, OrderStatus};
pub use self::order_service::OrderService;
pub use self::projections::{
    ClientDetail, ClientOrders, ClientSummary, JobDetail, JobOrders, JobSummary, OrderDetail,
    UserProfile,
};
pub use self::user::{NewUser, User};
pub use self::user_service::UserService;
