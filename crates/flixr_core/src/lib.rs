pub mod auth;
pub mod domain;
pub mod pagination;
pub mod ports;

pub use auth::{authenticate, is_authenticated, register, AuthFailure};
pub use domain::{
    AccountStatus, AdminSort, Credentials, Item, Principal, RatingSubmission, RecommendSort,
    Registration, UserId,
};
pub use pagination::{paginate, ListKind, PageRequest, PageResult};
pub use ports::{BackendApi, PortError, PortResult, Session, SessionId, SessionStore};
