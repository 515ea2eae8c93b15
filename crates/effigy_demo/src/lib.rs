//! EFFIGY Example Domain
//!
//! A small user-management domain that exercises the substitute engine
//! through its public contract: a data-access capability contract, a real
//! in-memory implementation, a business-logic service, and an adapter that
//! binds an engine-produced substitute behind the contract's trait surface.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod repository;
pub mod service;
pub mod substitute_repo;
pub mod user;

pub use repository::{
    InMemoryUserRepository, RepositoryError, UserRepository, user_repository_contract,
};
pub use service::{ServiceError, UserService};
pub use substitute_repo::SubstituteUserRepository;
pub use user::User;
