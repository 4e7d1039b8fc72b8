//! SurrealDB repository implementations.

mod book;
mod seller;
mod seller_request;

pub use book::SurrealBookRepository;
pub use seller::SurrealSellerRepository;
pub use seller_request::SurrealSellerRequestRepository;
