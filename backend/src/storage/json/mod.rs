//! JSON-document filesystem store: one directory per collection, one JSON
//! file per document. Suits the tracker's equality-filter queries at
//! household scale without a database server.

pub mod connection;
pub mod family_repository;
pub mod feeding_repository;
pub mod pet_repository;
pub mod user_repository;

pub use connection::JsonConnection;
pub use family_repository::FamilyRepository;
pub use feeding_repository::FeedingRepository;
pub use pet_repository::PetRepository;
pub use user_repository::UserRepository;
