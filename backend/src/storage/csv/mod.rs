//! # CSV Storage Module
//!
//! CSV-file implementation of the record store. Each entity kind lives in
//! one file under the connection's base directory, with a header row and
//! whole-file rewrite on mutation.
//!
//! ## File Format
//!
//! ```csv
//! id,name,email,password
//! 1,Maria,maria@example.com,secret
//! ```
//!
//! ```csv
//! id,description,month,year,amount,entry_type,status,user_id,created_at
//! 1,rent,3,2024,1200.00,EXPENSE,PENDING,1,2024-03-01
//! ```

pub mod connection;
pub mod entry_repository;
pub mod user_repository;

pub use connection::CsvConnection;
pub use entry_repository::EntryRepository;
pub use user_repository::UserRepository;
