//! Tabular test-data synthesis engine.
//!
//! A [`Dataset`] owns an ordered set of typed [`fields::Field`] generators
//! and turns them into one row-oriented table; [`DatasetManager`] persists a
//! collection of datasets as a single JSON document and reconstructs it
//! losslessly through the field [`factory`].

pub mod dataset;
pub mod error;
pub mod factory;
pub mod fields;
pub mod manager;
pub mod params;
pub mod rng;
pub mod source;
pub mod value;

pub use dataset::{Dataset, ExportFormat};
pub use error::{Error, Result};
pub use fields::Field;
pub use manager::DatasetManager;
pub use source::{FetchMode, TableData};
pub use value::FieldValue;
