//! Java source analysis for clientspec.
//!
//! Sources are parsed with tree-sitter into an owned declaration model
//! ([`model::JavaFileModel`]). The visitors in this crate then read Spring MVC
//! controllers off that model and produce the wire types of `clientspec-api`.

pub mod constants;
pub mod controller;
pub mod dynamic;
pub mod entity;
pub mod error;
pub mod mapping;
pub mod model;
pub mod parser;
pub mod queries;
pub mod spring;
pub mod template;

pub use constants::ConstantTable;
pub use controller::{ControllerVisit, ControllerVisitor, SkippedHandler, join_handler_path};
pub use dynamic::{DynamicTypeMapper, TypeScope};
pub use entity::EntityCollector;
pub use error::{JavaError, Result};
pub use mapping::{HttpMethodConverter, RequestMappingDecomposer};
pub use parser::JavaParser;
pub use template::EndpointTemplateParser;
