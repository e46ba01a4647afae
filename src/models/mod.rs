//! Models module for the SDK
//!
//! Defines the data structures shared by import, conversion and export:
//! the schema tree, the imported Swagger document and the Postman collection.

pub mod collection;
pub mod schema;
pub mod swagger;

pub use collection::{
    BASE_URL_VARIABLE, BodyMode, Collection, CollectionInfo, Event, FormField, Header, Item,
    POSTMAN_SCHEMA_V2_1, PathVariable, QueryParam, Request, RequestBody, Script, Url, Variable,
};
pub use schema::{Literal, LiteralCoercion, SchemaNode, SchemaTypes};
pub use swagger::{
    ApiDocument, ApiInfo, HttpMethod, Operation, Parameter, ParameterLocation, PathItem,
};
