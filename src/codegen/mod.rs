//! Code Generation
//!
//! Projects the catalog onto concrete output grammars. The two emitters
//! are independent: DDL wants its input in dependency order (a foreign key
//! must name an already-creatable parent), Protobuf is order-insensitive.
//! Neither consults the registry — they compile the table sequence the
//! caller hands them.

pub mod ddl;
pub mod names;
pub mod proto;

pub use ddl::DdlGenerator;
pub use proto::ProtobufGenerator;
