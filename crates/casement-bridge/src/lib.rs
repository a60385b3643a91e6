//! Remote invocation of backend objects from the renderer.
//!
//! Backend objects are exposed through an explicit registration step:
//! each [`BoundObject`] is a table of method descriptors (name, declared
//! parameter shapes, invoker closure) built with [`BoundObjectBuilder`].
//! The [`MethodBindingBridge`] looks invocations up in the
//! [`BoundObjectTable`], decodes arguments against the declared shapes,
//! and surfaces failures as structured [`BridgeError`] responses, never
//! as process failures.
//!
//! The bridge provides no per-object locking. A bound object that is not
//! reentrant-safe must serialize its own state (e.g. via atomics or a
//! mutex inside its closures).

pub mod binding;
pub mod invoke;
pub mod wire;

pub use binding::{
    ArgShape, BoundObject, BoundObjectBuilder, BoundObjectTable, MethodDescriptor, ParamSpec,
};
pub use casement_common::BridgeError;
pub use invoke::MethodBindingBridge;
pub use wire::{InvocationRequest, InvocationResponse};
