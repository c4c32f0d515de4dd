//! DDD and CQRS building blocks.
//!
//! The core of the crate is a type-keyed [`MessageBus`] with a middleware
//! chain, plus two resilience decorators for message handlers:
//! [`RetryableHandler`] (fixed-interval retry) and [`CircuitBreakerHandler`]
//! (three-state breaker that sheds load from a failing downstream handler).
//!
//! Around that core sit the usual domain-layer utilities: immutable
//! [`Message`] records tagged as [`Command`] / [`Query`] / [`Event`], a base
//! [`Entity`] record, value objects, composable [`Specification`]s, input
//! validators, a generic factory, and an async in-memory repository.

mod bus;
mod entity;
mod factory;
mod handler;
mod message;
mod repository;
mod specification;
mod validation;
mod value_object;

pub use bus::{BusError, MessageBus, Middleware, Next};
pub use entity::{Entity, EntityProps};
pub use factory::{Factory, FactoryError, FnFactory};
pub use handler::{
    CircuitBreakerHandler, CircuitBreakerPolicy, CircuitState, FnHandler, FnQueryHandler, Handler,
    HandlerError, PolicyError, QueryHandler, RetryPolicy, RetryableHandler,
};
pub use message::{Command, Event, Message, MessageError, MessageProps, MessageStatus, Query};
pub use repository::{
    InMemoryRepository, ReadRepository, Repository, RepositoryError, WriteRepository,
};
pub use specification::{
    AndSpecification, FnSpecification, NotSpecification, OrSpecification, Specification,
    SpecificationBuilder, SpecificationError, SpecificationExt,
};
pub use validation::{
    build_path, index_path, ArrayValidator, BoolValidator, NumberValidator, ObjectValidator,
    StringValidator, ValidationError, ValidationResult, Validator,
};
pub use value_object::ValueObject;
