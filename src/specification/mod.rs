//! Composable boolean predicates over domain candidates.
//!
//! A [`Specification`] answers one question about a candidate. Larger
//! rules are composed with [`SpecificationExt::and`] / [`or`] / [`not`]
//! or assembled step-by-step with [`SpecificationBuilder`].
//!
//! [`or`]: SpecificationExt::or
//! [`not`]: SpecificationExt::not

mod builder;
mod error;
mod specifications;

pub use builder::SpecificationBuilder;
pub use error::SpecificationError;
pub use specifications::{
    AndSpecification, FnSpecification, NotSpecification, OrSpecification, Specification,
    SpecificationExt,
};
