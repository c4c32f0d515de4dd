use super::error::SpecificationError;
use super::specifications::{
    AndSpecification, NotSpecification, OrSpecification, Specification,
};

/// Step-by-step assembly of a composite specification.
///
/// The builder must be seeded with [`with_specification`] before any
/// combinator is applied; otherwise each call fails with
/// [`SpecificationError::NotSet`].
///
/// ```ignore
/// let spec = SpecificationBuilder::new()
///     .with_specification(Box::new(active_user()))
///     .and(Box::new(adult()))?
///     .build()?;
/// ```
///
/// [`with_specification`]: SpecificationBuilder::with_specification
pub struct SpecificationBuilder<T> {
    spec: Option<Box<dyn Specification<T>>>,
}

impl<T: 'static> Default for SpecificationBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> SpecificationBuilder<T> {
    pub fn new() -> Self {
        Self { spec: None }
    }

    /// Seed (or replace) the specification under construction.
    pub fn with_specification(mut self, spec: Box<dyn Specification<T>>) -> Self {
        self.spec = Some(spec);
        self
    }

    pub fn and(mut self, other: Box<dyn Specification<T>>) -> Result<Self, SpecificationError> {
        let current = self.spec.take().ok_or(SpecificationError::NotSet)?;
        self.spec = Some(Box::new(AndSpecification::new(vec![current, other])));
        Ok(self)
    }

    pub fn or(mut self, other: Box<dyn Specification<T>>) -> Result<Self, SpecificationError> {
        let current = self.spec.take().ok_or(SpecificationError::NotSet)?;
        self.spec = Some(Box::new(OrSpecification::new(vec![current, other])));
        Ok(self)
    }

    pub fn not(mut self) -> Result<Self, SpecificationError> {
        let current = self.spec.take().ok_or(SpecificationError::NotSet)?;
        self.spec = Some(Box::new(NotSpecification::new(vec![current])));
        Ok(self)
    }

    pub fn build(self) -> Result<Box<dyn Specification<T>>, SpecificationError> {
        self.spec.ok_or(SpecificationError::NotSet)
    }
}
