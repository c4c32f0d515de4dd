/// A boolean predicate over a candidate value.
pub trait Specification<T>: Send + Sync {
    fn is_satisfied_by(&self, candidate: &T) -> bool;
}

/// Adapter turning a closure into a [`Specification`].
pub struct FnSpecification<F> {
    f: F,
}

impl<F> FnSpecification<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<T, F> Specification<T> for FnSpecification<F>
where
    F: Fn(&T) -> bool + Send + Sync,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        (self.f)(candidate)
    }
}

/// Satisfied when every inner specification is satisfied.
pub struct AndSpecification<T> {
    specs: Vec<Box<dyn Specification<T>>>,
}

impl<T> AndSpecification<T> {
    pub fn new(specs: Vec<Box<dyn Specification<T>>>) -> Self {
        Self { specs }
    }
}

impl<T> Specification<T> for AndSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.specs.iter().all(|spec| spec.is_satisfied_by(candidate))
    }
}

/// Satisfied when at least one inner specification is satisfied.
pub struct OrSpecification<T> {
    specs: Vec<Box<dyn Specification<T>>>,
}

impl<T> OrSpecification<T> {
    pub fn new(specs: Vec<Box<dyn Specification<T>>>) -> Self {
        Self { specs }
    }
}

impl<T> Specification<T> for OrSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.specs.iter().any(|spec| spec.is_satisfied_by(candidate))
    }
}

/// Satisfied when none of the inner specifications are satisfied.
pub struct NotSpecification<T> {
    specs: Vec<Box<dyn Specification<T>>>,
}

impl<T> NotSpecification<T> {
    pub fn new(specs: Vec<Box<dyn Specification<T>>>) -> Self {
        Self { specs }
    }
}

impl<T> Specification<T> for NotSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        !self.specs.iter().any(|spec| spec.is_satisfied_by(candidate))
    }
}

/// Combinators for composing specifications by value.
pub trait SpecificationExt<T>: Specification<T> + Sized + 'static {
    fn and(self, other: impl Specification<T> + 'static) -> AndSpecification<T> {
        AndSpecification::new(vec![Box::new(self), Box::new(other)])
    }

    fn or(self, other: impl Specification<T> + 'static) -> OrSpecification<T> {
        OrSpecification::new(vec![Box::new(self), Box::new(other)])
    }

    fn not(self) -> NotSpecification<T> {
        NotSpecification::new(vec![Box::new(self)])
    }
}

impl<T, S> SpecificationExt<T> for S where S: Specification<T> + Sized + 'static {}
