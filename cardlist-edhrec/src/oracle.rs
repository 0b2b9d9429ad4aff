use cardlist_core::Identifier;

/// Something that can tell whether an identifier has a page on the
/// reference service.
///
/// Implementations must not panic or return errors: any failure to obtain a
/// positive answer is reported as `false`. Rate limiting is the caller's job.
pub trait ValidityOracle {
    fn check(&mut self, identifier: &Identifier) -> bool;
}

impl<T: ValidityOracle + ?Sized> ValidityOracle for &mut T {
    fn check(&mut self, identifier: &Identifier) -> bool {
        (**self).check(identifier)
    }
}
