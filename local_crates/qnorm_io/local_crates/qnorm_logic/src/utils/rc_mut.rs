// qnorm_logic
// Copyright (C) 2021  Univ. Artois & CNRS
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use std::{cell::RefCell, fmt::Debug, ops::Deref, rc::Rc};

/// A reference-counted cell bringing interior mutability in a mono-thread context.
///
/// This structure is equivalent to an [`Rc<RefCell<T>>`].
/// It is used to share a [`Clause`](crate::Clause) between the occurrence lists of all the variables it contains:
/// an update made through one handle is visible through all the others.
///
/// # Examples
///
/// ```
/// use qnorm_logic::{Clause, RcMut, VarId};
///
/// let rc = RcMut::new(Clause::from_dimacs(&[1, -2]).unwrap());
/// let rc_bis = RcMut::clone(&rc);
/// rc.borrow_mut().replace_var(VarId::from(1), VarId::from(3));
/// assert_eq!(vec![3, -2], rc_bis.borrow().to_dimacs());
/// ```
pub struct RcMut<T>(Rc<RefCell<T>>);

impl<T> RcMut<T> {
    /// Constructs a new `RcMut<T>`.
    pub fn new(t: T) -> Self {
        RcMut(Rc::new(RefCell::new(t)))
    }

    /// Returns `true` if the two `RcMut`s point to the same allocation (in a vein similar to [`ptr::eq`]).
    ///
    /// # Examples
    ///
    /// ```
    /// use qnorm_logic::RcMut;
    ///
    /// let a  = 5;
    /// let rc = RcMut::new(a);
    /// let rc_bis = RcMut::clone(&rc);
    /// assert!(RcMut::ptr_eq(&rc, &rc_bis));
    /// assert!(!RcMut::ptr_eq(&rc, &RcMut::new(a)));
    /// ```
    ///
    /// [`ptr::eq`]: core::ptr::eq
    pub fn ptr_eq(a: &RcMut<T>, b: &RcMut<T>) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Returns the address of the shared allocation.
    ///
    /// Two `RcMut`s return the same address if and only if they are [`ptr_eq`](RcMut::ptr_eq),
    /// which makes the address usable as an identity key while the `RcMut`s are alive.
    pub fn as_ptr(this: &RcMut<T>) -> *const RefCell<T> {
        Rc::as_ptr(&this.0)
    }

    /// Makes a clone of the `RcMut` pointer.
    ///
    /// This creates another pointer to the same allocation, increasing the
    /// strong reference count.
    pub fn clone(a: &RcMut<T>) -> Self {
        RcMut(Rc::clone(&a.0))
    }
}

impl<T> Clone for RcMut<T> {
    fn clone(&self) -> Self {
        RcMut::clone(self)
    }
}

impl<T> Deref for RcMut<T> {
    type Target = RefCell<T>;

    #[inline(always)]
    fn deref(&self) -> &RefCell<T> {
        &self.0
    }
}

impl<T> Debug for RcMut<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.borrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug() {
        assert_eq!("0", format!("{:?}", RcMut::new(0)))
    }

    #[test]
    fn test_as_ptr() {
        let rc = RcMut::new(0);
        let rc_bis = rc.clone();
        assert_eq!(RcMut::as_ptr(&rc), RcMut::as_ptr(&rc_bis));
        assert_ne!(RcMut::as_ptr(&rc), RcMut::as_ptr(&RcMut::new(0)));
    }
}
