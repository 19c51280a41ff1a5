//! Element kinds, promotion, and the `Element` trait.
//!
//! The source language's lists are dynamically typed; compiled lists are
//! not. Each list instance has one [`ElemKind`] fixed at creation, and
//! narrower values are promoted into it on the way in. Promotion is
//! one-directional: `bool` → `int` → `float`. Reference elements never mix
//! with scalars.

use std::fmt;

use crate::errors::{
    cannot_infer_empty_kind, no_common_kind, not_representable, ListError, ListResult,
};
use crate::refs::RefHandle;

/// The representation shared by every element of one list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElemKind {
    Bool,
    Int,
    Float,
    Ref,
}

impl ElemKind {
    pub fn name(self) -> &'static str {
        match self {
            ElemKind::Bool => "bool",
            ElemKind::Int => "int",
            ElemKind::Float => "float",
            ElemKind::Ref => "ref",
        }
    }

    /// Position on the numeric promotion ladder; `None` for references.
    fn numeric_rank(self) -> Option<u8> {
        match self {
            ElemKind::Bool => Some(0),
            ElemKind::Int => Some(1),
            ElemKind::Float => Some(2),
            ElemKind::Ref => None,
        }
    }

    /// The narrowest kind both `self` and `other` promote to, if any.
    pub fn unify(self, other: ElemKind) -> Option<ElemKind> {
        if self == other {
            return Some(self);
        }
        match (self.numeric_rank(), other.numeric_rank()) {
            (Some(a), Some(b)) => Some(if a >= b { self } else { other }),
            _ => None,
        }
    }

    /// Whether a value of kind `self` can be stored in a list of `target`.
    pub fn promotes_to(self, target: ElemKind) -> bool {
        self.unify(target) == Some(target)
    }
}

impl fmt::Display for ElemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Infer the element kind of a list built from `values`.
///
/// `hint` seeds the unification (a declared kind); it widens like any other
/// kind if the values need it. Fails when two kinds have no common kind, or
/// when there is nothing to infer from.
pub fn unify_kinds(hint: Option<ElemKind>, values: &[Value]) -> ListResult<ElemKind> {
    let mut kind = hint;
    for value in values {
        let next = value.kind();
        kind = Some(match kind {
            None => next,
            Some(current) => current
                .unify(next)
                .ok_or_else(|| no_common_kind(current, next))?,
        });
    }
    kind.ok_or_else(cannot_infer_empty_kind)
}

/// One element in dynamic form.
#[derive(Clone, Copy, Debug)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Ref(RefHandle),
}

impl Value {
    pub fn kind(&self) -> ElemKind {
        match self {
            Value::Bool(_) => ElemKind::Bool,
            Value::Int(_) => ElemKind::Int,
            Value::Float(_) => ElemKind::Float,
            Value::Ref(_) => ElemKind::Ref,
        }
    }

    /// Integer view of a `Bool` or `Int`.
    fn as_int(&self) -> Option<i64> {
        match *self {
            Value::Bool(b) => Some(i64::from(b)),
            Value::Int(i) => Some(i),
            Value::Float(_) | Value::Ref(_) => None,
        }
    }
}

/// Exact float/int comparison: `2.0 == 2` but `2.5 != 2`, and no rounding
/// of large integers through `f64`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "truncation is only reached for integral floats within i64 range"
)]
fn float_eq_int(f: f64, i: i64) -> bool {
    // 2^63 is exactly representable; i64 covers [-2^63, 2^63).
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    f.fract() == 0.0 && (-BOUND..BOUND).contains(&f) && f as i64 == i
}

/// Numeric values compare across kinds the way the source language's `==`
/// does (`True == 1 == 1.0`); references compare by identity and never equal
/// a number.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Value::Ref(a), Value::Ref(b)) => a == b,
            (Value::Ref(_), _) | (_, Value::Ref(_)) => false,
            #[allow(clippy::float_cmp, reason = "language equality is exact")]
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Float(f), other) | (other, Value::Float(f)) => {
                other.as_int().is_some_and(|i| float_eq_int(f, i))
            }
            (a, b) => a.as_int() == b.as_int(),
        }
    }
}

/// A statically typed list element.
///
/// The implementing type fixes the list's [`ElemKind`]. Elements are plain
/// bit patterns (`Copy`); ownership of whatever they refer to is tracked
/// through [`acquire`](Element::acquire) and [`release`](Element::release),
/// which the list calls exactly once for every element entering and leaving
/// it. Scalar kinds use the default no-op hooks.
pub trait Element: Copy + PartialEq + fmt::Debug + 'static {
    const KIND: ElemKind;

    /// Called once when this element enters a list.
    #[inline]
    fn acquire(&self) {}

    /// Called once when this element leaves a list without being handed to
    /// the caller.
    #[inline]
    fn release(&self) {}

    /// Promote a dynamic value into this kind, or fail with `TypeError`.
    fn from_value(value: Value) -> Result<Self, ListError>;

    fn into_value(self) -> Value;
}

impl Element for bool {
    const KIND: ElemKind = ElemKind::Bool;

    fn from_value(value: Value) -> Result<Self, ListError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(not_representable(other.kind(), Self::KIND)),
        }
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl Element for i64 {
    const KIND: ElemKind = ElemKind::Int;

    fn from_value(value: Value) -> Result<Self, ListError> {
        match value {
            Value::Bool(b) => Ok(i64::from(b)),
            Value::Int(i) => Ok(i),
            other => Err(not_representable(other.kind(), Self::KIND)),
        }
    }

    fn into_value(self) -> Value {
        Value::Int(self)
    }
}

impl Element for f64 {
    const KIND: ElemKind = ElemKind::Float;

    #[expect(
        clippy::cast_precision_loss,
        reason = "int-to-float promotion rounds like the source language"
    )]
    fn from_value(value: Value) -> Result<Self, ListError> {
        match value {
            Value::Bool(b) => Ok(f64::from(u8::from(b))),
            Value::Int(i) => Ok(i as f64),
            Value::Float(f) => Ok(f),
            Value::Ref(_) => Err(not_representable(ElemKind::Ref, Self::KIND)),
        }
    }

    fn into_value(self) -> Value {
        Value::Float(self)
    }
}
