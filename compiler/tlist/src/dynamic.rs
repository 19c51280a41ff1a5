//! Lists whose element kind is decided at run time.
//!
//! [`AnyList`] wraps one [`TypedList`] per element kind. It is what a
//! list literal or `list(iterable)` lowers to when the kind comes from the
//! values themselves: the kinds are unified once, the matching typed list is
//! built, and every later value is promoted into that kind (or rejected with
//! `TypeError`).

use std::fmt;

use tlist_alloc::GrowthPolicy;
use tlist_core::{
    index_not_found, no_common_kind, unify_kinds, ElemKind, Element, ListResult, RefHandle, Value,
};

use crate::index::SliceSpec;
use crate::list::TypedList;

/// A typed list of any element kind.
pub enum AnyList {
    Bool(TypedList<bool>),
    Int(TypedList<i64>),
    Float(TypedList<f64>),
    Ref(TypedList<RefHandle>),
}

/// Run `$body` with `$list` bound to the wrapped typed list.
macro_rules! dispatch {
    ($self:expr, $list:ident => $body:expr) => {
        match $self {
            AnyList::Bool($list) => $body,
            AnyList::Int($list) => $body,
            AnyList::Float($list) => $body,
            AnyList::Ref($list) => $body,
        }
    };
}

/// Like `dispatch!`, re-wrapping the resulting typed list in the same kind.
macro_rules! rewrap {
    ($self:expr, $list:ident => $body:expr) => {
        match $self {
            AnyList::Bool($list) => AnyList::Bool($body),
            AnyList::Int($list) => AnyList::Int($body),
            AnyList::Float($list) => AnyList::Float($body),
            AnyList::Ref($list) => AnyList::Ref($body),
        }
    };
}

impl AnyList {
    /// An empty list of `kind`.
    pub fn empty(kind: ElemKind) -> Self {
        Self::empty_with_policy(kind, GrowthPolicy::DEFAULT)
    }

    pub fn empty_with_policy(kind: ElemKind, policy: GrowthPolicy) -> Self {
        match kind {
            ElemKind::Bool => AnyList::Bool(TypedList::with_policy(policy)),
            ElemKind::Int => AnyList::Int(TypedList::with_policy(policy)),
            ElemKind::Float => AnyList::Float(TypedList::with_policy(policy)),
            ElemKind::Ref => AnyList::Ref(TypedList::with_policy(policy)),
        }
    }

    /// Build a list from `values`, sized exactly to them.
    ///
    /// The element kind is the unification of `hint` (a declared kind, which
    /// widens if the values need it) and every value's kind. An empty
    /// `values` with no hint has nothing to infer from and fails.
    pub fn from_values(hint: Option<ElemKind>, values: &[Value]) -> ListResult<Self> {
        let kind = unify_kinds(hint, values)?;
        Ok(match kind {
            ElemKind::Bool => AnyList::Bool(build(values)?),
            ElemKind::Int => AnyList::Int(build(values)?),
            ElemKind::Float => AnyList::Float(build(values)?),
            ElemKind::Ref => AnyList::Ref(build(values)?),
        })
    }

    pub fn kind(&self) -> ElemKind {
        match self {
            AnyList::Bool(_) => ElemKind::Bool,
            AnyList::Int(_) => ElemKind::Int,
            AnyList::Float(_) => ElemKind::Float,
            AnyList::Ref(_) => ElemKind::Ref,
        }
    }

    pub fn policy(&self) -> GrowthPolicy {
        dispatch!(self, list => list.policy())
    }

    pub fn len(&self) -> usize {
        dispatch!(self, list => list.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `bool(list)`
    pub fn is_truthy(&self) -> bool {
        !self.is_empty()
    }

    /// Element at a position already known to be in range.
    fn value_at(&self, pos: usize) -> Value {
        dispatch!(self, list => list.as_slice()[pos].into_value())
    }

    /// Every element in dynamic form, in order.
    pub fn to_values(&self) -> Vec<Value> {
        (0..self.len()).map(|pos| self.value_at(pos)).collect()
    }

    // ── Scalar access ──

    pub fn get_value(&self, index: i64) -> ListResult<Value> {
        dispatch!(self, list => list.get(index).map(|item| item.into_value()))
    }

    /// `list[index] = value`, promoting `value` into the list's kind.
    pub fn set_value(&mut self, index: i64, value: Value) -> ListResult<()> {
        dispatch!(self, list => list.set(index, Element::from_value(value)?))
    }

    /// `del list[index]`
    pub fn delete(&mut self, index: i64) -> ListResult<()> {
        dispatch!(self, list => list.delete(index))
    }

    // ── Growth ──

    pub fn append_value(&mut self, value: Value) -> ListResult<()> {
        dispatch!(self, list => list.append(Element::from_value(value)?))
    }

    pub fn insert_value(&mut self, pos: i64, value: Value) -> ListResult<()> {
        dispatch!(self, list => list.insert(pos, Element::from_value(value)?))
    }

    /// Append every value, or none: a value that does not promote rolls the
    /// list back.
    pub fn extend_values(&mut self, values: &[Value]) -> ListResult<()> {
        dispatch!(self, list => extend_promoted(list, values))
    }

    /// `list.extend(other)`, promoting `other`'s elements into this kind.
    pub fn extend_from(&mut self, other: &AnyList) -> ListResult<()> {
        match (self, other) {
            (AnyList::Bool(a), AnyList::Bool(b)) => a.extend_from_slice(b.as_slice()),
            (AnyList::Int(a), AnyList::Int(b)) => a.extend_from_slice(b.as_slice()),
            (AnyList::Float(a), AnyList::Float(b)) => a.extend_from_slice(b.as_slice()),
            (AnyList::Ref(a), AnyList::Ref(b)) => a.extend_from_slice(b.as_slice()),
            (this, other) => this.extend_values(&other.to_values()),
        }
    }

    /// `list.extend(list)`
    pub fn extend_self(&mut self) -> ListResult<()> {
        dispatch!(self, list => list.extend_self())
    }

    // ── Removal ──

    /// `list.pop(index)`. The element's reference moves to the caller.
    pub fn pop_value(&mut self, index: Option<i64>) -> ListResult<Value> {
        dispatch!(self, list => list.pop(index).map(Element::into_value))
    }

    /// `list.remove(value)`, comparing with the language's `==`.
    pub fn remove_value(&mut self, value: &Value) -> ListResult<()> {
        dispatch!(self, list => list.remove_first(|item| item.into_value() == *value))
    }

    pub fn clear(&mut self) {
        dispatch!(self, list => list.clear());
    }

    pub fn reverse(&mut self) {
        dispatch!(self, list => list.reverse());
    }

    // ── Queries ──

    /// `value in list`, comparing with the language's `==` (`1 in [1.0]`).
    pub fn contains_value(&self, value: &Value) -> bool {
        (0..self.len()).any(|pos| self.value_at(pos) == *value)
    }

    pub fn count_value(&self, value: &Value) -> usize {
        (0..self.len())
            .filter(|&pos| self.value_at(pos) == *value)
            .count()
    }

    pub fn index_value(
        &self,
        value: &Value,
        start: Option<i64>,
        stop: Option<i64>,
    ) -> ListResult<usize> {
        dispatch!(self, list => list
            .position_in(start, stop, |item| item.into_value() == *value)
            .ok_or_else(index_not_found))
    }

    // ── Slices ──

    pub fn get_slice(&self, spec: SliceSpec) -> ListResult<AnyList> {
        Ok(rewrap!(self, list => list.get_slice(spec)?))
    }

    /// `list[a:b:k] = replacement`, promoting the replacement first so a
    /// kind mismatch fails before anything moves.
    pub fn set_slice(&mut self, spec: SliceSpec, replacement: &AnyList) -> ListResult<()> {
        match (self, replacement) {
            (AnyList::Bool(a), AnyList::Bool(b)) => a.set_slice(spec, b.as_slice()),
            (AnyList::Int(a), AnyList::Int(b)) => a.set_slice(spec, b.as_slice()),
            (AnyList::Float(a), AnyList::Float(b)) => a.set_slice(spec, b.as_slice()),
            (AnyList::Ref(a), AnyList::Ref(b)) => a.set_slice(spec, b.as_slice()),
            (this, other) => {
                let values = other.to_values();
                dispatch!(this, list => set_slice_promoted(list, spec, &values))
            }
        }
    }

    pub fn del_slice(&mut self, spec: SliceSpec) -> ListResult<()> {
        dispatch!(self, list => list.del_slice(spec))
    }

    // ── Operators ──

    pub fn copy(&self) -> ListResult<AnyList> {
        Ok(rewrap!(self, list => list.copy()?))
    }

    /// `self + other`. Mixed numeric kinds produce the unified kind;
    /// references never mix with scalars.
    pub fn concat(&self, other: &AnyList) -> ListResult<AnyList> {
        match (self, other) {
            (AnyList::Bool(a), AnyList::Bool(b)) => Ok(AnyList::Bool(a.concat(b)?)),
            (AnyList::Int(a), AnyList::Int(b)) => Ok(AnyList::Int(a.concat(b)?)),
            (AnyList::Float(a), AnyList::Float(b)) => Ok(AnyList::Float(a.concat(b)?)),
            (AnyList::Ref(a), AnyList::Ref(b)) => Ok(AnyList::Ref(a.concat(b)?)),
            _ => {
                let kind = self
                    .kind()
                    .unify(other.kind())
                    .ok_or_else(|| no_common_kind(self.kind(), other.kind()))?;
                let mut out = AnyList::empty_with_policy(kind, self.policy());
                out.extend_from(self)?;
                out.extend_from(other)?;
                Ok(out)
            }
        }
    }

    /// `self * times`
    pub fn repeat(&self, times: i64) -> ListResult<AnyList> {
        Ok(rewrap!(self, list => list.repeat(times)?))
    }
}

fn build<T: Element>(values: &[Value]) -> ListResult<TypedList<T>> {
    let mut list = TypedList::with_capacity(values.len())?;
    extend_promoted(&mut list, values)?;
    Ok(list)
}

fn extend_promoted<T: Element>(list: &mut TypedList<T>, values: &[Value]) -> ListResult<()> {
    list.try_extend(values.iter().map(|&value| T::from_value(value)))
}

fn set_slice_promoted<T: Element>(
    list: &mut TypedList<T>,
    spec: SliceSpec,
    values: &[Value],
) -> ListResult<()> {
    let items = values
        .iter()
        .map(|&value| T::from_value(value))
        .collect::<ListResult<Vec<T>>>()?;
    list.set_slice(spec, &items)
}

macro_rules! impl_from_typed {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<TypedList<$ty>> for AnyList {
                fn from(list: TypedList<$ty>) -> Self {
                    AnyList::$variant(list)
                }
            }
        )*
    };
}

impl_from_typed! {
    bool => Bool,
    i64 => Int,
    f64 => Float,
    RefHandle => Ref,
}

/// Elementwise with the language's `==`, so `[1, 2] == [1.0, 2.0]`.
impl PartialEq for AnyList {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && (0..self.len()).all(|pos| self.value_at(pos) == other.value_at(pos))
    }
}

impl fmt::Debug for AnyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, list => fmt::Debug::fmt(list, f))
    }
}

#[cfg(test)]
mod tests;
