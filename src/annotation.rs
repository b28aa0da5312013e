/*
    AnalysedText Library (Layered Text Annotation Model)

        Licensed under the GNU General Public License v3
*/

//! This module contains the annotation layer that is carried by every span: typed
//! [`AnnotationKey`]s, probability-ranked [`Value`]s and the per-span [`AnnotationStore`].

use datasize::DataSize;
use smallvec::SmallVec;
use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use std::slice::Iter;

use crate::error::NlpError;

/// Marker trait for types that can be used as the payload of an annotation [`Value`].
/// It is implemented automatically for all suitable types.
pub trait AnnotationValue: Any + fmt::Debug + Send + Sync {}

impl<T> AnnotationValue for T where T: Any + fmt::Debug + Send + Sync {}

/// Identifies a class of annotations (e.g. part-of-speech) along with the type of its payload.
///
/// Keys are compared by name *and* payload type, so two keys with the same name but different
/// payload types never collide.
pub struct AnnotationKey<T> {
    name: Cow<'static, str>,
    _marker: PhantomData<fn() -> T>, //zero-size, only needed to bind generic T
}

impl<T> AnnotationKey<T> {
    /// Creates a key with a static name, usable in `const` and `static` items
    pub const fn new(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            _marker: PhantomData,
        }
    }

    /// Creates a key with a name determined at runtime
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Clone for AnnotationKey<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for AnnotationKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("AnnotationKey")
            .field("name", &self.name)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> PartialEq for AnnotationKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for AnnotationKey<T> {}

/// A single annotation value: a payload with a probability (confidence) in `[0.0, 1.0]`.
/// Values that are created without a probability are unscored and count as `1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Value<T> {
    value: T,
    probability: Option<f64>,
}

impl<T> Value<T> {
    /// Creates an unscored value
    pub fn new(value: T) -> Self {
        Self {
            value,
            probability: None,
        }
    }

    /// Creates a value with a probability, which must lie in `[0.0, 1.0]`
    pub fn with_probability(value: T, probability: f64) -> Result<Self, NlpError> {
        if (0.0..=1.0).contains(&probability) {
            Ok(Self {
                value,
                probability: Some(probability),
            })
        } else {
            Err(NlpError::InvalidProbability(
                probability,
                "Value::with_probability",
            ))
        }
    }

    /// Creates values from `(payload, probability)` pairs, as is typically produced by a tagger
    /// that returns several alternatives. Fails on the first invalid probability.
    pub fn ranked<I>(pairs: I) -> Result<Vec<Self>, NlpError>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        pairs
            .into_iter()
            .map(|(value, probability)| Self::with_probability(value, probability))
            .collect()
    }

    /// Returns a reference to the payload
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns the probability, unscored values return `1.0`
    pub fn probability(&self) -> f64 {
        self.probability.unwrap_or(1.0)
    }

    /// Was this value created with an explicit probability?
    pub fn is_scored(&self) -> bool {
        self.probability.is_some()
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Type-erased view on a [`Value`] so values of different payload types can share storage.
pub(crate) trait ErasedValue: fmt::Debug + Send + Sync {
    fn probability(&self) -> f64;
    fn as_any(&self) -> &dyn Any;
}

impl<T> ErasedValue for Value<T>
where
    T: AnnotationValue,
{
    fn probability(&self) -> f64 {
        Value::probability(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
struct AnnotationEntry {
    name: Cow<'static, str>,
    type_id: TypeId,
    /// Kept sorted by descending probability. Heap allocation only needed when there is more than one value.
    values: SmallVec<[Box<dyn ErasedValue>; 1]>,
}

impl AnnotationEntry {
    fn sort(&mut self) {
        //stable sort, values with equal probability keep their insertion order
        self.values
            .sort_by(|a, b| b.probability().total_cmp(&a.probability()));
    }
}

/// Holds, for a single span, zero or more probability-ranked values per annotation key.
///
/// No key ever maps to an empty entry: setting an empty list of values removes the key.
#[derive(Debug, Default)]
pub struct AnnotationStore {
    entries: Vec<AnnotationEntry>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn position<T: AnnotationValue>(&self, key: &AnnotationKey<T>) -> Option<usize> {
        let type_id = TypeId::of::<T>();
        self.entries
            .iter()
            .position(|entry| entry.type_id == type_id && entry.name == key.name)
    }

    /// Returns the value with the highest probability for the key, if any
    pub fn get<T: AnnotationValue>(&self, key: &AnnotationKey<T>) -> Option<&Value<T>> {
        self.get_all(key).next()
    }

    /// Returns all values for the key, in order of descending probability
    pub fn get_all<T: AnnotationValue>(&self, key: &AnnotationKey<T>) -> Values<'_, T> {
        Values {
            iter: self
                .position(key)
                .map(|index| self.entries[index].values.iter()),
            _marker: PhantomData,
        }
    }

    /// Appends values to any already stored under the key, the values remain ordered by descending probability afterwards.
    pub fn add<T, I>(&mut self, key: &AnnotationKey<T>, values: I)
    where
        T: AnnotationValue,
        I: IntoIterator<Item = Value<T>>,
    {
        let mut values = values
            .into_iter()
            .map(|value| Box::new(value) as Box<dyn ErasedValue>)
            .peekable();
        if values.peek().is_none() {
            return;
        }
        if let Some(index) = self.position(key) {
            let entry = &mut self.entries[index];
            entry.values.extend(values);
            entry.sort();
        } else {
            let mut entry = AnnotationEntry {
                name: key.name.clone(),
                type_id: TypeId::of::<T>(),
                values: values.collect(),
            };
            entry.sort();
            self.entries.push(entry);
        }
    }

    /// Appends a single value to any already stored under the key
    pub fn add_value<T: AnnotationValue>(&mut self, key: &AnnotationKey<T>, value: Value<T>) {
        self.add(key, std::iter::once(value));
    }

    /// Replaces all values for the key. Passing no values removes the key altogether.
    pub fn set<T, I>(&mut self, key: &AnnotationKey<T>, values: I)
    where
        T: AnnotationValue,
        I: IntoIterator<Item = Value<T>>,
    {
        self.remove(key);
        self.add(key, values);
    }

    /// Replaces all values for the key by a single value
    pub fn set_value<T: AnnotationValue>(&mut self, key: &AnnotationKey<T>, value: Value<T>) {
        self.set(key, std::iter::once(value));
    }

    /// Removes the key and all its values, returns whether the key was present
    pub fn remove<T: AnnotationValue>(&mut self, key: &AnnotationKey<T>) -> bool {
        if let Some(index) = self.position(key) {
            self.entries.remove(index);
            true
        } else {
            false
        }
    }

    pub fn contains<T: AnnotationValue>(&self, key: &AnnotationKey<T>) -> bool {
        self.position(key).is_some()
    }

    /// Returns the number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all keys in insertion order, as pairs of name and payload type. Keys with the
    /// same name but different payload types are distinct and each yielded once.
    pub fn keys(&self) -> impl Iterator<Item = (&str, TypeId)> {
        self.entries
            .iter()
            .map(|entry| (entry.name.as_ref(), entry.type_id))
    }
}

impl DataSize for AnnotationStore {
    const IS_DYNAMIC: bool = true;
    const STATIC_HEAP_SIZE: usize = 0;

    fn estimate_heap_size(&self) -> usize {
        let mut size = self.entries.capacity() * std::mem::size_of::<AnnotationEntry>();
        for entry in self.entries.iter() {
            if let Cow::Owned(name) = &entry.name {
                size += name.capacity();
            }
            if entry.values.spilled() {
                size += entry.values.capacity() * std::mem::size_of::<Box<dyn ErasedValue>>();
            }
            for value in entry.values.iter() {
                size += std::mem::size_of_val(value.as_ref());
            }
        }
        size
    }
}

/// Iterator over the values of a single key, in order of descending probability.
pub struct Values<'a, T> {
    iter: Option<Iter<'a, Box<dyn ErasedValue>>>,
    _marker: PhantomData<T>,
}

impl<'a, T> Iterator for Values<'a, T>
where
    T: AnnotationValue,
{
    type Item = &'a Value<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let value = self.iter.as_mut()?.next()?;
            //the entry was selected by TypeId so this can only fail if the store is corrupt
            if let Some(value) = value.as_any().downcast_ref::<Value<T>>() {
                return Some(value);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.iter {
            Some(iter) => (0, Some(iter.len())),
            None => (0, Some(0)),
        }
    }
}
