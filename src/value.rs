use std::fmt::Debug;
use std::hash::Hash;

pub type DefaultFace = i32;

/// A label that can sit on a die face.
///
/// Faces must be totally ordered and hashable so that results can be grouped and
/// reported in a stable order. Floats are not faces; use integers, `char`, strings or
/// an enum instead.
pub trait Face: Sized + Send + Sync + Debug + Clone + PartialEq + Eq + Hash + PartialOrd + Ord {}

impl<T> Face for T where T: Sized + Send + Sync + Debug + Clone + PartialEq + Eq + Hash + Ord {}
