use std::marker::PhantomData;
use std::{fmt, ptr, slice};

use crate::{Error, Result, Shape};

/// A non-owning view of contiguous memory shaped by a [`Shape`].
///
/// The view stores a raw pointer and a shape; it never allocates, copies or
/// frees the buffer it looks at, and dropping it is a no-op. The buffer must
/// outlive the view, which the borrow in [`View::new`] enforces. Indexing
/// maps a multidimensional index, itself a [`Shape`] value congruent to the
/// view's shape, to the element at its row-major rank.
pub struct View<'a, T> {
    ptr: *const T,
    shape: Shape,
    _marker: PhantomData<&'a [T]>,
}

/// The mutable counterpart of [`View`].
///
/// Mutations through the references it hands out are visible through any
/// other pointer to the same storage once the view's borrow ends.
pub struct ViewMut<'a, T> {
    ptr: *mut T,
    shape: Shape,
    _marker: PhantomData<&'a mut [T]>,
}

macro_rules! view_common {
    ($view:ident) => {
        impl<'a, T> $view<'a, T> {
            /// The stored shape.
            pub fn shape(&self) -> &Shape {
                &self.shape
            }

            /// Total number of addressable elements, as implied by the
            /// stored shape.
            pub fn size(&self) -> usize {
                self.shape.size()
            }

            pub fn is_empty(&self) -> bool {
                self.size() == 0
            }

            /// The elements as one contiguous slice, in row-major order.
            ///
            /// Empty for the null view.
            pub fn as_slice(&self) -> &[T] {
                if self.ptr.is_null() {
                    &[]
                } else {
                    unsafe { slice::from_raw_parts(self.ptr as *const T, self.size()) }
                }
            }

            /// Visits every element exactly once, last axis fastest. The
            /// traversal order matches the offsets produced by indexing:
            /// walking the valid indices in lexicographic order yields the
            /// same elements in the same order.
            pub fn iter(&self) -> slice::Iter<'_, T> {
                self.as_slice().iter()
            }

            /// Checked lookup: faults unless `index` is congruent to the
            /// view's shape with every coordinate in range.
            pub fn get(&self, index: &Shape) -> Result<&T> {
                let offset = self.shape.offset_of(index)?;
                Ok(unsafe { &*self.ptr.add(offset) })
            }

            /// Unchecked lookup: no congruence or range validation at all.
            ///
            /// # Safety
            ///
            /// `self.shape().contains(index)` must hold; otherwise the
            /// computed offset is unspecified and the dereference is
            /// undefined behavior.
            pub unsafe fn get_unchecked(&self, index: &Shape) -> &T {
                &*self.ptr.add(self.shape.offset_of_unchecked(index))
            }
        }

        impl<T> Default for $view<'_, T> {
            fn default() -> Self {
                Self::empty()
            }
        }

        impl<T> fmt::Debug for $view<'_, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($view))
                    .field("data", &self.ptr)
                    .field("shape", &self.shape)
                    .finish()
            }
        }

        impl<T, I: Into<Shape>> std::ops::Index<I> for $view<'_, T> {
            type Output = T;

            /// Checked indexing; panics on an incongruent or out-of-range
            /// index, like slice indexing does. The original unchecked
            /// contract lives in [`get_unchecked`](Self::get_unchecked).
            fn index(&self, index: I) -> &T {
                match self.get(&index.into()) {
                    Ok(element) => element,
                    Err(e) => panic!("{e}"),
                }
            }
        }
    };
}

view_common!(View);
view_common!(ViewMut);

impl<'a, T> View<'a, T> {
    /// A view of nothing: null data pointer and the zero shape.
    pub fn empty() -> Self {
        Self {
            ptr: ptr::null(),
            shape: Shape::default(),
            _marker: PhantomData,
        }
    }

    /// A shared view over `buffer` shaped by `shape`.
    ///
    /// Faults unless the buffer holds exactly `shape.size()` elements.
    pub fn new(buffer: &'a [T], shape: impl Into<Shape>) -> Result<Self> {
        let shape = shape.into();
        let size = shape.size();
        if buffer.len() != size {
            return Err(Error::BufferMismatch {
                len: buffer.len(),
                shape,
                size,
            });
        }
        Ok(Self {
            ptr: buffer.as_ptr(),
            shape,
            _marker: PhantomData,
        })
    }

    /// Wraps a raw pointer and a shape verbatim, with no validation.
    ///
    /// # Safety
    ///
    /// `ptr` must point to at least `shape.size()` initialized elements
    /// that stay live for `'a`, and nothing may mutate them for `'a`.
    pub unsafe fn from_raw_parts(ptr: *const T, shape: Shape) -> Self {
        Self {
            ptr,
            shape,
            _marker: PhantomData,
        }
    }

    /// The stored pointer, unchanged. Null for [`View::empty`].
    pub fn data(&self) -> *const T {
        self.ptr
    }

    /// Consumes the view, releasing the borrow as a plain slice.
    pub fn into_slice(self) -> &'a [T] {
        if self.ptr.is_null() {
            &[]
        } else {
            unsafe { slice::from_raw_parts(self.ptr, self.shape.size()) }
        }
    }
}

impl<'a, T> ViewMut<'a, T> {
    /// A view of nothing: null data pointer and the zero shape.
    pub fn empty() -> Self {
        Self {
            ptr: ptr::null_mut(),
            shape: Shape::default(),
            _marker: PhantomData,
        }
    }

    /// A mutable view over `buffer` shaped by `shape`.
    ///
    /// Faults unless the buffer holds exactly `shape.size()` elements.
    pub fn new(buffer: &'a mut [T], shape: impl Into<Shape>) -> Result<Self> {
        let shape = shape.into();
        let size = shape.size();
        if buffer.len() != size {
            return Err(Error::BufferMismatch {
                len: buffer.len(),
                shape,
                size,
            });
        }
        Ok(Self {
            ptr: buffer.as_mut_ptr(),
            shape,
            _marker: PhantomData,
        })
    }

    /// Wraps a raw pointer and a shape verbatim, with no validation.
    ///
    /// # Safety
    ///
    /// `ptr` must point to at least `shape.size()` initialized elements
    /// that stay live for `'a`, and nothing else may read or write them
    /// for `'a`.
    pub unsafe fn from_raw_parts(ptr: *mut T, shape: Shape) -> Self {
        Self {
            ptr,
            shape,
            _marker: PhantomData,
        }
    }

    /// The stored pointer, unchanged. Null for [`ViewMut::empty`].
    pub fn data(&self) -> *mut T {
        self.ptr
    }

    /// The elements as one contiguous mutable slice, in row-major order.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        if self.ptr.is_null() {
            &mut []
        } else {
            unsafe { slice::from_raw_parts_mut(self.ptr, self.shape.size()) }
        }
    }

    /// Like [`iter`](Self::iter), handing out mutable references.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_slice_mut().iter_mut()
    }

    /// Checked mutable lookup.
    pub fn get_mut(&mut self, index: &Shape) -> Result<&mut T> {
        let offset = self.shape.offset_of(index)?;
        Ok(unsafe { &mut *self.ptr.add(offset) })
    }

    /// Unchecked mutable lookup.
    ///
    /// # Safety
    ///
    /// Same contract as [`get_unchecked`](Self::get_unchecked).
    pub unsafe fn get_unchecked_mut(&mut self, index: &Shape) -> &mut T {
        &mut *self.ptr.add(self.shape.offset_of_unchecked(index))
    }

    /// A shorter-lived mutable view of the same buffer.
    pub fn reborrow(&mut self) -> ViewMut<'_, T> {
        ViewMut {
            ptr: self.ptr,
            shape: self.shape.clone(),
            _marker: PhantomData,
        }
    }

    /// A shared view of the same buffer.
    pub fn as_view(&self) -> View<'_, T> {
        View {
            ptr: self.ptr,
            shape: self.shape.clone(),
            _marker: PhantomData,
        }
    }

    /// Consumes the view, releasing the full borrow as a plain slice.
    pub fn into_slice_mut(self) -> &'a mut [T] {
        if self.ptr.is_null() {
            &mut []
        } else {
            unsafe { slice::from_raw_parts_mut(self.ptr, self.shape.size()) }
        }
    }
}

impl<T> Clone for View<'_, T> {
    fn clone(&self) -> Self {
        Self {
            ptr: self.ptr,
            shape: self.shape.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, I: Into<Shape>> std::ops::IndexMut<I> for ViewMut<'_, T> {
    fn index_mut(&mut self, index: I) -> &mut T {
        match self.get_mut(&index.into()) {
            Ok(element) => element,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<'v, T> IntoIterator for &'v View<'_, T> {
    type Item = &'v T;
    type IntoIter = slice::Iter<'v, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for View<'a, T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_slice().iter()
    }
}

impl<'v, T> IntoIterator for &'v ViewMut<'_, T> {
    type Item = &'v T;
    type IntoIter = slice::Iter<'v, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'v, T> IntoIterator for &'v mut ViewMut<'_, T> {
    type Item = &'v mut T;
    type IntoIter = slice::IterMut<'v, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<'a, T> IntoIterator for ViewMut<'a, T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_slice_mut().iter_mut()
    }
}

// Aliasing follows &[T] and &mut [T]; the raw pointers only make the
// auto-traits opt out by default.
unsafe impl<T: Sync> Send for View<'_, T> {}
unsafe impl<T: Sync> Sync for View<'_, T> {}
unsafe impl<T: Send> Send for ViewMut<'_, T> {}
unsafe impl<T: Sync> Sync for ViewMut<'_, T> {}
