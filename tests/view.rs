use ndview::{shape, Context, Error, Shape, View, ViewMut};
use rand::{rngs::StdRng, Rng, SeedableRng};

macro_rules! test_element_type {
    ($dtype:ty, $make:expr, $mod:ident) => {
        mod $mod {
            use super::*;

            fn values() -> Vec<$dtype> {
                (0..6).map($make).collect()
            }

            #[test]
            fn row_major_matrix() {
                let mut buffer = values();
                let expected = values();
                let view = ViewMut::new(&mut buffer, shape!((2, 3))).unwrap();
                assert_eq!(view.size(), 6);
                for r in 0..2usize {
                    for c in 0..3usize {
                        assert_eq!(view[(r, c)], expected[r * 3 + c]);
                    }
                }
            }

            #[test]
            fn traversal_matches_buffer() {
                let mut buffer = values();
                let expected = values();
                let view = ViewMut::new(&mut buffer, shape!((2, 3))).unwrap();
                let walked: Vec<$dtype> = view.iter().copied().collect();
                assert_eq!(walked, expected);
            }

            #[test]
            fn writes_alias_the_buffer() {
                let mut buffer = values();
                let probe = $make(17);
                let mut view = ViewMut::new(&mut buffer, shape!((2, 3))).unwrap();
                view[(1usize, 2usize)] = probe;
                assert_eq!(view[(1usize, 2usize)], probe);
                assert_eq!(buffer[5], probe);
            }
        }
    };
}

test_element_type!(f32, |i| i as f32 * 1.5, f32_test);
test_element_type!(f64, |i| i as f64 * 2.5, f64_test);
test_element_type!(i64, |i| i as i64 - 3, i64_test);
test_element_type!(u8, |i| i as u8 + 1, u8_test);

#[test]
fn two_by_three_scenario() {
    let mut buffer = vec![10, 20, 30, 40, 50, 60];
    let view = ViewMut::new(&mut buffer, shape!((2, 3))).unwrap();
    assert_eq!(view.size(), 6);
    assert_eq!(view[(0usize, 0usize)], 10);
    assert_eq!(view[(1usize, 2usize)], 60);
    assert_eq!(
        view.iter().copied().collect::<Vec<_>>(),
        vec![10, 20, 30, 40, 50, 60],
    );
}

#[test]
fn single_element_scenario() {
    let mut buffer = vec![7];
    let view = ViewMut::new(&mut buffer, shape!(1)).unwrap();
    assert_eq!(view.size(), 1);
    assert_eq!(view[0usize], 7);
    let mut elements = view.iter();
    assert_eq!(elements.next(), Some(&7));
    assert_eq!(elements.next(), None);
}

#[test]
fn empty_view() {
    let view = ViewMut::<f32>::empty();
    assert!(view.data().is_null());
    assert_eq!(view.size(), 0);
    assert_eq!(view.iter().count(), 0);
    assert_eq!(*view.shape(), Shape::default());

    let default: View<u8> = View::default();
    assert!(default.data().is_null());
    assert!(default.is_empty());
}

#[test]
fn accessors_are_idempotent() {
    let buffer = vec![1u8, 2, 3, 4];
    let view = View::new(&buffer, shape!((2, 2))).unwrap();
    assert_eq!(view.shape(), view.shape());
    assert_eq!(view.size(), view.size());
    assert_eq!(view.data(), view.data());
}

#[test]
fn buffer_shape_mismatch_faults() {
    let buffer = vec![1, 2, 3];
    let err = View::new(&buffer, shape!((2, 3))).unwrap_err();
    assert!(matches!(err, Error::BufferMismatch { len: 3, size: 6, .. }));
}

#[test]
fn checked_lookup_faults() {
    let buffer = vec![1, 2, 3, 4, 5, 6];
    let view = View::new(&buffer, shape!((2, 3))).unwrap();
    assert!(matches!(
        view.get(&Shape::from((2usize, 0usize))).unwrap_err(),
        Error::OutOfRange {
            coordinate: 2,
            extent: 2
        }
    ));
    let err = view
        .get(&shape!(5))
        .context("reading the probe element")
        .unwrap_err();
    assert!(err.to_string().contains("reading the probe element"));
}

#[test]
#[should_panic(expected = "out of range")]
fn operator_indexing_panics_out_of_range() {
    let buffer = vec![1, 2, 3, 4, 5, 6];
    let view = View::new(&buffer, shape!((2, 3))).unwrap();
    let _ = view[(0usize, 3usize)];
}

#[test]
fn indexing_matches_traversal_order() {
    let mut buffer: Vec<usize> = (0..12).collect();
    let shape = shape!(((2, 2), 3));
    let view = ViewMut::new(&mut buffer, shape.clone()).unwrap();
    let walked: Vec<usize> = view.iter().copied().collect();
    for (rank, index) in shape.indices().enumerate() {
        assert_eq!(view[&index], walked[rank]);
    }
}

#[test]
fn round_trip_writes() {
    let shape = shape!((3, (2, 2)));
    let mut buffer = vec![0usize; shape.size()];
    let mut view = ViewMut::new(&mut buffer, shape.clone()).unwrap();
    for (rank, index) in shape.indices().enumerate() {
        *view.get_mut(&index).unwrap() = rank * 10;
    }
    for (rank, index) in shape.indices().enumerate() {
        assert_eq!(*view.get(&index).unwrap(), rank * 10);
    }
    assert_eq!(view.as_slice_mut().last(), Some(&110));
}

#[test]
fn unchecked_lookup_matches_checked() {
    let buffer: Vec<i32> = (0..24).collect();
    let shape = shape!((2, 3, 4));
    let view = View::new(&buffer, shape.clone()).unwrap();
    for index in shape.indices() {
        let checked = *view.get(&index).unwrap();
        let unchecked = unsafe { *view.get_unchecked(&index) };
        assert_eq!(checked, unchecked);
    }
}

#[test]
fn raw_parts_round_trip() {
    let mut buffer = vec![1.0f32, 2.0, 3.0, 4.0];
    let ptr = buffer.as_mut_ptr();
    let mut view = unsafe { ViewMut::from_raw_parts(ptr, Shape::from((2usize, 2usize))) };
    assert_eq!(view.data(), ptr);
    view[(1usize, 1usize)] = 9.0;
    assert_eq!(buffer[3], 9.0);
}

#[test]
fn reborrow_and_shared_view() {
    let mut buffer = vec![1, 2, 3, 4];
    let mut view = ViewMut::new(&mut buffer, shape!((2, 2))).unwrap();
    {
        let mut inner = view.reborrow();
        inner[(0usize, 1usize)] = 20;
    }
    let shared = view.as_view();
    assert_eq!(shared[(0usize, 1usize)], 20);
    assert_eq!(shared.as_slice(), &[1, 20, 3, 4]);
}

#[test]
fn randomized_round_trip() {
    let mut rng = StdRng::seed_from_u64(0xD1CE);
    let shape = shape!((4, (3, 2), 5));
    let mut buffer = vec![0.0f64; shape.size()];
    let mut view = ViewMut::new(&mut buffer, shape.clone()).unwrap();
    let written: Vec<f64> = shape.indices().map(|_| rng.gen()).collect();
    for (index, value) in shape.indices().zip(&written) {
        *view.get_mut(&index).unwrap() = *value;
    }
    assert_eq!(view.as_view().as_slice(), written.as_slice());
}

fn checked_corner(view: &View<i32>) -> ndview::Result<i32> {
    let last = match view.shape().index_at(view.size().wrapping_sub(1)) {
        Some(index) => index,
        None => ndview::bail!("no corner in an empty view"),
    };
    Ok(*view.get(&last)?)
}

#[test]
fn corner_helper() {
    let buffer = vec![1, 2, 3, 4, 5, 6];
    let view = View::new(&buffer, shape!((2, 3))).unwrap();
    assert_eq!(checked_corner(&view).unwrap(), 6);
    assert!(checked_corner(&View::empty()).is_err());
}
