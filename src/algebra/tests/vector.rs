use crate::algebra::*;

#[test]
fn test_copy_from() {
    let x = vec![3., 0., 2., 1.];
    let mut y = vec![0.; 4];
    y.copy_from(&x);
    assert_eq!(x, y);
}

#[test]
fn test_scalarop_from() {
    let x: Vec<f64> = vec![3., 0., 2., 1.];
    let mut y: Vec<f64> = vec![0.; 4];
    y.scalarop_from(|x| -2. * x, &x);
    assert_eq!(y, vec![-6., 0., -4., -2.]);
}

#[test]
fn test_translate_and_scale() {
    let mut x = [3., 0., 2., 1.];
    x.translate(-4.);
    assert_eq!(x, [-1., -4., -2., -3.]);
    x.scale(-2.);
    assert_eq!(x, [2., 8., 4., 6.]);
    x.set(1.5);
    assert_eq!(x, [1.5; 4]);
}

#[test]
fn test_hadamard() {
    let mut x = [1., -2., 3., -4.];
    let y = [4., 3., -2., 1.];
    x.hadamard(&y);
    assert_eq!(x, [4., -6., -6., -4.]);
}

#[test]
fn test_dot_product() {
    let x = vec![1., 2., 3., 4.];
    let y = vec![4., 5., 6., 7.];
    assert_eq!(x.dot(&y), 60.);
    assert_eq!(x.sumsq(), 30.);
}

#[test]
fn test_norms() {
    let x = [-3.0f64, 4.];
    assert_eq!(x.norm_inf(), 4.);
    assert_eq!([-5.0f64, 4.].norm_inf(), 5.);
    assert!([1., f64::NAN].norm_inf().is_nan());
    assert_eq!([0.0f64; 0].norm_inf(), 0.);
}

#[test]
fn test_minimum() {
    let x = [3.0f64, -1., 2.];
    assert_eq!(x.minimum(), -1.);
    assert_eq!([0.0f64; 0].minimum(), f64::INFINITY);
}

#[test]
fn test_axpby_waxpby() {
    let x = [1., 2., 3.];
    let mut y = [4., 5., 6.];
    y.axpby(2., &x, -1.);
    assert_eq!(y, [-2., -1., 0.]);

    let mut w = [0.; 3];
    w.waxpby(1., &x, 3., &y);
    assert_eq!(w, [-5., -1., 3.]);
}
